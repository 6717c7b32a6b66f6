use std::f32::consts::FRAC_PI_2;

use glam::{IVec2, Vec2};

use super::anatomy::Part;
use super::boss::Boss;
use super::bullet::Bullet;
use super::snapshot::{BossView, BulletCell, BulletTag, PartView, RenderSnapshot};
use super::{HEIGHT, TICKS_PER_SECOND, WIDTH};

/// Lives at the start of a run. Game over is signaled below zero.
const STARTING_LIVES: i32 = 3;
/// Ticks between player volleys.
const SHOT_PERIOD: i32 = 5;
/// Invulnerability after losing a life.
const IFRAME_TICKS: i32 = 2 * TICKS_PER_SECOND;
/// Iframe blink half-period in ticks.
const BLINK_TICKS: i32 = 8;
const PLAYER_BULLET_SPEED: f32 = 1.0;

pub const PLAYER_SPAWN: IVec2 = IVec2::new(WIDTH / 2, HEIGHT - 10);

/// Per-tick input from the host. Directions combine; opposites cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Intent {
    pub fn direction(&self) -> IVec2 {
        IVec2::new(
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub cell: IVec2,
    pub lives: i32,
    /// Remaining invulnerability. Goes negative between hits.
    pub iframes: i32,
}

impl Player {
    fn new() -> Self {
        Self {
            cell: PLAYER_SPAWN,
            lives: STARTING_LIVES,
            iframes: 0,
        }
    }

    /// Move one cell per axis, staying inside the border.
    fn step(&mut self, dir: IVec2) {
        self.cell = (self.cell + dir).clamp(IVec2::ONE, IVec2::new(WIDTH - 2, HEIGHT - 2));
    }

    /// Lose a life and respawn unless invulnerable. Returns whether it happened.
    fn take_hit(&mut self) -> bool {
        if self.iframes > 0 {
            return false;
        }
        self.lives -= 1;
        self.cell = PLAYER_SPAWN;
        self.iframes = IFRAME_TICKS;
        log::info!("Player hit, {} lives left", self.lives);
        true
    }
}

/// One fight: the player, the boss and every bullet in flight.
pub struct Session {
    pub(crate) player: Player,
    pub(crate) boss: Boss,
    player_bullets: Vec<Bullet>,
    boss_bullets: Vec<Bullet>,
    /// Ticks until the next volley may fire.
    shot_cd: i32,
    tick_count: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            player: Player::new(),
            boss: Boss::new(),
            player_bullets: Vec::new(),
            boss_bullets: Vec::new(),
            shot_cd: 0,
            tick_count: 0,
        }
    }

    pub fn lives(&self) -> i32 {
        self.player.lives
    }

    pub fn boss_health(&self) -> i32 {
        self.boss.total_health()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Run one fixed tick of the fight.
    pub fn tick(&mut self, intent: Intent) {
        if intent.fire && self.shot_cd <= 0 {
            self.fire_volley();
        }

        if self.boss.is_alive() {
            let shots = self.boss.shoot(self.player.cell);
            self.boss_bullets.extend(shots);
        }

        self.player.step(intent.direction());

        // Ramming damages the boss even during iframes.
        let cell = self.player.cell;
        if self.boss.register_hit(cell.x, cell.y) {
            self.player.take_hit();
        }

        let boss = &mut self.boss;
        self.player_bullets.retain_mut(|b| {
            b.advance();
            if b.is_outside_playfield() {
                return false;
            }
            let p = b.pos.as_ivec2();
            !boss.register_hit(p.x, p.y)
        });

        let player = &mut self.player;
        self.boss_bullets.retain_mut(|b| {
            b.advance();
            if b.is_outside_playfield() {
                return false;
            }
            if b.cell() == player.cell {
                player.take_hit();
                return false;
            }
            true
        });

        self.boss.update();

        self.shot_cd = self.shot_cd.saturating_sub(1);
        self.player.iframes = self.player.iframes.saturating_sub(1);
        self.tick_count += 1;

        log::trace!(
            "tick {}: {} player / {} boss bullets",
            self.tick_count,
            self.player_bullets.len(),
            self.boss_bullets.len()
        );
    }

    /// Three rounds in a small triangle, straight up.
    fn fire_volley(&mut self) {
        let p = self.player.cell.as_vec2();
        for offset in [
            Vec2::new(-1.0, -1.0),
            Vec2::new(0.0, -2.0),
            Vec2::new(1.0, -1.0),
        ] {
            self.player_bullets
                .push(Bullet::new(p + offset, FRAC_PI_2, PLAYER_BULLET_SPEED));
        }
        self.shot_cd = SHOT_PERIOD;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let boss = self.boss.is_alive().then(|| {
            let anatomy = &self.boss.anatomy;
            BossView {
                anchor: self.boss.anchor_cell(),
                phase: self.boss.phase().kind(),
                parts: Part::ALL.map(|part| PartView {
                    part,
                    alive: anatomy.part_alive(part),
                    flashing: anatomy.is_flashing(part),
                }),
            }
        });

        let tagged = |bullets: &[Bullet], tag| {
            bullets
                .iter()
                .map(move |b| BulletCell { cell: b.cell(), tag })
                .collect::<Vec<_>>()
        };
        let mut bullets = tagged(&self.player_bullets, BulletTag::Player);
        bullets.extend(tagged(&self.boss_bullets, BulletTag::Boss));

        RenderSnapshot {
            player: self.player.cell,
            player_blink: (self.player.iframes / BLINK_TICKS) % 2 == 1,
            boss,
            bullets,
            lives: self.player.lives,
            boss_health: self.boss.total_health(),
            tick: self.tick_count,
        }
    }
}
