use std::f32::consts::{PI, TAU};

use glam::{IVec2, Vec2};

use super::anatomy::{Anatomy, Side};
use super::bullet::Bullet;
use super::{HEIGHT, TICKS_PER_SECOND, WIDTH};

/// Length of each LEFT/RIGHT sweep in ticks.
const CRUISE_TICKS: i32 = 200;
/// Opening horizontal speed of a sweep, cells/tick.
const CRUISE_SPEED: f32 = 0.20;
/// Duration of the glide into the final firing position.
const FINAL_GLIDE_TICKS: i32 = TICKS_PER_SECOND;

const WING_SHOT_PERIOD: i32 = 30;
const BODY_SHOT_PERIOD: i32 = 80;
const FINAL_SHOT_PERIOD: i32 = 10;

/// Rays in the final-phase star burst.
const STAR_SHOTS: usize = 16;

/// Countdown that re-arms itself one tick after it lapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    remaining: i32,
    period: i32,
}

impl Cadence {
    pub fn new(first: i32, period: i32) -> Self {
        Self {
            remaining: first,
            period,
        }
    }

    pub fn ready(&self) -> bool {
        self.remaining <= 0
    }

    pub fn tick(&mut self) {
        if self.remaining <= 0 {
            self.remaining = self.period;
        }
        self.remaining -= 1;
    }
}

/// Observable name of the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PhaseKind {
    Entering,
    Left,
    Right,
    FinalIntoPosition,
    FinalShooting,
}

impl PhaseKind {
    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::Entering => "entering",
            PhaseKind::Left => "left",
            PhaseKind::Right => "right",
            PhaseKind::FinalIntoPosition => "final: into position",
            PhaseKind::FinalShooting => "final: shooting",
        }
    }
}

/// Movement phase and the timers that only make sense inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering { remaining: i32 },
    Cruise { heading: Side, remaining: i32 },
    FinalIntoPosition { remaining: i32 },
    FinalShooting { volley: Cadence },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Entering { .. } => PhaseKind::Entering,
            Phase::Cruise {
                heading: Side::Left,
                ..
            } => PhaseKind::Left,
            Phase::Cruise {
                heading: Side::Right,
                ..
            } => PhaseKind::Right,
            Phase::FinalIntoPosition { .. } => PhaseKind::FinalIntoPosition,
            Phase::FinalShooting { .. } => PhaseKind::FinalShooting,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Phase::FinalIntoPosition { .. } | Phase::FinalShooting { .. }
        )
    }

    fn expired(&self) -> bool {
        match self {
            Phase::Entering { remaining }
            | Phase::Cruise { remaining, .. }
            | Phase::FinalIntoPosition { remaining } => *remaining <= 0,
            Phase::FinalShooting { .. } => false,
        }
    }

    fn tick(&mut self) {
        match self {
            Phase::Entering { remaining }
            | Phase::Cruise { remaining, .. }
            | Phase::FinalIntoPosition { remaining } => *remaining = remaining.saturating_sub(1),
            Phase::FinalShooting { volley } => volley.tick(),
        }
    }
}

/// Where the boss comes to rest for the last stand.
fn final_anchor() -> Vec2 {
    Vec2::new((WIDTH / 2 - 23) as f32, (HEIGHT / 2 - 4) as f32)
}

/// The boss: kinematics, phase machine and anatomy.
#[derive(Debug, Clone)]
pub struct Boss {
    /// Top-left anchor; every hit-box and muzzle is relative to it.
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub anatomy: Anatomy,
    phase: Phase,
    wing_shots: Cadence,
    body_shots: Cadence,
}

impl Boss {
    /// Boss sliding down from the top edge.
    pub fn new() -> Self {
        Self {
            pos: Vec2::new((WIDTH / 2 - 23) as f32, 0.0),
            vel: Vec2::new(0.0, 0.30),
            acc: Vec2::new(0.0, -0.005),
            anatomy: Anatomy::new(),
            phase: Phase::Entering {
                remaining: TICKS_PER_SECOND,
            },
            wing_shots: Cadence::new(TICKS_PER_SECOND + 30, WING_SHOT_PERIOD),
            body_shots: Cadence::new(TICKS_PER_SECOND, BODY_SHOT_PERIOD),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn total_health(&self) -> i32 {
        self.anatomy.total_health
    }

    pub fn is_alive(&self) -> bool {
        self.anatomy.core_alive()
    }

    /// Anchor as a grid cell. Hit-testing uses this truncation.
    pub fn anchor_cell(&self) -> IVec2 {
        self.pos.as_ivec2()
    }

    /// Hit-test a grid point. Damages the first part in armor order and
    /// returns whether anything was hit.
    pub fn register_hit(&mut self, x: i32, y: i32) -> bool {
        if matches!(self.phase, Phase::Entering { .. }) || !self.is_alive() {
            return false;
        }
        let rel = IVec2::new(x, y) - self.anchor_cell();
        match self.anatomy.hit(rel) {
            Some(hit) => {
                if let Some(part) = hit.destroyed {
                    log::info!("Boss {} destroyed ({} health left)", part.label(), self.total_health());
                }
                true
            }
            None => false,
        }
    }

    /// Advance kinematics, phase machine and every countdown by one tick.
    pub fn update(&mut self) {
        self.vel += self.acc;
        self.pos += self.vel;

        if self.anatomy.armor_destroyed() && !self.phase.is_final() {
            self.begin_final_glide();
        }

        if self.phase.expired() {
            self.advance_phase();
        }

        self.phase.tick();
        self.wing_shots.tick();
        self.body_shots.tick();
        self.anatomy.tick_flashes();
    }

    /// Glide so velocity reaches zero at the final anchor as the timer runs out.
    fn begin_final_glide(&mut self) {
        let t = FINAL_GLIDE_TICKS as f32;
        self.vel = 2.0 * (final_anchor() - self.pos) / t;
        self.acc = -self.vel / t;
        self.phase = Phase::FinalIntoPosition {
            remaining: FINAL_GLIDE_TICKS,
        };
        log::info!("Boss armor gone, gliding into final position");
    }

    fn advance_phase(&mut self) {
        let current = self.phase;
        let next = match current {
            Phase::Entering { .. }
            | Phase::Cruise {
                heading: Side::Right,
                ..
            } => self.start_cruise(Side::Left),
            Phase::Cruise {
                heading: Side::Left,
                ..
            } => self.start_cruise(Side::Right),
            Phase::FinalIntoPosition { .. } => {
                self.vel = Vec2::ZERO;
                self.acc = Vec2::ZERO;
                // Primed one tick early so the first shooting tick fires.
                Phase::FinalShooting {
                    volley: Cadence::new(1, FINAL_SHOT_PERIOD),
                }
            }
            Phase::FinalShooting { .. } => return,
        };
        log::debug!("Boss phase {} -> {}", current.kind().label(), next.kind().label());
        self.phase = next;
    }

    /// Sweep out and back: decelerate, reverse, return over one cruise.
    fn start_cruise(&mut self, heading: Side) -> Phase {
        let vx = match heading {
            Side::Left => -CRUISE_SPEED,
            Side::Right => CRUISE_SPEED,
        };
        self.vel = Vec2::new(vx, 0.0);
        self.acc = Vec2::new(-2.0 * vx / CRUISE_TICKS as f32, 0.0);
        Phase::Cruise {
            heading,
            remaining: CRUISE_TICKS,
        }
    }

    /// Bullets emitted this tick. Does not change boss state.
    pub fn shoot(&self, player: IVec2) -> Vec<Bullet> {
        let mut out = Vec::new();
        let a = &self.anatomy;

        if self.wing_shots.ready() {
            for side in Side::BOTH {
                if a.wing_cover_intact(side) {
                    self.spread_burst(side, &mut out);
                } else if a.wing_alive(side) {
                    self.fan(side, &mut out);
                }
            }
        }

        if a.body_cover_alive() && self.body_shots.ready() {
            self.aimed_cluster(player, &mut out);
        }

        if let Phase::FinalShooting { volley } = &self.phase {
            if volley.ready() {
                self.star_burst(player, &mut out);
            }
        }

        out
    }

    /// Covered wing: three muzzles, three rounds of rising speed.
    fn spread_burst(&self, side: Side, out: &mut Vec<Bullet>) {
        let ox = self.pos.x + side.offset() as f32;
        let y = self.pos.y + 9.0;
        for i in 0..3 {
            let speed = 0.4 + i as f32 * 0.05;
            out.push(Bullet::new(Vec2::new(ox + 2.0, y), -PI / 2.0 - PI / 6.0, speed));
            out.push(Bullet::new(Vec2::new(ox + 7.0, y), -PI / 2.0, speed));
            out.push(Bullet::new(Vec2::new(ox + 12.0, y), -PI / 2.0 + PI / 6.0, speed));
        }
    }

    /// Exposed wing base: four-lane fans over a seven-way division.
    fn fan(&self, side: Side, out: &mut Vec<Bullet>) {
        let muzzle = Vec2::new(self.pos.x + side.offset() as f32 + 7.0, self.pos.y + 9.0);
        for i in [1.0f32, 3.0, 5.0] {
            let base = -i * PI / 7.0;
            out.push(Bullet::new(muzzle, base, 0.3));
            out.push(Bullet::new(muzzle, base - PI / 21.0, 0.3));
            out.push(Bullet::new(muzzle, base - 2.0 * PI / 21.0, 0.3));
            out.push(Bullet::new(muzzle, base - PI / 7.0, 0.3));
        }
    }

    fn aimed_cluster(&self, player: IVec2, out: &mut Vec<Bullet>) {
        let center = self.pos + Vec2::new(23.0, 16.0);
        let aim = aim_at(center, player);
        for d in [
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
        ] {
            out.push(Bullet::new(center + d, aim, 0.4));
        }
    }

    fn star_burst(&self, player: IVec2, out: &mut Vec<Bullet>) {
        let center = self.pos + Vec2::new(23.0, 4.0);
        let aim = aim_at(center, player);
        let piece = TAU / STAR_SHOTS as f32;
        for i in 0..STAR_SHOTS {
            out.push(Bullet::new(center, aim + i as f32 * piece, 0.5));
        }
    }
}

/// Angle from `from` toward `target` with screen y flipped.
fn aim_at(from: Vec2, target: IVec2) -> f32 {
    (from.y - target.y as f32).atan2(target.x as f32 - from.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::anatomy::{BODY_COVER_HEALTH, WING_HEALTH};

    const PLAYER: IVec2 = IVec2::new(40, 50);

    fn past_entering() -> Boss {
        let mut boss = Boss::new();
        while boss.phase.kind() == PhaseKind::Entering {
            boss.update();
        }
        boss
    }

    fn strip_armor(boss: &mut Boss) {
        boss.anatomy.left_wing_health = 0;
        boss.anatomy.right_wing_health = 0;
        boss.anatomy.body_cover_health = 0;
        boss.anatomy.total_health -= 2 * WING_HEALTH + BODY_COVER_HEALTH;
    }

    #[test]
    fn cadence_rearms_after_lapse() {
        let mut c = Cadence::new(0, 3);
        let mut fired = Vec::new();
        for t in 0..9 {
            if c.ready() {
                fired.push(t);
            }
            c.tick();
        }
        assert_eq!(fired, vec![0, 3, 6]);
    }

    #[test]
    fn invulnerable_while_entering() {
        let mut boss = Boss::new();
        let anchor = boss.anchor_cell();
        assert!(!boss.register_hit(anchor.x + 22, anchor.y + 2));
        assert_eq!(boss.total_health(), 1200);
    }

    #[test]
    fn entering_then_alternating_sweeps() {
        let mut boss = Boss::new();
        let mut ticks = 0;
        while boss.phase.kind() == PhaseKind::Entering {
            boss.update();
            ticks += 1;
        }
        assert_eq!(ticks, TICKS_PER_SECOND + 1);
        assert_eq!(boss.phase.kind(), PhaseKind::Left);
        assert!(boss.vel.x < 0.0);
        assert_eq!(boss.vel.y, 0.0);

        let start_x = boss.pos.x;
        for _ in 0..=CRUISE_TICKS {
            boss.update();
        }
        assert_eq!(boss.phase.kind(), PhaseKind::Right);
        // Decelerate, reverse and come back near the start.
        assert!((boss.pos.x - start_x).abs() < 1.0);
        for _ in 0..=CRUISE_TICKS {
            boss.update();
        }
        assert_eq!(boss.phase.kind(), PhaseKind::Left);
    }

    #[test]
    fn forced_final_on_armor_loss_only_once() {
        let mut boss = past_entering();
        strip_armor(&mut boss);
        boss.update();
        assert_eq!(boss.phase.kind(), PhaseKind::FinalIntoPosition);
        let Phase::FinalIntoPosition { remaining } = boss.phase else {
            panic!("expected glide");
        };
        assert_eq!(remaining, FINAL_GLIDE_TICKS - 1);

        // Further updates count down instead of restarting the glide.
        boss.update();
        assert_eq!(
            boss.phase,
            Phase::FinalIntoPosition {
                remaining: FINAL_GLIDE_TICKS - 2
            }
        );
    }

    #[test]
    fn glide_ends_stationary_near_target() {
        let mut boss = past_entering();
        strip_armor(&mut boss);
        while boss.phase.kind() != PhaseKind::FinalShooting {
            boss.update();
        }
        assert_eq!(boss.vel, Vec2::ZERO);
        assert_eq!(boss.acc, Vec2::ZERO);
        assert!(boss.pos.distance(final_anchor()) < 1.0);
    }

    #[test]
    fn final_star_every_ten_ticks_from_first_tick() {
        let mut boss = past_entering();
        strip_armor(&mut boss);
        while boss.phase.kind() != PhaseKind::FinalShooting {
            boss.update();
        }

        let mut volleys = Vec::new();
        for t in 0..35 {
            let shots = boss.shoot(PLAYER);
            if !shots.is_empty() {
                assert_eq!(shots.len(), STAR_SHOTS);
                let base = shots[0].angle;
                for (i, b) in shots.iter().enumerate() {
                    let expected = base + i as f32 * TAU / STAR_SHOTS as f32;
                    assert!((b.angle - expected).abs() < 1e-4);
                }
                let center = boss.pos + Vec2::new(23.0, 4.0);
                assert!((base - aim_at(center, PLAYER)).abs() < 1e-6);
                volleys.push(t);
            }
            boss.update();
        }
        assert_eq!(volleys, vec![0, 10, 20, 30]);
    }

    #[test]
    fn wing_patterns_swap_when_cover_breaks() {
        let mut boss = past_entering();
        boss.wing_shots = Cadence::new(0, WING_SHOT_PERIOD);
        boss.body_shots = Cadence::new(5, BODY_SHOT_PERIOD);

        // Both covers intact: two 9-round spreads.
        assert_eq!(boss.shoot(PLAYER).len(), 18);

        // Left exposed, right covered: 12-lane fan + 9-round spread.
        boss.anatomy.left_wing_health = 150;
        assert_eq!(boss.shoot(PLAYER).len(), 21);

        // Left gone.
        boss.anatomy.left_wing_health = 0;
        assert_eq!(boss.shoot(PLAYER).len(), 9);
    }

    fn assert_shot(b: &Bullet, pos: Vec2, angle: f32, speed: f32) {
        assert!(b.pos.distance(pos) < 1e-4, "muzzle {} != {}", b.pos, pos);
        assert!((b.angle - angle).abs() < 1e-5, "angle {} != {}", b.angle, angle);
        assert!((b.speed - speed).abs() < 1e-6, "speed {} != {}", b.speed, speed);
    }

    #[test]
    fn covered_wings_fire_three_muzzle_spreads() {
        let mut boss = past_entering();
        boss.wing_shots = Cadence::new(0, WING_SHOT_PERIOD);
        boss.body_shots = Cadence::new(5, BODY_SHOT_PERIOD);
        let shots = boss.shoot(PLAYER);
        assert_eq!(shots.len(), 18);

        let y = boss.pos.y + 9.0;
        for (ox, wing) in [(0.0, &shots[..9]), (30.0, &shots[9..])] {
            let x = boss.pos.x + ox;
            for (i, round) in wing.chunks(3).enumerate() {
                let speed = 0.4 + 0.05 * i as f32;
                assert_shot(&round[0], Vec2::new(x + 2.0, y), -2.0 * PI / 3.0, speed);
                assert_shot(&round[1], Vec2::new(x + 7.0, y), -PI / 2.0, speed);
                assert_shot(&round[2], Vec2::new(x + 12.0, y), -PI / 3.0, speed);
            }
        }
    }

    #[test]
    fn exposed_wings_fire_four_lane_fans() {
        let mut boss = past_entering();
        boss.wing_shots = Cadence::new(0, WING_SHOT_PERIOD);
        boss.body_shots = Cadence::new(5, BODY_SHOT_PERIOD);
        boss.anatomy.left_wing_health = 150;
        boss.anatomy.right_wing_health = 150;
        let shots = boss.shoot(PLAYER);
        assert_eq!(shots.len(), 24);

        let y = boss.pos.y + 9.0;
        for (ox, wing) in [(0.0, &shots[..12]), (30.0, &shots[12..])] {
            let muzzle = Vec2::new(boss.pos.x + ox + 7.0, y);
            for (k, fan) in wing.chunks(4).enumerate() {
                let i = (2 * k + 1) as f32;
                for (lane, b) in fan.iter().enumerate() {
                    let angle = -i * PI / 7.0 - lane as f32 * PI / 21.0;
                    assert_shot(b, muzzle, angle, 0.3);
                }
            }
        }
    }

    #[test]
    fn mixed_wings_keep_their_own_pattern() {
        let mut boss = past_entering();
        boss.wing_shots = Cadence::new(0, WING_SHOT_PERIOD);
        boss.body_shots = Cadence::new(5, BODY_SHOT_PERIOD);
        boss.anatomy.right_wing_health = 150;
        let shots = boss.shoot(PLAYER);
        assert_eq!(shots.len(), 21);

        let y = boss.pos.y + 9.0;
        assert_shot(&shots[0], Vec2::new(boss.pos.x + 2.0, y), -2.0 * PI / 3.0, 0.4);
        assert_shot(&shots[9], Vec2::new(boss.pos.x + 37.0, y), -PI / 7.0, 0.3);
        assert_shot(&shots[20], Vec2::new(boss.pos.x + 37.0, y), -6.0 * PI / 7.0, 0.3);
    }

    #[test]
    fn aimed_cluster_points_at_player() {
        let mut boss = past_entering();
        boss.wing_shots = Cadence::new(5, WING_SHOT_PERIOD);
        boss.body_shots = Cadence::new(0, BODY_SHOT_PERIOD);
        let shots = boss.shoot(PLAYER);
        assert_eq!(shots.len(), 4);
        let center = boss.pos + Vec2::new(23.0, 16.0);
        let aim = aim_at(center, PLAYER);
        for b in &shots {
            assert_eq!(b.angle, aim);
            assert!((b.pos.distance(center) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn wing_cadence_fires_every_thirty_ticks() {
        let mut boss = Boss::new();
        let mut wing_ticks = Vec::new();
        for t in 0..200 {
            // Body cadence only ever adds 4 rounds.
            if boss.shoot(PLAYER).len() >= 18 {
                wing_ticks.push(t);
            }
            boss.update();
        }
        assert_eq!(wing_ticks, vec![90, 120, 150, 180]);
    }
}
