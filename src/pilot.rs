use crate::scene::{Scene, SceneController};
use crate::sim::{Intent, HEIGHT};

/// Ticks between fire toggles on menu screens, so presses register.
const MENU_PRESS_TICKS: u32 = 30;
/// How long one wander direction is held.
const WANDER_MIN_TICKS: u32 = 6;
const WANDER_MAX_TICKS: u32 = 24;
/// The pilot keeps to the rows below this.
const LOWER_BAND_Y: i32 = HEIGHT * 2 / 3;

/// Scripted stand-in for a human at the keyboard: drifts under the boss,
/// wanders in the lower band and holds fire.
pub struct Autopilot {
    rng: fastrand::Rng,
    wander: (i32, i32),
    wander_ticks: u32,
    menu_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            wander: (0, 0),
            wander_ticks: 0,
            menu_ticks: 0,
        }
    }

    pub fn intent(&mut self, scenes: &SceneController) -> Intent {
        if scenes.scene != Scene::MainGame {
            self.menu_ticks += 1;
            return Intent {
                fire: (self.menu_ticks / MENU_PRESS_TICKS) % 2 == 1,
                ..Intent::default()
            };
        }
        self.menu_ticks = 0;

        if self.wander_ticks == 0 {
            self.wander = (self.rng.i32(-1..=1), self.rng.i32(-1..=1));
            self.wander_ticks = self.rng.u32(WANDER_MIN_TICKS..=WANDER_MAX_TICKS);
        }
        self.wander_ticks -= 1;

        let session = scenes.session();
        let me = session.player().cell;
        let (mut dx, mut dy) = self.wander;

        // Track the core's column most of the time.
        let boss = session.boss();
        if boss.is_alive() {
            let core_x = boss.anchor_cell().x + 23;
            if self.rng.f32() < 0.6 {
                dx = (core_x - me.x).signum();
            }
        }
        if me.y < LOWER_BAND_Y {
            dy = 1;
        }

        Intent {
            up: dy < 0,
            down: dy > 0,
            left: dx < 0,
            right: dx > 0,
            fire: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_presses_toggle() {
        let scenes = SceneController::new();
        let mut pilot = Autopilot::new(7);
        let fires: Vec<bool> = (0..2 * MENU_PRESS_TICKS)
            .map(|_| pilot.intent(&scenes).fire)
            .collect();
        assert!(fires.contains(&true));
        assert!(fires.contains(&false));
    }

    #[test]
    fn starts_a_game_and_fights() {
        let mut scenes = SceneController::new();
        let mut pilot = Autopilot::new(1);
        for _ in 0..120 {
            let intent = pilot.intent(&scenes);
            scenes.update(intent);
        }
        assert_eq!(scenes.scene, Scene::MainGame);
        assert!(scenes.session().tick_count() > 0);
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let mut scenes = SceneController::new();
            let mut pilot = Autopilot::new(seed);
            for _ in 0..600 {
                let intent = pilot.intent(&scenes);
                scenes.update(intent);
            }
            scenes.session().snapshot()
        };
        assert_eq!(run(99), run(99));
    }
}
