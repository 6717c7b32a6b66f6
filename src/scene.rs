use crate::sim::{Intent, Session};

/// Top-level screen the game is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Start,
    MainGame,
    GameOver,
    Victory,
}

impl Scene {
    pub fn label(self) -> &'static str {
        match self {
            Scene::Start => "Start",
            Scene::MainGame => "Main game",
            Scene::GameOver => "Game over",
            Scene::Victory => "Victory",
        }
    }
}

/// Scene state machine. Owns the running session and rebuilds it on replay.
pub struct SceneController {
    pub scene: Scene,
    session: Session,
    /// Fire edge detection for the menu screens.
    fire_was_down: bool,
    pub victories: u32,
    pub defeats: u32,
}

impl SceneController {
    pub fn new() -> Self {
        Self {
            scene: Scene::Start,
            session: Session::new(),
            fire_was_down: false,
            victories: 0,
            defeats: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fire went down this tick.
    fn poll_fire(&mut self, fire_down: bool) -> bool {
        let pressed = fire_down && !self.fire_was_down;
        self.fire_was_down = fire_down;
        pressed
    }

    /// Run one host tick. Returns true if the scene changed.
    pub fn update(&mut self, intent: Intent) -> bool {
        let pressed = self.poll_fire(intent.fire);

        let next = match self.scene {
            Scene::Start if pressed => Some(Scene::MainGame),
            Scene::MainGame => {
                if self.session.lives() < 0 {
                    self.defeats += 1;
                    Some(Scene::GameOver)
                } else {
                    self.session.tick(intent);
                    if self.session.boss_health() <= 0 {
                        self.victories += 1;
                        Some(Scene::Victory)
                    } else {
                        None
                    }
                }
            }
            Scene::GameOver | Scene::Victory if pressed => {
                self.session = Session::new();
                Some(Scene::MainGame)
            }
            _ => None,
        };

        match next {
            Some(scene) => {
                log::info!(
                    "Scene {} -> {} (tick {}, lives {}, boss {})",
                    self.scene.label(),
                    scene.label(),
                    self.session.tick_count(),
                    self.session.lives(),
                    self.session.boss_health()
                );
                self.scene = scene;
                true
            }
            None => false,
        }
    }
}
