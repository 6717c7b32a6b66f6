use glam::{IVec2, Vec2};

use super::{HEIGHT, WIDTH};

/// A projectile. Shared by the player's volleys and every boss pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Travel direction in radians, counter-clockwise from +x.
    pub angle: f32,
    pub speed: f32,
    pub accel: f32,
    pub max_speed: f32,
    capped: bool,
}

impl Bullet {
    /// Constant-speed bullet. Zero accel and zero cap, so it is capped from birth.
    pub fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self::accelerating(pos, angle, speed, 0.0, 0.0)
    }

    pub fn accelerating(pos: Vec2, angle: f32, speed: f32, accel: f32, max_speed: f32) -> Self {
        let mut b = Self {
            pos,
            angle,
            speed,
            accel,
            max_speed,
            capped: false,
        };
        b.capped = b.reached_cap();
        b
    }

    /// Direction of the cap comparison is fixed by the sign of `accel`.
    fn reached_cap(&self) -> bool {
        if self.accel >= 0.0 {
            self.speed >= self.max_speed
        } else {
            self.speed <= self.max_speed
        }
    }

    /// One tick of motion. Screen y grows downward.
    pub fn advance(&mut self) {
        if !self.capped {
            self.speed += self.accel;
            self.capped = self.reached_cap();
        }
        self.pos += Vec2::new(self.angle.cos(), -self.angle.sin()) * self.speed;
    }

    /// Grid cell the bullet is drawn in and collides with.
    pub fn cell(&self) -> IVec2 {
        (self.pos + Vec2::splat(0.5)).floor().as_ivec2()
    }

    pub fn is_outside_playfield(&self) -> bool {
        self.pos.x < 1.0
            || self.pos.x > (WIDTH - 2) as f32
            || self.pos.y < 1.0
            || self.pos.y > (HEIGHT - 2) as f32
    }
}
