use glam::IVec2;

/// Core health, including everything the armor is worth.
pub const TOTAL_HEALTH: i32 = 1200;
pub const BODY_COVER_HEALTH: i32 = 200;
pub const WING_HEALTH: i32 = 400;
/// Share of a wing's health that belongs to its cover plate.
pub const WING_COVER_HEALTH: i32 = 200;
/// Ticks a part stays highlighted after taking a hit.
const FLASH_TICKS: i32 = 2;

/// Right wing sits this many cells to the right of the left one.
pub const RIGHT_WING_OFFSET: i32 = 30;

/// Axis-aligned rectangle in boss-local cells, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: IVec2::new(x0, y0),
            max: IVec2::new(x1, y1),
        }
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    pub fn shifted(&self, dx: i32) -> Self {
        let d = IVec2::new(dx, 0);
        Self {
            min: self.min + d,
            max: self.max + d,
        }
    }
}

const WING_BASE_RECT: Rect = Rect::new(0, 1, 16, 7);
/// Hangs below the base; shares row 6 with it.
const WING_COVER_RECT: Rect = Rect::new(0, 6, 16, 10);
const BODY_COVER_RECT: Rect = Rect::new(19, 8, 27, 14);
const CORE_RECT: Rect = Rect::new(19, 0, 27, 8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Horizontal offset of this wing from the boss anchor.
    pub fn offset(self) -> i32 {
        match self {
            Side::Left => 0,
            Side::Right => RIGHT_WING_OFFSET,
        }
    }

    fn base(self) -> Part {
        match self {
            Side::Left => Part::LeftWingBase,
            Side::Right => Part::RightWingBase,
        }
    }

    fn cover(self) -> Part {
        match self {
            Side::Left => Part::LeftWingCover,
            Side::Right => Part::RightWingCover,
        }
    }
}

/// Individually drawn and flashed piece of the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Part {
    Core = 0,
    BodyCover = 1,
    LeftWingBase = 2,
    LeftWingCover = 3,
    RightWingBase = 4,
    RightWingCover = 5,
}

impl Part {
    pub const ALL: [Part; 6] = [
        Self::Core,
        Self::BodyCover,
        Self::LeftWingBase,
        Self::LeftWingCover,
        Self::RightWingBase,
        Self::RightWingCover,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::BodyCover => "body cover",
            Self::LeftWingBase => "left wing",
            Self::LeftWingCover => "left wing cover",
            Self::RightWingBase => "right wing",
            Self::RightWingCover => "right wing cover",
        }
    }

    /// Boss-local footprint of the part.
    pub fn rect(self) -> Rect {
        match self {
            Self::Core => CORE_RECT,
            Self::BodyCover => BODY_COVER_RECT,
            Self::LeftWingBase => WING_BASE_RECT,
            Self::LeftWingCover => WING_COVER_RECT,
            Self::RightWingBase => WING_BASE_RECT.shifted(RIGHT_WING_OFFSET),
            Self::RightWingCover => WING_COVER_RECT.shifted(RIGHT_WING_OFFSET),
        }
    }
}

/// Outcome of a successful hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Part that took the hit and flashes.
    pub part: Part,
    /// Part this hit finished off. A base-row hit can break the wing cover.
    pub destroyed: Option<Part>,
}

/// Health pools and hit feedback of the boss. Pools only ever decrease.
#[derive(Debug, Clone)]
pub struct Anatomy {
    pub total_health: i32,
    pub body_cover_health: i32,
    pub left_wing_health: i32,
    pub right_wing_health: i32,
    flash: [i32; 6],
}

impl Anatomy {
    pub fn new() -> Self {
        Self {
            total_health: TOTAL_HEALTH,
            body_cover_health: BODY_COVER_HEALTH,
            left_wing_health: WING_HEALTH,
            right_wing_health: WING_HEALTH,
            flash: [0; 6],
        }
    }

    pub fn wing_health(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.left_wing_health,
            Side::Right => self.right_wing_health,
        }
    }

    fn wing_health_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Left => &mut self.left_wing_health,
            Side::Right => &mut self.right_wing_health,
        }
    }

    pub fn wing_alive(&self, side: Side) -> bool {
        self.wing_health(side) > 0
    }

    pub fn wing_cover_intact(&self, side: Side) -> bool {
        self.wing_health(side) > WING_HEALTH - WING_COVER_HEALTH
    }

    pub fn body_cover_alive(&self) -> bool {
        self.body_cover_health > 0
    }

    pub fn core_alive(&self) -> bool {
        self.total_health > 0
    }

    /// Both wings and the body cover are gone.
    pub fn armor_destroyed(&self) -> bool {
        self.left_wing_health <= 0 && self.right_wing_health <= 0 && self.body_cover_health <= 0
    }

    pub fn part_alive(&self, part: Part) -> bool {
        match part {
            Part::Core => self.core_alive(),
            Part::BodyCover => self.body_cover_alive(),
            Part::LeftWingBase => self.wing_alive(Side::Left),
            Part::LeftWingCover => self.wing_cover_intact(Side::Left),
            Part::RightWingBase => self.wing_alive(Side::Right),
            Part::RightWingCover => self.wing_cover_intact(Side::Right),
        }
    }

    pub fn is_flashing(&self, part: Part) -> bool {
        self.flash[part as usize] > 0
    }

    /// Test a boss-local point against the hit-boxes in armor order and
    /// apply one point of damage to the first live part that contains it.
    pub fn hit(&mut self, rel: IVec2) -> Option<Hit> {
        for side in Side::BOTH {
            if !self.wing_alive(side) {
                continue;
            }
            let cover = side.cover();
            if self.wing_cover_intact(side) && cover.rect().contains(rel) {
                return Some(self.damage_wing(side, cover));
            }
            let base = side.base();
            if base.rect().contains(rel) {
                return Some(self.damage_wing(side, base));
            }
        }

        if self.body_cover_alive() && BODY_COVER_RECT.contains(rel) {
            self.body_cover_health -= 1;
            self.flash[Part::BodyCover as usize] = FLASH_TICKS;
            let destroyed = (self.body_cover_health == 0).then_some(Part::BodyCover);
            if destroyed.is_some() {
                self.deduct_total(BODY_COVER_HEALTH);
            }
            return Some(Hit {
                part: Part::BodyCover,
                destroyed,
            });
        }

        if self.core_alive() && CORE_RECT.contains(rel) {
            self.total_health -= 1;
            self.flash[Part::Core as usize] = FLASH_TICKS;
            return Some(Hit {
                part: Part::Core,
                destroyed: (self.total_health == 0).then_some(Part::Core),
            });
        }

        None
    }

    fn damage_wing(&mut self, side: Side, part: Part) -> Hit {
        let health = self.wing_health_mut(side);
        *health -= 1;
        let remaining = *health;
        self.flash[part as usize] = FLASH_TICKS;

        // Runs once: a wing at zero is no longer hittable.
        if remaining == 0 {
            self.deduct_total(WING_HEALTH);
        }
        let destroyed = if remaining == WING_HEALTH - WING_COVER_HEALTH {
            Some(side.cover())
        } else if remaining == 0 {
            Some(side.base())
        } else {
            None
        };
        Hit { part, destroyed }
    }

    fn deduct_total(&mut self, amount: i32) {
        self.total_health = (self.total_health - amount).max(0);
    }

    pub fn tick_flashes(&mut self) {
        for f in &mut self.flash {
            *f = f.saturating_sub(1);
        }
    }
}
