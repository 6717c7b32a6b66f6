use glam::IVec2;

use super::anatomy::Part;
use super::boss::PhaseKind;

/// Who fired a bullet. Drawn with distinct glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletTag {
    Player,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletCell {
    pub cell: IVec2,
    pub tag: BulletTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartView {
    pub part: Part,
    pub alive: bool,
    pub flashing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossView {
    pub anchor: IVec2,
    pub phase: PhaseKind,
    pub parts: [PartView; 6],
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub player: IVec2,
    /// Player sprite is in the "off" half of its iframe blink.
    pub player_blink: bool,
    /// `None` once the boss is defeated.
    pub boss: Option<BossView>,
    pub bullets: Vec<BulletCell>,
    pub lives: i32,
    pub boss_health: i32,
    pub tick: u64,
}
