pub mod grid;

use glam::IVec2;

use crate::scene::{Scene, SceneController};
use crate::sim::anatomy::Part;
use crate::sim::snapshot::{BossView, BulletTag};
use crate::sim::{RenderSnapshot, HEIGHT};

pub use self::grid::TileGrid;

const BORDER_COLOR: u8 = 0x9f;
const TEXT_COLOR: u8 = 0xbf;
/// Color every tile of a part takes while it flashes.
const FLASH_COLOR: u8 = 0xbf;
const PLAYER_BULLET: (char, u8) = ('‼', 0x37);
const BOSS_BULLET: (char, u8) = ('♦', 0x4f);

/// Multi-cell glyph sprite, drawn relative to an anchor cell.
struct Sprite {
    width: usize,
    offset: IVec2,
    glyphs: &'static str,
    color: u8,
}

impl Sprite {
    fn draw(&self, grid: &mut TileGrid, at: IVec2, override_color: Option<u8>) {
        let color = override_color.unwrap_or(self.color);
        for (i, glyph) in self.glyphs.chars().enumerate() {
            let x = at.x + self.offset.x + (i % self.width) as i32;
            let y = at.y + self.offset.y + (i / self.width) as i32;
            grid.draw_tile(x, y, glyph, color);
        }
    }
}

/// Ship centered on the player cell. NUL is transparent.
const PLAYER_SPRITE: Sprite = Sprite {
    width: 5,
    offset: IVec2::new(-2, -1),
    glyphs: "\0\0∩\0\0\
             \0┤⌂├\0\
             /[║]\\\
             \0\\─/\0",
    color: 0x9f,
};

fn part_style(part: Part) -> (char, u8) {
    match part {
        Part::Core => ('█', 0x9e),
        Part::BodyCover => ('▒', 0xb7),
        Part::LeftWingBase | Part::RightWingBase => ('▓', 0x17),
        Part::LeftWingCover | Part::RightWingCover => ('░', 0xb7),
    }
}

/// Parts back to front: the core first, covers on top.
const DRAW_ORDER: [Part; 6] = [
    Part::Core,
    Part::LeftWingBase,
    Part::LeftWingCover,
    Part::RightWingBase,
    Part::RightWingCover,
    Part::BodyCover,
];

fn draw_boss(grid: &mut TileGrid, boss: &BossView) {
    for part in DRAW_ORDER {
        let view = boss.parts[part as usize];
        if !view.alive {
            continue;
        }
        let (glyph, color) = part_style(part);
        let color = if view.flashing { FLASH_COLOR } else { color };
        let r = part.rect();
        let (min, max) = (boss.anchor + r.min, boss.anchor + r.max);
        grid.fill_rect(min.x, min.y, max.x, max.y, glyph, color);
    }
}

/// Rasterize one frame of the fight.
pub fn draw_session(snap: &RenderSnapshot, grid: &mut TileGrid) {
    PLAYER_SPRITE.draw(grid, snap.player, snap.player_blink.then_some(FLASH_COLOR));

    for b in &snap.bullets {
        let (glyph, color) = match b.tag {
            BulletTag::Player => PLAYER_BULLET,
            BulletTag::Boss => BOSS_BULLET,
        };
        grid.draw_tile(b.cell.x, b.cell.y, glyph, color);
    }

    if let Some(boss) = &snap.boss {
        draw_boss(grid, boss);
    }

    grid.draw_border(BORDER_COLOR);
    grid.draw_text(" LIVES:  ", 3, HEIGHT - 1, TEXT_COLOR);
    grid.draw_text(&snap.lives.to_string(), 10, HEIGHT - 1, 0x07);
    grid.draw_text(&format!(" BOSS: {:>4} ", snap.boss_health.max(0)), 60, HEIGHT - 1, TEXT_COLOR);
}

/// Rasterize whatever the scene controller is showing.
pub fn draw_scene(scenes: &SceneController, grid: &mut TileGrid) {
    grid.clear();
    match scenes.scene {
        Scene::MainGame => {
            draw_session(&scenes.session().snapshot(), grid);
            return;
        }
        Scene::Start => {
            grid.draw_text("CELLSTORM", 16, 16, TEXT_COLOR);
            grid.draw_text(
                "Arrow keys to move\n\nC to shoot\n\n\n\nPress C to start",
                16,
                32,
                TEXT_COLOR,
            );
        }
        Scene::GameOver => {
            grid.draw_text("Damn, you failed", 16, 16, TEXT_COLOR);
            grid.draw_text("Press C to try again", 16, 32, TEXT_COLOR);
        }
        Scene::Victory => {
            grid.draw_text("The mothership is down", 16, 16, TEXT_COLOR);
            grid.draw_text("Press C to try again", 16, 32, TEXT_COLOR);
        }
    }
    grid.draw_border(BORDER_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::PLAYER_SPAWN;
    use crate::sim::Session;

    fn glyph_at(grid: &TileGrid, p: IVec2) -> Option<char> {
        grid.tile(p.x, p.y).map(|t| t.glyph)
    }

    #[test]
    fn fresh_session_frame() {
        let snap = Session::new().snapshot();
        let mut grid = TileGrid::new();
        draw_session(&snap, &mut grid);

        assert_eq!(glyph_at(&grid, PLAYER_SPAWN), Some('⌂'));
        let boss = snap.boss.expect("boss alive");
        // Covers are drawn over the bases.
        assert_eq!(glyph_at(&grid, boss.anchor + IVec2::new(3, 7)), Some('░'));
        assert_eq!(glyph_at(&grid, boss.anchor + IVec2::new(3, 2)), Some('▓'));
        assert_eq!(glyph_at(&grid, boss.anchor + IVec2::new(22, 10)), Some('▒'));
        assert_eq!(glyph_at(&grid, IVec2::new(10, HEIGHT - 1)), Some('3'));
    }

    #[test]
    fn bullets_use_tag_glyphs() {
        let mut s = Session::new();
        s.tick(crate::sim::Intent {
            fire: true,
            ..Default::default()
        });
        let snap = s.snapshot();
        let mut grid = TileGrid::new();
        draw_session(&snap, &mut grid);
        let b = snap.bullets[0];
        assert_eq!(b.tag, BulletTag::Player);
        assert_eq!(glyph_at(&grid, b.cell), Some(PLAYER_BULLET.0));
    }

    #[test]
    fn start_screen_has_prompt() {
        let scenes = SceneController::new();
        let mut grid = TileGrid::new();
        draw_scene(&scenes, &mut grid);
        assert!(grid.to_text().contains("Press C to start"));
    }
}
