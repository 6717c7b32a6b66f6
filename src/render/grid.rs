use crate::sim::{HEIGHT, WIDTH};

/// One character cell: glyph plus an 8-bit palette index (high nibble
/// background, low nibble foreground).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub glyph: char,
    pub color: u8,
}

impl Tile {
    pub const BLANK: Tile = Tile {
        glyph: ' ',
        color: 0x00,
    };
}

/// The 80x60 glyph screen. Draws outside the grid are dropped.
pub struct TileGrid {
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub const WIDTH: usize = WIDTH as usize;
    pub const HEIGHT: usize = HEIGHT as usize;

    pub fn new() -> Self {
        Self {
            tiles: vec![Tile::BLANK; Self::WIDTH * Self::HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.tiles.fill(Tile::BLANK);
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some(x as usize + y as usize * Self::WIDTH)
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        Self::index(x, y).map(|i| self.tiles[i])
    }

    /// NUL glyphs are transparent.
    pub fn draw_tile(&mut self, x: i32, y: i32, glyph: char, color: u8) {
        if glyph == '\0' {
            return;
        }
        if let Some(i) = Self::index(x, y) {
            self.tiles[i] = Tile { glyph, color };
        }
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, glyph: char, color: u8) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.draw_tile(x, y, glyph, color);
            }
        }
    }

    /// Draw text starting at (x, y). `\n` returns to column x on the next row.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u8) {
        let (mut dx, mut dy) = (0, 0);
        for c in text.chars() {
            if c == '\n' {
                dx = 0;
                dy += 1;
            } else {
                self.draw_tile(x + dx, y + dy, c, color);
                dx += 1;
            }
        }
    }

    /// Double-line frame around the whole screen.
    pub fn draw_border(&mut self, color: u8) {
        let (r, b) = (WIDTH - 1, HEIGHT - 1);
        for x in 1..r {
            self.draw_tile(x, 0, '═', color);
            self.draw_tile(x, b, '═', color);
        }
        for y in 1..b {
            self.draw_tile(0, y, '║', color);
            self.draw_tile(r, y, '║', color);
        }
        self.draw_tile(0, 0, '╔', color);
        self.draw_tile(r, 0, '╗', color);
        self.draw_tile(0, b, '╚', color);
        self.draw_tile(r, b, '╝', color);
    }

    /// Glyphs only, one line per row. Used for headless frame dumps.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((Self::WIDTH + 1) * Self::HEIGHT * 3);
        for y in 0..HEIGHT {
            out.extend((0..WIDTH).filter_map(|x| self.tile(x, y)).map(|t| t.glyph));
            out.push('\n');
        }
        out
    }
}
