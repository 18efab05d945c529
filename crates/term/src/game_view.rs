//! GameView: draws a `GameSnapshot` into a [`Canvas`].
//!
//! Pure, no I/O. Layout, top to bottom: the preview strip, then the framed
//! 10x20 well with the counters panel to its right.

use crate::core::{ActiveSnapshot, GameSnapshot, PhaseKind};
use crate::fb::{Canvas, Glyph, Rgb, BLACK};
use crate::types::{Tile, BOARD_HEIGHT, BOARD_WIDTH, LOCKED_OUT_TILE, PREVIEW_Y};

/// Rows reserved above the well for the preview piece
const PREVIEW_ROWS: u16 = 2;

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const FRAME: Rgb = Rgb::new(170, 170, 180);
const LABEL: Rgb = Rgb::new(235, 235, 235);
const VALUE: Rgb = Rgb::new(190, 190, 200);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Color for a board tile id; 0 has none.
pub fn tile_color(tile: Tile) -> Option<Rgb> {
    Some(match tile {
        1 => Rgb::new(220, 60, 60),
        2 => Rgb::new(235, 210, 70),
        3 => Rgb::new(70, 200, 220),
        4 => Rgb::new(200, 90, 210),
        5 => Rgb::new(90, 210, 100),
        6 => Rgb::new(80, 110, 230),
        7 => Rgb::new(240, 150, 40),
        LOCKED_OUT_TILE => Rgb::new(120, 120, 120),
        _ => return None,
    })
}

pub struct GameView {
    /// Terminal columns per board cell; 2 keeps cells roughly square.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

/// Where the well landed on the canvas
#[derive(Debug, Clone, Copy)]
struct Layout {
    /// Top-left of the frame border
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let total_h = PREVIEW_ROWS + frame_h;
        let top = viewport.height.saturating_sub(total_h) / 2;
        Layout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: top + PREVIEW_ROWS,
            frame_w,
            frame_h,
        }
    }

    /// Render into an existing canvas, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.resize(viewport.width, viewport.height);
        canvas.clear();

        let layout = self.layout(viewport);
        self.draw_frame(canvas, layout);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                self.draw_tile(canvas, layout, x as i8, y as i8, tile);
            }
        }

        if let Some(active) = snap.active {
            self.draw_piece(canvas, layout, &active);
        }

        self.draw_preview(canvas, layout, &snap.preview);
        self.draw_panel(canvas, layout, snap);

        match snap.phase {
            PhaseKind::Paused => self.draw_banner(canvas, layout, "PAUSED"),
            PhaseKind::GameOverDone => self.draw_banner(canvas, layout, "GAME OVER"),
            _ => {}
        }
    }

    /// Convenience helper that allocates a new canvas.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    fn draw_frame(&self, canvas: &mut Canvas, l: Layout) {
        let style = Glyph::colored(' ', FRAME, BLACK);
        let right = l.frame_x + l.frame_w - 1;
        let bottom = l.frame_y + l.frame_h - 1;

        canvas.fill(
            l.frame_x + 1,
            l.frame_y + 1,
            l.frame_w - 2,
            l.frame_h - 2,
            Glyph::colored(' ', FRAME, WELL_BG),
        );
        for x in l.frame_x + 1..right {
            canvas.put(x, bottom, style.with_char('═'));
        }
        for y in l.frame_y..bottom {
            canvas.put(l.frame_x, y, style.with_char('║'));
            canvas.put(right, y, style.with_char('║'));
        }
        canvas.put(l.frame_x, bottom, style.with_char('╚'));
        canvas.put(right, bottom, style.with_char('╝'));
    }

    /// Screen position of a board cell, if it is on the visible field
    fn cell_origin(&self, l: Layout, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((
            l.frame_x + 1 + x as u16 * self.cell_w,
            l.frame_y + 1 + y as u16,
        ))
    }

    fn draw_tile(&self, canvas: &mut Canvas, l: Layout, x: i8, y: i8, tile: Tile) {
        let Some((sx, sy)) = self.cell_origin(l, x, y) else {
            return;
        };
        let glyph = match tile_color(tile) {
            Some(color) => Glyph::colored('█', color, WELL_BG),
            None => Glyph::colored('·', Rgb::new(70, 70, 80), WELL_BG),
        };
        canvas.fill(sx, sy, self.cell_w, 1, glyph);
    }

    fn draw_piece(&self, canvas: &mut Canvas, l: Layout, piece: &ActiveSnapshot) {
        let tile = piece.kind.tile();
        for (x, y) in piece.cells() {
            self.draw_tile(canvas, l, x, y, tile);
        }
    }

    fn draw_preview(&self, canvas: &mut Canvas, l: Layout, piece: &ActiveSnapshot) {
        let Some(color) = tile_color(piece.kind.tile()) else {
            return;
        };
        let top = l.frame_y.saturating_sub(PREVIEW_ROWS);
        canvas.text(
            l.frame_x.saturating_sub(5),
            top,
            "NEXT",
            Glyph::plain(' ').bold(),
        );
        // spawn orientation occupies mask rows 1-2, i.e. board rows PREVIEW_Y+1..=PREVIEW_Y+2
        for (x, y) in piece.cells() {
            let row = y - PREVIEW_Y - 1;
            if !(0..PREVIEW_ROWS as i8).contains(&row) || x < 0 {
                continue;
            }
            let sx = l.frame_x + 1 + x as u16 * self.cell_w;
            let glyph = Glyph::colored('█', color, BLACK);
            canvas.fill(sx, top + row as u16, self.cell_w, 1, glyph);
        }
    }

    fn draw_panel(&self, canvas: &mut Canvas, l: Layout, snap: &GameSnapshot) {
        let x = l.frame_x + l.frame_w + 2;
        if x >= canvas.width() {
            return;
        }
        let label = Glyph::colored(' ', LABEL, BLACK).bold();
        let value = Glyph::colored(' ', VALUE, BLACK);

        let mut y = l.frame_y + 1;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("COMBO", snap.combo),
            ("RANK", snap.ranking as u32),
        ] {
            canvas.text(x, y, name, label);
            canvas.text(x, y + 1, &number.to_string(), value);
            y += 3;
        }

        let status = match snap.phase {
            PhaseKind::LineClear => "CLEAR",
            PhaseKind::GameOver | PhaseKind::GameOverDone => "OVER",
            _ => "",
        };
        canvas.text(x, y, status, label);
    }

    fn draw_banner(&self, canvas: &mut Canvas, l: Layout, text: &str) {
        let width = text.chars().count() as u16;
        let x = l.frame_x + l.frame_w.saturating_sub(width) / 2;
        let y = l.frame_y + l.frame_h / 2;
        let style = Glyph::colored(' ', Rgb::new(255, 255, 255), BLACK).bold();
        canvas.text(x, y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Rotation};

    fn find(canvas: &Canvas, needle: &str) -> Option<(u16, u16)> {
        (0..canvas.height()).find_map(|y| {
            canvas
                .row_text(y)
                .find(needle)
                .map(|byte_x| (canvas.row_text(y)[..byte_x].chars().count() as u16, y))
        })
    }

    #[test]
    fn board_tiles_use_their_colors() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = 3;
        snap.board[19][9] = LOCKED_OUT_TILE;
        let view = GameView::default();
        let canvas = view.render(&snap, Viewport::new(80, 24));
        let l = view.layout(Viewport::new(80, 24));

        let left = canvas.get(l.frame_x + 1, l.frame_y + 20).unwrap();
        assert_eq!(left.ch, '█');
        assert_eq!(Some(left.fg), tile_color(3));

        let right = canvas.get(l.frame_x + 1 + 18, l.frame_y + 20).unwrap();
        assert_eq!(Some(right.fg), tile_color(LOCKED_OUT_TILE));
    }

    #[test]
    fn active_piece_hidden_above_field() {
        let mut snap = GameSnapshot::default();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: 3,
            y: -2,
        });
        let view = GameView::default();
        let canvas = view.render(&snap, Viewport::new(80, 24));
        let l = view.layout(Viewport::new(80, 24));
        // row 0 of the well stays empty
        let glyph = canvas.get(l.frame_x + 1 + 6, l.frame_y + 1).unwrap();
        assert_eq!(glyph.ch, '·');
    }

    #[test]
    fn panel_and_banner_text() {
        let mut snap = GameSnapshot::default();
        snap.score = 1234;
        snap.phase = PhaseKind::Paused;
        let canvas = GameView::default().render(&snap, Viewport::new(80, 24));
        assert!(find(&canvas, "SCORE").is_some());
        assert!(find(&canvas, "1234").is_some());
        assert!(find(&canvas, "PAUSED").is_some());
        assert!(find(&canvas, "GAME OVER").is_none());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let canvas = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!(canvas.width(), 5);
    }
}
