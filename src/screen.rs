/// Character-grid render target and the frame composer.
///
/// `compose` fully overwrites a `Screen` from the session state; the binary
/// then blits it verbatim. Nothing here touches the terminal.

use crate::entities::{GAME_OVER_MESSAGE, PLAYER_GLYPH, PLAYER_HIT_GLYPH};
use crate::session::Session;

/// Column of the status line on row 0.
const STATUS_COL: i32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Screen {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![' '; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn offset(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    pub fn get(&self, col: i32, row: i32) -> Option<char> {
        self.offset(col, row).map(|i| self.cells[i])
    }

    /// Write one character. Writing outside the grid is a bug: it asserts in
    /// debug builds and is dropped in release builds.
    pub fn put(&mut self, col: i32, row: i32, ch: char) {
        let offset = self.offset(col, row);
        debug_assert!(
            offset.is_some(),
            "write outside {}x{} screen at ({}, {})",
            self.width,
            self.height,
            col,
            row
        );
        match offset {
            Some(i) => self.cells[i] = ch,
            None => log::trace!("dropped out-of-bounds write at ({}, {})", col, row),
        }
    }

    /// Write `text` starting at `(col, row)`, one cell per character.
    pub fn put_str(&mut self, col: i32, row: i32, text: &str) {
        for (k, ch) in text.chars().enumerate() {
            self.put(col + k as i32, row, ch);
        }
    }

    /// One screen row as a string, `None` past the bottom edge.
    pub fn row(&self, row: usize) -> Option<String> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(self.cells[start..start + self.width].iter().collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).filter_map(move |r| self.row(r))
    }
}

/// The status line: `Score: <6> Lives: <2> FPS: <1 decimal>`.
pub fn status_line(score: u32, lives: u32, fps: f32) -> String {
    format!("Score: {:6}   Lives: {:2}   FPS: {:.1}", score, lives, fps)
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Draw one full frame of `session` into `screen`.
pub fn compose(session: &Session, fps: f32, screen: &mut Screen) {
    screen.clear();

    draw_status(session, fps, screen);
    draw_shields(session, screen);
    draw_formation(session, screen);
    draw_player(session, screen);
    draw_projectiles(session, screen);
}

/// Overlay the game-over message on the middle of the screen.
pub fn draw_game_over(screen: &mut Screen) {
    let row = screen.height() as i32 / 2;
    let col = (screen.width() as i32 / 2 - 20).max(0);
    screen.put_str(col, row, GAME_OVER_MESSAGE);
}

fn draw_status(session: &Session, fps: f32, screen: &mut Screen) {
    let line = status_line(session.score, session.lives, fps);
    let room = screen.width().saturating_sub(STATUS_COL as usize);
    let line: String = line.chars().take(room).collect();
    screen.put_str(STATUS_COL, 0, &line);
}

fn draw_shields(session: &Session, screen: &mut Screen) {
    for shield in &session.shields {
        for (col, row, glyph) in shield.cells() {
            screen.put(col, row, glyph);
        }
    }
}

fn draw_formation(session: &Session, screen: &mut Screen) {
    let formation = &session.formation;
    for row in 0..formation.rows() {
        for col in 0..formation.cols() {
            if let Some(glyph) = formation.glyph(row, col) {
                let (x, y) = formation.cell_origin(row, col);
                for (k, ch) in glyph.iter().enumerate() {
                    screen.put(x + k as i32, y, *ch);
                }
            }
        }
    }
}

fn draw_player(session: &Session, screen: &mut Screen) {
    let player = &session.player;
    let x = player.col();
    for (k, ch) in PLAYER_GLYPH.chars().enumerate() {
        let ch = if player.hit { PLAYER_HIT_GLYPH } else { ch };
        screen.put(x + k as i32, player.row, ch);
    }
}

fn draw_projectiles(session: &Session, screen: &mut Screen) {
    let shots = std::iter::once(&session.player_shot).chain(session.hostile_shots.iter());
    for shot in shots.filter(|p| p.visible) {
        let (col, row) = shot.cell();
        screen.put(col, row, shot.glyph);
    }
}
