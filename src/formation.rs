/// The hostile formation: a W×H block that marches sideways, drops a row at
/// each screen edge and fires at the player.

use rand::Rng;

use crate::entities::{
    ProjectilePool, CELL_PITCH, EXPLODING_GLYPH, FORMATION_GLYPHS, GLYPH_WIDTH, IGNORABLE_GLYPHS,
    ROW_PITCH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Alive,
    Exploding,
    Dead,
}

/// What the block did on a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Not an animation tick.
    Idle,
    /// Shifted one column along `direction`.
    Stepped,
    /// Touched an edge: direction flipped and the block dropped a row.
    Reversed,
}

/// Per-frame fire chances for live cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireOdds {
    pub aligned: f32,
    pub stray: f32,
}

#[derive(Clone, Debug)]
pub struct Formation {
    cols: usize,
    rows: usize,
    x: i32,
    y: i32,
    direction: i32,
    /// Row-major, `row * cols + col`.
    cells: Vec<CellState>,
    exploding: Option<(usize, usize)>,
    explosion_elapsed: f32,
    /// Offset of the current animation frame in `FORMATION_GLYPHS`: 0 or 3.
    frame_offset: usize,
}

impl Formation {
    /// A fully alive block with cell (0, 0) at screen `origin`, moving right.
    pub fn new(cols: usize, rows: usize, origin: (i32, i32)) -> Self {
        Self {
            cols,
            rows,
            x: origin.0,
            y: origin.1,
            direction: 1,
            cells: vec![CellState::Alive; cols * rows],
            exploding: None,
            explosion_elapsed: 0.0,
            frame_offset: 0,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn frame_offset(&self) -> usize {
        self.frame_offset
    }

    pub fn exploding(&self) -> Option<(usize, usize)> {
        self.exploding
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellState::Alive).count()
    }

    /// Screen position `(col, row)` of the left glyph character of a cell.
    pub fn cell_origin(&self, row: usize, col: usize) -> (i32, i32) {
        (self.x + CELL_PITCH * col as i32, self.y + ROW_PITCH * row as i32)
    }

    /// Screen row of the lowest formation row.
    pub fn lower_edge(&self) -> i32 {
        self.y + ROW_PITCH * (self.rows as i32 - 1)
    }

    /// Has the block come down to `row`?
    pub fn reaches_row(&self, row: i32) -> bool {
        self.lower_edge() >= row
    }

    /// The three glyph characters drawn for a cell, `None` when dead.
    pub fn glyph(&self, row: usize, col: usize) -> Option<[char; 3]> {
        match self.cell(row, col)? {
            CellState::Alive => {
                let frames = FORMATION_GLYPHS[row % FORMATION_GLYPHS.len()].as_bytes();
                let f = &frames[self.frame_offset..self.frame_offset + 3];
                Some([f[0] as char, f[1] as char, f[2] as char])
            }
            CellState::Exploding => Some([EXPLODING_GLYPH; 3]),
            CellState::Dead => None,
        }
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    /// Move the block if this frame is an animation tick.
    ///
    /// At the right bound the block is nudged one column left, at the left
    /// bound one column right; both flip the direction and drop one row.
    pub fn advance(&mut self, anim_due: bool, screen_width: i32) -> Motion {
        if !anim_due {
            return Motion::Idle;
        }
        self.frame_offset = if self.frame_offset == 3 { 0 } else { 3 };

        if self.x + CELL_PITCH * self.cols as i32 >= screen_width {
            self.direction = -self.direction;
            self.y += 1;
            self.x -= 1;
            Motion::Reversed
        } else if self.x <= 0 {
            self.direction = -self.direction;
            self.y += 1;
            self.x += 1;
            Motion::Reversed
        } else {
            self.x += self.direction;
            Motion::Stepped
        }
    }

    // ── Hits & explosions ────────────────────────────────────────────────────

    /// Find the cell whose glyph occupies screen `(col, row)`.
    ///
    /// Alive and exploding cells both occupy their glyph; dead cells do not.
    /// Glyph characters in `IGNORABLE_GLYPHS` do not count as a hit.
    pub fn cell_at(&self, col: i32, row: i32) -> Option<(usize, usize)> {
        let dr = row - self.y;
        if dr < 0 || dr % ROW_PITCH != 0 {
            return None;
        }
        let r = (dr / ROW_PITCH) as usize;
        let dc = col - self.x;
        if dc < 0 || dc % CELL_PITCH >= GLYPH_WIDTH {
            return None;
        }
        let c = (dc / CELL_PITCH) as usize;
        // Dead cells have no glyph.
        let glyph = self.glyph(r, c)?;
        let ch = glyph[(dc % CELL_PITCH) as usize];
        (!IGNORABLE_GLYPHS.contains(ch)).then_some((r, c))
    }

    /// Start a live cell exploding. Returns `false` if the cell is not alive.
    ///
    /// A cell still exploding from an earlier strike is finished off first.
    pub fn strike(&mut self, row: usize, col: usize) -> bool {
        let Some(i) = self.index(row, col) else {
            return false;
        };
        if self.cells[i] != CellState::Alive {
            return false;
        }
        if let Some((r, c)) = self.exploding.take() {
            let prev = r * self.cols + c;
            self.cells[prev] = CellState::Dead;
        }
        self.cells[i] = CellState::Exploding;
        self.exploding = Some((row, col));
        self.explosion_elapsed = 0.0;
        true
    }

    /// Accumulate explosion time; the exploding cell dies once `duration` has
    /// passed. Returns the cell that just died, if any.
    pub fn update_explosion(&mut self, dt: f32, duration: f32) -> Option<(usize, usize)> {
        let (r, c) = self.exploding?;
        self.explosion_elapsed += dt;
        if self.explosion_elapsed < duration {
            return None;
        }
        self.cells[r * self.cols + c] = CellState::Dead;
        self.exploding = None;
        self.explosion_elapsed = 0.0;
        Some((r, c))
    }

    // ── Firing ────────────────────────────────────────────────────────────────

    /// Every live cell rolls once to fire. Cells whose column lines up with
    /// `player_col` use the aligned chance. Shots that find the pool full
    /// are dropped. Returns how many shots were launched.
    pub fn fire_volley(
        &self,
        player_col: i32,
        odds: FireOdds,
        pool: &mut ProjectilePool,
        rng: &mut impl Rng,
    ) -> usize {
        let mut launched = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.cells[row * self.cols + col] != CellState::Alive {
                    continue;
                }
                let (x, y) = self.cell_origin(row, col);
                let chance = if x == player_col { odds.aligned } else { odds.stray };
                let roll: f32 = rng.gen();
                if roll < chance && pool.launch((x + 1) as f32, (y + 1) as f32) {
                    launched += 1;
                }
            }
        }
        launched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_frames_alternate_on_ticks() {
        let mut f = Formation::new(10, 4, (2, 2));
        assert_eq!(f.glyph(0, 0), Some(['<', 'o', '>']));
        f.advance(true, 120);
        assert_eq!(f.glyph(0, 0), Some(['>', 'o', '<']));
        f.advance(false, 120);
        assert_eq!(f.glyph(0, 0), Some(['>', 'o', '<']));
        f.advance(true, 120);
        assert_eq!(f.glyph(1, 3), Some(['}', 'O', '{']));
    }

    #[test]
    fn out_of_grid_cells_are_none() {
        let f = Formation::new(10, 4, (2, 2));
        assert_eq!(f.cell(4, 0), None);
        assert_eq!(f.cell(0, 10), None);
        assert_eq!(f.glyph(9, 9), None);
    }

    #[test]
    fn gap_between_cells_is_not_a_hit() {
        let f = Formation::new(10, 4, (2, 2));
        // columns 5..=7 sit between cell 0 and cell 1
        assert_eq!(f.cell_at(5, 2), None);
        // odd rows sit between formation rows
        assert_eq!(f.cell_at(3, 3), None);
        assert_eq!(f.cell_at(8, 2), Some((0, 1)));
    }
}
