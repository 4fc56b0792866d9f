/// Destructible cover.

use crate::entities::SHIELD_GLYPHS;

pub const SHIELD_LENGTH: usize = 8;
pub const SHIELD_HEIGHT: usize = 3;
pub const MAX_STRENGTH: u8 = 3;

/// An 8×3 block of cells that each absorb `MAX_STRENGTH` hits.
#[derive(Clone, Debug, PartialEq)]
pub struct Shield {
    x: i32,
    y: i32,
    /// Row-major, `row * SHIELD_LENGTH + col`.
    strength: [u8; SHIELD_LENGTH * SHIELD_HEIGHT],
}

impl Shield {
    /// A full-strength shield whose top-left cell is at screen `(x, y)`.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, strength: [MAX_STRENGTH; SHIELD_LENGTH * SHIELD_HEIGHT] }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn index(row: usize, col: usize) -> Option<usize> {
        (row < SHIELD_HEIGHT && col < SHIELD_LENGTH).then(|| row * SHIELD_LENGTH + col)
    }

    /// Strength of the shield-local cell, `None` outside the shield.
    pub fn strength(&self, row: usize, col: usize) -> Option<u8> {
        Self::index(row, col).map(|i| self.strength[i])
    }

    /// Map a screen cell to the shield-local `(row, col)`.
    fn local(&self, col: i32, row: i32) -> Option<(usize, usize)> {
        let dc = col - self.x;
        let dr = row - self.y;
        if dc < 0 || dr < 0 {
            return None;
        }
        let (dr, dc) = (dr as usize, dc as usize);
        (dr < SHIELD_HEIGHT && dc < SHIELD_LENGTH).then_some((dr, dc))
    }

    /// Damage the cell at screen `(col, row)`.
    ///
    /// Returns `true` only if the cell is inside the shield and still had
    /// strength left; that cell loses one point. A depleted cell or a miss
    /// returns `false` and changes nothing.
    pub fn hit(&mut self, col: i32, row: i32) -> bool {
        let Some((r, c)) = self.local(col, row) else {
            return false;
        };
        let cell = &mut self.strength[r * SHIELD_LENGTH + c];
        if *cell > 0 {
            *cell -= 1;
            true
        } else {
            false
        }
    }

    /// Glyph for the shield-local cell.
    pub fn glyph(&self, row: usize, col: usize) -> Option<char> {
        self.strength(row, col).map(|s| SHIELD_GLYPHS[s as usize])
    }

    /// Sum of all cell strengths.
    pub fn total_strength(&self) -> u32 {
        self.strength.iter().map(|&s| s as u32).sum()
    }

    /// Every cell as `(screen_col, screen_row, glyph)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, char)> + '_ {
        (0..SHIELD_HEIGHT).flat_map(move |row| {
            (0..SHIELD_LENGTH).map(move |col| {
                let s = self.strength[row * SHIELD_LENGTH + col];
                (self.x + col as i32, self.y + row as i32, SHIELD_GLYPHS[s as usize])
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_shield_is_full_strength() {
        let s = Shield::new(30, 24);
        assert_eq!(s.total_strength(), (SHIELD_LENGTH * SHIELD_HEIGHT) as u32 * 3);
        assert_eq!(s.glyph(0, 0), Some('#'));
        assert_eq!(s.strength(3, 0), None);
    }

    #[test]
    fn cells_cover_the_rectangle() {
        let s = Shield::new(30, 24);
        let cells: Vec<_> = s.cells().collect();
        assert_eq!(cells.len(), 24);
        assert_eq!(cells[0], (30, 24, '#'));
        assert_eq!(cells[23], (37, 26, '#'));
    }
}
