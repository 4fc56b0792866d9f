/// Game entities — the player, projectiles and the fixed glyph tables.
///
/// Grids with their own rules (shields, the formation) live in their own
/// modules; this file holds the small actors and the shared constants.

// ── Glyphs ────────────────────────────────────────────────────────────────────

/// Two 3-character animation frames per formation row, indexed by `row % 4`.
pub const FORMATION_GLYPHS: [&str; 4] = ["<o>>o<", "}O{-O-", "[T]]+[", "(+)-x-"];
/// Shield glyph for each strength level, `0..=MAX_STRENGTH`.
pub const SHIELD_GLYPHS: [char; 4] = [' ', '-', '=', '#'];
pub const PLAYER_GLYPH: &str = "<I>";
/// Drawn over every player cell while the player recovers from a hit.
pub const PLAYER_HIT_GLYPH: char = 'X';
pub const EXPLODING_GLYPH: char = 'x';
pub const PLAYER_PROJECTILE_GLYPH: char = '|';
pub const HOSTILE_PROJECTILE_GLYPH: char = '*';
/// Glyph characters a player projectile passes through without scoring.
pub const IGNORABLE_GLYPHS: &str = "*#=- ";

pub const GAME_OVER_MESSAGE: &str = "GAME OVER! Press Spacebar to restart.";

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Width of one formation glyph.
pub const GLYPH_WIDTH: i32 = 3;
/// Columns between the left edges of neighbouring formation cells.
pub const CELL_PITCH: i32 = 6;
/// Screen rows between neighbouring formation rows.
pub const ROW_PITCH: i32 = 2;
pub const PLAYER_WIDTH: i32 = 3;

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerActor {
    /// Left edge, in fractional columns.
    pub x: f32,
    pub row: i32,
    /// Cells per second.
    pub speed: f32,
    pub hit: bool,
    /// Time spent in the current hit-recovery window.
    pub recovery_elapsed: f32,
}

impl PlayerActor {
    /// Centre the player horizontally on `row`.
    pub fn new(screen_width: usize, row: i32, speed: f32) -> Self {
        Self {
            x: (screen_width as f32 - PLAYER_WIDTH as f32) / 2.0,
            row,
            speed,
            hit: false,
            recovery_elapsed: 0.0,
        }
    }

    /// Rounded column of the left edge.
    pub fn col(&self) -> i32 {
        self.x.round() as i32
    }

    pub fn is_recovering(&self) -> bool {
        self.hit
    }

    pub fn move_left(&mut self, dt: f32) {
        let dx = self.speed * dt;
        self.x = if self.x > dx { self.x - dx } else { 0.0 };
    }

    pub fn move_right(&mut self, dt: f32, screen_width: usize) {
        let dx = self.speed * dt;
        let max_x = (screen_width as i32 - PLAYER_WIDTH) as f32;
        self.x = (self.x + dx).min(max_x);
    }

    /// Does column `col` fall under the player's glyph?
    pub fn covers(&self, col: i32) -> bool {
        let left = self.col();
        left <= col && col < left + PLAYER_WIDTH
    }

    /// Enter the hit-recovery window.
    pub fn mark_hit(&mut self) {
        self.hit = true;
        self.recovery_elapsed = 0.0;
    }

    /// Advance the recovery timer. Returns `true` on the frame the window ends.
    pub fn update_recovery(&mut self, dt: f32, duration: f32) -> bool {
        if !self.hit {
            return false;
        }
        self.recovery_elapsed += dt;
        if self.recovery_elapsed >= duration {
            self.hit = false;
            self.recovery_elapsed = 0.0;
            return true;
        }
        false
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Hostile,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub visible: bool,
    pub x: f32,
    pub y: f32,
    pub glyph: char,
    pub owner: ProjectileOwner,
}

impl Projectile {
    /// An idle slot for `owner`.
    pub fn new(owner: ProjectileOwner) -> Self {
        let glyph = match owner {
            ProjectileOwner::Player => PLAYER_PROJECTILE_GLYPH,
            ProjectileOwner::Hostile => HOSTILE_PROJECTILE_GLYPH,
        };
        Self { visible: false, x: 0.0, y: 0.0, glyph, owner }
    }

    pub fn launch(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.visible = true;
    }

    pub fn retire(&mut self) {
        self.visible = false;
    }

    /// Rounded screen cell as `(col, row)`.
    pub fn cell(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Fixed set of hostile projectile slots.
#[derive(Clone, Debug)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(capacity: usize, owner: ProjectileOwner) -> Self {
        Self { slots: vec![Projectile::new(owner); capacity] }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Launch from the first idle slot. Returns `false` when every slot is busy.
    pub fn launch(&mut self, x: f32, y: f32) -> bool {
        match self.slots.iter_mut().find(|p| !p.visible) {
            Some(slot) => {
                slot.launch(x, y);
                true
            }
            None => false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.visible).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.slots.iter_mut()
    }
}
