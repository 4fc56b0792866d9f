/// Tunables for a game session.
///
/// `GameConfig::default()` reproduces the classic console layout: a 120×30
/// screen, a 10×4 formation starting at (2, 2) and three shields.

use crate::entities::{CELL_PITCH, GAME_OVER_MESSAGE, PLAYER_WIDTH, ROW_PITCH};
use crate::error::{GameError, Result};
use crate::shield::{SHIELD_HEIGHT, SHIELD_LENGTH};

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: usize,
    pub screen_height: usize,

    pub formation_cols: usize,
    pub formation_rows: usize,
    /// Top-left screen cell of formation cell (0, 0) at session start.
    pub formation_origin: (i32, i32),

    pub shield_count: usize,
    /// Shield `i` sits at column `(i + 1) * shield_spacing`.
    pub shield_spacing: i32,
    /// Shields sit this many rows above the bottom of the screen.
    pub shield_rise: i32,

    pub lives: u32,
    /// Player speed in cells per second.
    pub player_speed: f32,
    /// Upward speed of the player projectile in rows per second.
    pub player_projectile_speed: f32,
    /// Downward speed of hostile projectiles in rows per second.
    pub hostile_projectile_speed: f32,
    pub hostile_pool_size: usize,

    // ── Animation & escalation ───────────────────────────────────────────────
    /// Seconds between animation ticks at session start.
    pub anim_delay: f32,
    /// Amount taken off the delay on each formation reversal.
    pub anim_delay_step: f32,
    /// The delay never drops below this.
    pub anim_delay_floor: f32,
    /// Reversals only escalate while the delay exceeds this value.
    pub escalation_threshold: f32,

    // ── Timers ───────────────────────────────────────────────────────────────
    pub explosion_duration: f32,
    pub hit_recovery_duration: f32,

    // ── Hostile fire ─────────────────────────────────────────────────────────
    /// Per-frame fire chance of a cell lined up with the player.
    pub aligned_fire_chance: f32,
    /// Per-frame fire chance of any other live cell.
    pub stray_fire_chance: f32,

    pub hit_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 120,
            screen_height: 30,
            formation_cols: 10,
            formation_rows: 4,
            formation_origin: (2, 2),
            shield_count: 3,
            shield_spacing: 30,
            shield_rise: 6,
            lives: 3,
            player_speed: 12.0,
            player_projectile_speed: 20.0,
            hostile_projectile_speed: 20.0,
            hostile_pool_size: 5,
            anim_delay: 0.35,
            anim_delay_step: 0.05,
            anim_delay_floor: 0.05,
            escalation_threshold: 10.0,
            explosion_duration: 0.6,
            hit_recovery_duration: 1.0,
            aligned_fire_chance: 0.20,
            stray_fire_chance: 0.02,
            hit_bonus: 100,
        }
    }
}

impl GameConfig {
    /// Row the player occupies: the last row of the screen.
    pub fn player_row(&self) -> i32 {
        self.screen_height as i32 - 1
    }

    /// Reject geometries that would place anything outside the screen.
    pub fn validate(&self) -> Result<()> {
        let width = self.screen_width as i32;
        let height = self.screen_height as i32;

        if width < GAME_OVER_MESSAGE.len() as i32 + 4 {
            return Err(GameError::Config(format!(
                "screen width {} is too narrow for the status and game-over lines",
                width
            )));
        }
        if self.formation_cols == 0 || self.formation_rows == 0 {
            return Err(GameError::Config("formation must have at least one cell".into()));
        }

        let (ox, oy) = self.formation_origin;
        let span = self.formation_cols as i32 * CELL_PITCH;
        if ox < 1 || ox + span >= width {
            return Err(GameError::Config(format!(
                "formation spanning {} columns from x={} does not fit a {}-wide screen",
                span, ox, width
            )));
        }
        // Status line owns row 0.
        let lower_edge = oy + ROW_PITCH * (self.formation_rows as i32 - 1);
        if oy < 1 || lower_edge >= self.player_row() {
            return Err(GameError::Config(format!(
                "formation rows {}..={} overlap the status line or the player row",
                oy, lower_edge
            )));
        }

        let shield_top = height - self.shield_rise;
        if self.shield_count > 0 {
            let last_right =
                self.shield_count as i32 * self.shield_spacing + SHIELD_LENGTH as i32;
            if self.shield_spacing < 0 || last_right > width {
                return Err(GameError::Config(format!(
                    "{} shields spaced {} apart overflow a {}-wide screen",
                    self.shield_count, self.shield_spacing, width
                )));
            }
            if shield_top <= lower_edge || shield_top + SHIELD_HEIGHT as i32 > self.player_row() {
                return Err(GameError::Config(format!(
                    "shields at row {} do not fit between formation and player",
                    shield_top
                )));
            }
        }

        if width < PLAYER_WIDTH + 1 {
            return Err(GameError::Config("screen too narrow for the player".into()));
        }
        if self.hostile_pool_size == 0 {
            return Err(GameError::Config("hostile projectile pool cannot be empty".into()));
        }
        if self.anim_delay <= 0.0 || self.anim_delay_floor <= 0.0 {
            return Err(GameError::Config("animation delay must be positive".into()));
        }
        for (name, chance) in [
            ("aligned_fire_chance", self.aligned_fire_chance),
            ("stray_fire_chance", self.stray_fire_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(GameError::Config(format!("{} must be within 0..=1", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert_eq!(GameConfig::default().player_row(), 29);
    }

    #[test]
    fn narrow_screen_is_rejected() {
        let config = GameConfig { screen_width: 50, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn short_screen_is_rejected() {
        let config = GameConfig { screen_height: 10, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }
}
