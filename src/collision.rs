/// Projectile motion and collision resolution.
///
/// Shields are always tested before actors, so cover standing in the same
/// cell as a target wins.

use crate::entities::{PlayerActor, Projectile, ProjectilePool};
use crate::formation::Formation;
use crate::shield::Shield;

/// Result of moving the player projectile for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    /// No projectile in flight.
    Idle,
    InFlight,
    /// Absorbed by a shield.
    Blocked,
    /// Left the top of the playfield.
    Missed,
    /// Struck the formation cell `(row, col)`, which is now exploding.
    Struck { row: usize, col: usize },
    /// Swallowed by a cell that is already exploding; no score.
    Absorbed { row: usize, col: usize },
}

/// Tally of the hostile projectiles resolved on one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VolleyReport {
    pub blocked: usize,
    pub missed: usize,
    pub player_hit: bool,
}

fn hits_any_shield(shields: &mut [Shield], col: i32, row: i32) -> bool {
    shields.iter_mut().any(|s| s.hit(col, row))
}

/// Move the player projectile up by `speed * dt` and resolve what it hit.
pub fn advance_player_shot(
    shot: &mut Projectile,
    speed: f32,
    dt: f32,
    shields: &mut [Shield],
    formation: &mut Formation,
) -> ShotOutcome {
    if !shot.visible {
        return ShotOutcome::Idle;
    }
    shot.y -= speed * dt;
    let (col, row) = shot.cell();

    if hits_any_shield(shields, col, row) {
        shot.retire();
        return ShotOutcome::Blocked;
    }
    if row <= 0 {
        shot.retire();
        return ShotOutcome::Missed;
    }
    // The shot strikes a glyph from below, one row ahead of itself.
    match formation.cell_at(col, row - 1) {
        Some((r, c)) => {
            shot.retire();
            if formation.strike(r, c) {
                ShotOutcome::Struck { row: r, col: c }
            } else {
                ShotOutcome::Absorbed { row: r, col: c }
            }
        }
        None => ShotOutcome::InFlight,
    }
}

/// Move every hostile projectile down by `speed * dt` and resolve hits.
///
/// A projectile at or below the player's row that falls under the player's
/// glyph marks the player hit, unless the player is already recovering. At
/// most one hit lands per frame since the first one starts the recovery
/// window. Projectiles reaching `floor_row` are discarded.
pub fn advance_hostile_shots(
    pool: &mut ProjectilePool,
    speed: f32,
    dt: f32,
    shields: &mut [Shield],
    player: &mut PlayerActor,
    floor_row: i32,
) -> VolleyReport {
    let mut report = VolleyReport::default();
    for shot in pool.iter_mut().filter(|p| p.visible) {
        shot.y += speed * dt;
        let (col, row) = shot.cell();

        if hits_any_shield(shields, col, row) {
            shot.retire();
            report.blocked += 1;
        } else if !player.is_recovering() && row >= player.row && player.covers(col) {
            player.mark_hit();
            shot.retire();
            report.player_hit = true;
        } else if row >= floor_row {
            shot.retire();
            report.missed += 1;
        }
    }
    report
}
