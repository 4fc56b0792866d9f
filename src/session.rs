/// One game, from the first frame to game over.
///
/// `Session` owns every entity of a game and runs the fixed per-frame update
/// order: input → player → player shot → formation motion and fire →
/// hostile shots → explosion and recovery timers → end-of-game check.
/// Restarting builds a fresh `Session`, so nothing leaks between games.

use rand::Rng;

use crate::collision::{advance_hostile_shots, advance_player_shot, ShotOutcome};
use crate::config::GameConfig;
use crate::entities::{PlayerActor, Projectile, ProjectileOwner, ProjectilePool};
use crate::formation::{FireOdds, Formation, Motion};
use crate::input::FrameInput;
use crate::shield::Shield;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The formation came down to the player's row.
    Invaded,
    /// The last life was lost.
    OutOfLives,
}

/// What the frame loop should do after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    GameOver(EndReason),
    /// Exit was requested; leave the program.
    Exit,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub player: PlayerActor,
    pub player_shot: Projectile,
    pub hostile_shots: ProjectilePool,
    pub formation: Formation,
    pub shields: Vec<Shield>,
    pub score: u32,
    pub lives: u32,
    /// Time accumulated towards the next animation tick.
    pub anim_elapsed: f32,
    /// Seconds between animation ticks; shrinks as the formation escalates.
    pub anim_delay: f32,
    pub phase: Phase,
    pub paused: bool,
    pub frame: u64,
    pub end_reason: Option<EndReason>,
}

impl Session {
    /// Fresh game state for `config`.
    pub fn new(config: &GameConfig) -> Self {
        let height = config.screen_height as i32;
        let shields = (0..config.shield_count)
            .map(|i| Shield::new((i as i32 + 1) * config.shield_spacing, height - config.shield_rise))
            .collect();

        log::info!(
            "new session: {}x{} formation, {} lives",
            config.formation_cols,
            config.formation_rows,
            config.lives
        );

        Self {
            config: config.clone(),
            player: PlayerActor::new(config.screen_width, config.player_row(), config.player_speed),
            player_shot: Projectile::new(ProjectileOwner::Player),
            hostile_shots: ProjectilePool::new(config.hostile_pool_size, ProjectileOwner::Hostile),
            formation: Formation::new(
                config.formation_cols,
                config.formation_rows,
                config.formation_origin,
            ),
            shields,
            score: 0,
            lives: config.lives,
            anim_elapsed: 0.0,
            anim_delay: config.anim_delay,
            phase: Phase::Playing,
            paused: false,
            frame: 0,
            end_reason: None,
        }
    }

    /// Throw this game away and start over with the same configuration.
    pub fn restart(&mut self) {
        log::info!("restarting after {} frames with score {}", self.frame, self.score);
        *self = Session::new(&self.config);
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Run one frame of simulation covering `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &FrameInput, rng: &mut impl Rng) -> FrameOutcome {
        if input.exit {
            return FrameOutcome::Exit;
        }
        if let Some(reason) = self.end_reason {
            return FrameOutcome::GameOver(reason);
        }
        if input.pause {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "paused" } else { "resumed" });
        }
        if self.paused {
            return FrameOutcome::Continue;
        }

        let width = self.config.screen_width;

        // ── 1. Animation tick ────────────────────────────────────────────────
        self.anim_elapsed += dt;
        let anim_due = self.anim_elapsed >= self.anim_delay;

        // ── 2. Player ────────────────────────────────────────────────────────
        // Movement stays available while recovering from a hit.
        if input.left {
            self.player.move_left(dt);
        }
        if input.right {
            self.player.move_right(dt, width);
        }

        // ── 3. Player shot ───────────────────────────────────────────────────
        if self.player_shot.visible {
            let outcome = advance_player_shot(
                &mut self.player_shot,
                self.config.player_projectile_speed,
                dt,
                &mut self.shields,
                &mut self.formation,
            );
            match outcome {
                ShotOutcome::Struck { row, col } => {
                    self.score += self.config.hit_bonus;
                    log::debug!("formation cell ({}, {}) struck, score {}", row, col, self.score);
                }
                ShotOutcome::Absorbed { row, col } => {
                    log::trace!("shot absorbed by exploding cell ({}, {})", row, col);
                }
                _ => {}
            }
        } else if input.fire && !self.player.is_recovering() {
            let y = self.config.screen_height as f32 - 2.0;
            self.player_shot.launch(self.player.x + 1.0, y);
        }

        // ── 4. Formation motion & fire ───────────────────────────────────────
        let mut ended = None;
        if self.formation.reaches_row(self.player.row) {
            ended = Some(EndReason::Invaded);
        } else if self.formation.advance(anim_due, width as i32) == Motion::Reversed {
            self.escalate();
        }

        let odds = FireOdds {
            aligned: self.config.aligned_fire_chance,
            stray: self.config.stray_fire_chance,
        };
        self.formation
            .fire_volley(self.player.col(), odds, &mut self.hostile_shots, rng);

        // ── 5. Hostile shots ─────────────────────────────────────────────────
        let report = advance_hostile_shots(
            &mut self.hostile_shots,
            self.config.hostile_projectile_speed,
            dt,
            &mut self.shields,
            &mut self.player,
            self.config.screen_height as i32,
        );
        if report.player_hit {
            self.lives = self.lives.saturating_sub(1);
            log::info!("player hit, {} lives left", self.lives);
            if self.lives == 0 && ended.is_none() {
                ended = Some(EndReason::OutOfLives);
            }
        }

        // ── 6. Timers ────────────────────────────────────────────────────────
        self.formation
            .update_explosion(dt, self.config.explosion_duration);
        self.player
            .update_recovery(dt, self.config.hit_recovery_duration);
        if anim_due {
            self.anim_elapsed = 0.0;
        }
        self.frame += 1;

        // ── 7. End of game ───────────────────────────────────────────────────
        match ended {
            Some(reason) => {
                self.phase = Phase::GameOver;
                self.end_reason = Some(reason);
                log::info!("game over ({:?}) with score {}", reason, self.score);
                FrameOutcome::GameOver(reason)
            }
            None => FrameOutcome::Continue,
        }
    }

    /// Speed up the formation after a reversal.
    ///
    /// Only delays above `escalation_threshold` shrink.
    fn escalate(&mut self) {
        if self.anim_delay > self.config.escalation_threshold {
            self.anim_delay =
                (self.anim_delay - self.config.anim_delay_step).max(self.config.anim_delay_floor);
        }
        log::debug!(
            "formation reversed at {:?}, anim delay {:.2}",
            self.formation.origin(),
            self.anim_delay
        );
    }
}
