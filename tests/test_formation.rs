use console_invaders::entities::{ProjectileOwner, ProjectilePool};
use console_invaders::formation::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn standard() -> Formation {
    Formation::new(10, 4, (2, 2))
}

// ── construction ──────────────────────────────────────────────────────────────

#[test]
fn new_formation_is_all_alive() {
    let f = standard();
    assert_eq!(f.alive_count(), 40);
    assert_eq!(f.origin(), (2, 2));
    assert_eq!(f.direction(), 1);
    assert_eq!(f.exploding(), None);
    assert_eq!(f.cell(3, 9), Some(CellState::Alive));
}

#[test]
fn cell_origin_uses_pitch() {
    let f = standard();
    assert_eq!(f.cell_origin(0, 0), (2, 2));
    assert_eq!(f.cell_origin(1, 3), (20, 4));
    assert_eq!(f.lower_edge(), 8);
}

// ── motion ────────────────────────────────────────────────────────────────────

#[test]
fn no_motion_between_ticks() {
    let mut f = standard();
    assert_eq!(f.advance(false, 120), Motion::Idle);
    assert_eq!(f.origin(), (2, 2));
}

#[test]
fn steps_along_direction_on_tick() {
    let mut f = standard();
    assert_eq!(f.advance(true, 120), Motion::Stepped);
    assert_eq!(f.origin(), (3, 2));
}

#[test]
fn right_edge_reverses_and_drops() {
    let mut f = Formation::new(10, 4, (60, 2));
    assert_eq!(f.advance(true, 120), Motion::Reversed);
    assert_eq!(f.direction(), -1);
    assert_eq!(f.origin(), (59, 3));

    // Next tick walks left
    assert_eq!(f.advance(true, 120), Motion::Stepped);
    assert_eq!(f.origin(), (58, 3));
}

#[test]
fn left_edge_reverses_and_drops() {
    let mut f = Formation::new(10, 4, (60, 2));
    f.advance(true, 120); // now heading left from x=59
    for _ in 0..59 {
        assert_eq!(f.advance(true, 120), Motion::Stepped);
    }
    assert_eq!(f.origin(), (0, 3));
    assert_eq!(f.advance(true, 120), Motion::Reversed);
    assert_eq!(f.direction(), 1);
    assert_eq!(f.origin(), (1, 4));
}

#[test]
fn reaches_row_uses_lowest_row() {
    let f = Formation::new(10, 4, (2, 22));
    assert!(!f.reaches_row(29));
    let f = Formation::new(10, 4, (2, 23));
    assert!(f.reaches_row(29));
}

// ── hits ──────────────────────────────────────────────────────────────────────

#[test]
fn cell_at_maps_glyph_columns() {
    let f = standard();
    assert_eq!(f.cell_at(2, 2), Some((0, 0)));
    assert_eq!(f.cell_at(4, 2), Some((0, 0)));
    assert_eq!(f.cell_at(56, 8), Some((3, 9)));
    assert_eq!(f.cell_at(1, 2), None);
    assert_eq!(f.cell_at(2, 1), None);
    assert_eq!(f.cell_at(2, 10), None);
}

#[test]
fn ignorable_glyph_characters_do_not_count() {
    let mut f = standard();
    f.advance(true, 120); // frame offset 3, origin (3, 2)
    // Row 3 shows "-x-" on this frame
    let (x, y) = f.cell_origin(3, 0);
    assert_eq!(f.glyph(3, 0), Some(['-', 'x', '-']));
    assert_eq!(f.cell_at(x, y), None);
    assert_eq!(f.cell_at(x + 1, y), Some((3, 0)));
    assert_eq!(f.cell_at(x + 2, y), None);
}

#[test]
fn strike_starts_explosion() {
    let mut f = standard();
    assert!(f.strike(0, 0));
    assert_eq!(f.cell(0, 0), Some(CellState::Exploding));
    assert_eq!(f.exploding(), Some((0, 0)));
    assert_eq!(f.glyph(0, 0), Some(['x', 'x', 'x']));
    assert_eq!(f.alive_count(), 39);
}

#[test]
fn exploding_cells_still_occupy_their_glyph() {
    let mut f = standard();
    f.strike(0, 0);
    assert_eq!(f.cell_at(2, 2), Some((0, 0)));
    assert_eq!(f.cell_at(4, 2), Some((0, 0)));
}

#[test]
fn strike_refuses_non_alive_cells() {
    let mut f = standard();
    assert!(f.strike(0, 0));
    assert!(!f.strike(0, 0));
    assert!(!f.strike(4, 0)); // out of grid
    f.update_explosion(1.0, 0.6);
    assert!(!f.strike(0, 0));
}

#[test]
fn explosion_ends_after_duration() {
    let mut f = standard();
    f.strike(1, 2);
    assert_eq!(f.update_explosion(0.5, 0.6), None);
    assert_eq!(f.cell(1, 2), Some(CellState::Exploding));
    assert_eq!(f.update_explosion(0.2, 0.6), Some((1, 2)));
    assert_eq!(f.cell(1, 2), Some(CellState::Dead));
    assert_eq!(f.exploding(), None);
    assert_eq!(f.glyph(1, 2), None);
    assert_eq!(f.cell_at(14, 4), None);
}

#[test]
fn second_strike_finishes_the_first_explosion() {
    let mut f = standard();
    f.strike(0, 0);
    f.strike(0, 1);
    assert_eq!(f.cell(0, 0), Some(CellState::Dead));
    assert_eq!(f.cell(0, 1), Some(CellState::Exploding));
    assert_eq!(f.exploding(), Some((0, 1)));
}

#[test]
fn update_explosion_without_exploding_cell_is_noop() {
    let mut f = standard();
    assert_eq!(f.update_explosion(5.0, 0.6), None);
    assert_eq!(f.alive_count(), 40);
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn certain_fire_fills_the_pool_and_drops_the_rest() {
    let f = standard();
    let mut pool = ProjectilePool::new(5, ProjectileOwner::Hostile);
    let odds = FireOdds { aligned: 1.0, stray: 1.0 };
    assert_eq!(f.fire_volley(-100, odds, &mut pool, &mut seeded_rng()), 5);
    assert_eq!(pool.active_count(), 5);
}

#[test]
fn zero_odds_never_fire() {
    let f = standard();
    let mut pool = ProjectilePool::new(5, ProjectileOwner::Hostile);
    let odds = FireOdds { aligned: 0.0, stray: 0.0 };
    let mut rng = seeded_rng();
    for _ in 0..100 {
        assert_eq!(f.fire_volley(20, odds, &mut pool, &mut rng), 0);
    }
}

#[test]
fn aligned_column_fires_from_below_each_cell() {
    let f = standard();
    let mut pool = ProjectilePool::new(5, ProjectileOwner::Hostile);
    let odds = FireOdds { aligned: 1.0, stray: 0.0 };
    // Column 3 starts at x = 2 + 18
    assert_eq!(f.fire_volley(20, odds, &mut pool, &mut seeded_rng()), 4);

    let shots: Vec<(f32, f32)> = pool.iter().filter(|p| p.visible).map(|p| (p.x, p.y)).collect();
    assert_eq!(shots, vec![(21.0, 3.0), (21.0, 5.0), (21.0, 7.0), (21.0, 9.0)]);
}

#[test]
fn dead_cells_never_fire() {
    let mut f = Formation::new(2, 1, (2, 2));
    f.strike(0, 0);
    f.strike(0, 1);
    f.update_explosion(1.0, 0.6);
    assert_eq!(f.alive_count(), 0);

    let mut pool = ProjectilePool::new(5, ProjectileOwner::Hostile);
    let odds = FireOdds { aligned: 1.0, stray: 1.0 };
    assert_eq!(f.fire_volley(2, odds, &mut pool, &mut seeded_rng()), 0);
}
