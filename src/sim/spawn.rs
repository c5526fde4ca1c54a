//! Rejection-sampling spawn placement
//!
//! Obstacles and items are dropped onto the arena by sampling uniformly
//! random top-left corners and rejecting any that overlap an exclusion zone
//! or an earlier acceptance. The attempt budget is shared across one call;
//! exhausting it is a degraded success (fewer rects, or no item), never an
//! error.

use glam::IVec2;
use rand::Rng;

use super::geometry::{Rect, any_overlap};
use crate::consts::MAX_PLACEMENT_ATTEMPTS;

/// Place up to `count` non-overlapping squares of side `size` inside
/// `bounds`, shrunk by `margin` on every edge.
///
/// Returns fewer than `count` rects if the attempt budget runs out before
/// the arena yields enough free space.
pub fn place_non_overlapping<R: Rng>(
    rng: &mut R,
    count: usize,
    size: i32,
    exclusions: &[Rect],
    bounds: IVec2,
    margin: i32,
) -> Vec<Rect> {
    let mut placed: Vec<Rect> = Vec::with_capacity(count);
    let max_x = bounds.x - size - margin;
    let max_y = bounds.y - size - margin;
    if max_x < margin || max_y < margin {
        // Arena too small to hold even one rect
        return placed;
    }

    let mut attempts = 0;
    while placed.len() < count && attempts < MAX_PLACEMENT_ATTEMPTS {
        attempts += 1;
        let candidate = Rect::square(
            IVec2::new(
                rng.random_range(margin..=max_x),
                rng.random_range(margin..=max_y),
            ),
            size,
        );
        if any_overlap(&candidate, exclusions) || any_overlap(&candidate, &placed) {
            continue;
        }
        placed.push(candidate);
    }

    if placed.len() < count {
        log::debug!(
            "placement budget exhausted: {} of {} rects placed",
            placed.len(),
            count
        );
    }
    placed
}

/// Place a single square avoiding `exclusions`, or `None` if the attempt
/// budget runs out (the item stays absent).
pub fn place_one<R: Rng>(
    rng: &mut R,
    size: i32,
    exclusions: &[Rect],
    bounds: IVec2,
) -> Option<Rect> {
    place_non_overlapping(rng, 1, size, exclusions, bounds, 0)
        .into_iter()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: IVec2 = IVec2::new(800, 600);

    #[test]
    fn places_exactly_the_requested_count_when_room_allows() {
        let mut rng = Pcg32::seed_from_u64(7);
        let placed = place_non_overlapping(&mut rng, 10, 60, &[], BOUNDS, 0);
        assert_eq!(placed.len(), 10);
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn respects_margin_and_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let margin = 40;
        let placed = place_non_overlapping(&mut rng, 8, 60, &[], BOUNDS, margin);
        for r in &placed {
            assert!(r.pos.x >= margin && r.pos.x + r.size.x <= BOUNDS.x - margin);
            assert!(r.pos.y >= margin && r.pos.y + r.size.y <= BOUNDS.y - margin);
        }
    }

    #[test]
    fn avoids_exclusion_zones() {
        let mut rng = Pcg32::seed_from_u64(13);
        let reserved = [Rect::new(200, 300, 60, 60), Rect::new(600, 300, 60, 60)];
        let placed = place_non_overlapping(&mut rng, 12, 60, &reserved, BOUNDS, 0);
        for r in &placed {
            assert!(!any_overlap(r, &reserved));
        }
    }

    #[test]
    fn terminates_with_fewer_rects_when_arena_is_too_small() {
        let mut rng = Pcg32::seed_from_u64(17);
        // A 100x100 arena holds at most a couple of 60px squares
        let placed = place_non_overlapping(&mut rng, 10, 60, &[], IVec2::new(100, 100), 0);
        assert!(placed.len() < 10);
    }

    #[test]
    fn returns_empty_when_nothing_can_fit() {
        let mut rng = Pcg32::seed_from_u64(19);
        let placed = place_non_overlapping(&mut rng, 3, 60, &[], IVec2::new(50, 50), 0);
        assert!(placed.is_empty());
    }

    #[test]
    fn place_one_returns_none_when_fully_excluded() {
        let mut rng = Pcg32::seed_from_u64(23);
        // One exclusion covering the entire arena
        let wall = [Rect::new(0, 0, BOUNDS.x, BOUNDS.y)];
        assert!(place_one(&mut rng, 20, &wall, BOUNDS).is_none());
    }

    #[test]
    fn place_one_avoids_obstacles() {
        let mut rng = Pcg32::seed_from_u64(29);
        let obstacles = [Rect::new(0, 0, 400, 600)];
        let item = place_one(&mut rng, 20, &obstacles, BOUNDS).expect("right half is free");
        assert!(!any_overlap(&item, &obstacles));
    }

    proptest! {
        #[test]
        fn placements_always_land_inside_bounds(seed in 0u64..1000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let placed = place_non_overlapping(&mut rng, 6, 60, &[], BOUNDS, 0);
            for r in &placed {
                prop_assert!(r.pos.x >= 0 && r.pos.x + r.size.x <= BOUNDS.x);
                prop_assert!(r.pos.y >= 0 && r.pos.y + r.size.y <= BOUNDS.y);
            }
        }
    }
}
