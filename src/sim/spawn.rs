//! Spawn point selection
//!
//! Rejection sampling inside an inset rectangle, capped so a hostile layout
//! can never stall a tick.

use glam::Vec2;
use rand::Rng;

use super::world::Arena;

/// Rectangle spawn points are drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnRegion {
    /// The arena shrunk by `margin` on every side
    pub fn inset(arena: &Arena, margin: f32) -> Self {
        Self {
            min: Vec2::splat(margin),
            max: Vec2::new(arena.width - margin, arena.height - margin),
        }
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            self.max,
        ]
    }

    /// Corner farthest from `p`
    pub fn farthest_corner(&self, p: Vec2) -> Vec2 {
        let mut best = self.min;
        for corner in self.corners() {
            if corner.distance_squared(p) > best.distance_squared(p) {
                best = corner;
            }
        }
        best
    }
}

/// Sample a point in `region` at least `min_distance` from `avoid`.
///
/// Falls back to the region corner farthest from `avoid` after `max_attempts`
/// rejected samples.
pub fn sample_spawn_point<R: Rng>(
    rng: &mut R,
    region: &SpawnRegion,
    avoid: Vec2,
    min_distance: f32,
    max_attempts: u32,
) -> Vec2 {
    for _ in 0..max_attempts {
        let candidate = Vec2::new(
            sample_axis(rng, region.min.x, region.max.x),
            sample_axis(rng, region.min.y, region.max.y),
        );
        if candidate.distance(avoid) >= min_distance {
            return candidate;
        }
    }

    let fallback = region.farthest_corner(avoid);
    log::warn!(
        "No spawn point {} from ({:.1}, {:.1}) after {} attempts, using corner ({:.1}, {:.1})",
        min_distance,
        avoid.x,
        avoid.y,
        max_attempts,
        fallback.x,
        fallback.y
    );
    fallback
}

fn sample_axis<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_respects_min_distance() {
        let arena = Arena::new(800.0, 600.0);
        let region = SpawnRegion::inset(&arena, 50.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let avoid = Vec2::new(400.0, 300.0);

        for _ in 0..200 {
            let p = sample_spawn_point(&mut rng, &region, avoid, 100.0, 100);
            assert!(p.distance(avoid) >= 100.0);
            assert!(p.x >= 50.0 && p.x <= 750.0);
            assert!(p.y >= 50.0 && p.y <= 550.0);
        }
    }

    #[test]
    fn test_falls_back_to_farthest_corner() {
        let arena = Arena::new(800.0, 600.0);
        let region = SpawnRegion::inset(&arena, 50.0);
        let mut rng = Pcg32::seed_from_u64(3);

        // Nothing in the region is 10_000 away
        let p = sample_spawn_point(&mut rng, &region, Vec2::new(100.0, 80.0), 10_000.0, 100);
        assert_eq!(p, Vec2::new(750.0, 550.0));
    }

    #[test]
    fn test_zero_attempts_goes_straight_to_corner() {
        let arena = Arena::new(800.0, 600.0);
        let region = SpawnRegion::inset(&arena, 50.0);
        let mut rng = Pcg32::seed_from_u64(9);
        let p = sample_spawn_point(&mut rng, &region, Vec2::new(700.0, 500.0), 100.0, 0);
        assert_eq!(p, Vec2::new(50.0, 50.0));
    }
}
