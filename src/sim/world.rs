//! Arena bounds and static walls

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Axis-aligned rectangle, immutable after match start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Wall {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The playable rectangle `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.arena_width, tuning.arena_height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strict interior test; points on the border count as outside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height
    }

    /// Clamp an entity center so it stays `half_size` away from every edge
    pub fn clamp(&self, p: Vec2, half_size: f32) -> Vec2 {
        Vec2::new(
            p.x.clamp(half_size, self.width - half_size),
            p.y.clamp(half_size, self.height - half_size),
        )
    }

    /// Border walls followed by the interior obstacles.
    ///
    /// Only the border matters for gameplay (via [`Arena::clamp`]); obstacles
    /// are drawn but never block movement or projectiles.
    pub fn walls(&self, thickness: f32, obstacles: &[Wall]) -> Vec<Wall> {
        let mut walls = vec![
            Wall::new(0.0, 0.0, self.width, thickness),
            Wall::new(0.0, self.height - thickness, self.width, thickness),
            Wall::new(0.0, 0.0, thickness, self.height),
            Wall::new(self.width - thickness, 0.0, thickness, self.height),
        ];
        walls.extend_from_slice(obstacles);
        walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_strict() {
        let arena = Arena::new(800.0, 600.0);
        assert!(arena.contains(Vec2::new(1.0, 1.0)));
        assert!(!arena.contains(Vec2::new(0.0, 300.0)));
        assert!(!arena.contains(Vec2::new(400.0, 600.0)));
        assert!(!arena.contains(Vec2::new(-3.0, 300.0)));
    }

    #[test]
    fn test_clamp_uses_half_size() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.clamp(Vec2::new(-50.0, 900.0), 10.0), Vec2::new(10.0, 590.0));
        assert_eq!(arena.clamp(Vec2::new(400.0, 300.0), 10.0), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_default_layout() {
        let tuning = Tuning::default();
        let arena = Arena::from_tuning(&tuning);
        let walls = arena.walls(tuning.wall_thickness, &tuning.obstacles);
        assert_eq!(walls.len(), 8);
        assert_eq!(walls[1], Wall::new(0.0, 580.0, 800.0, 20.0));
        assert_eq!(walls[4], Wall::new(200.0, 150.0, 100.0, 20.0));
        assert_eq!(arena.center(), Vec2::new(400.0, 300.0));
    }
}
