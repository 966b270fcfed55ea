//! Polyline paths that hostiles follow across the arena.
//!
//! A path is a sequence of waypoints; positions along it are addressed
//! by arc-length distance from the start, with linear interpolation
//! between waypoints.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// A hostile route through the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Position>,
    /// Cumulative arc length at each waypoint; same length as `points`.
    cumulative: Vec<f64>,
}

impl Path {
    /// Build a path from waypoints. Requires at least two points.
    pub fn new(points: Vec<Position>) -> Self {
        assert!(points.len() >= 2, "a path needs at least two waypoints");
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].range_to(&pair[1]);
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    /// Total arc length of the path.
    pub fn length(&self) -> f64 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    /// Position at `distance` along the path, clamped to the endpoints.
    pub fn sample(&self, distance: f64) -> Position {
        if distance <= 0.0 {
            return self.points[0];
        }
        if distance >= self.length() {
            return self.points[self.points.len() - 1];
        }
        // Find the segment containing `distance`.
        let seg = match self
            .cumulative
            .binary_search_by(|c| c.total_cmp(&distance))
        {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let seg_start = self.cumulative[seg];
        let seg_len = self.cumulative[seg + 1] - seg_start;
        if seg_len <= f64::EPSILON {
            return self.points[seg];
        }
        let t = (distance - seg_start) / seg_len;
        let a = self.points[seg].as_vec();
        let b = self.points[seg + 1].as_vec();
        Position::from_vec(a.lerp(b, t))
    }

    /// Fraction of the path covered at `distance`, in [0, 1].
    pub fn fraction(&self, distance: f64) -> f64 {
        let len = self.length();
        if len <= 0.0 {
            1.0
        } else {
            (distance / len).clamp(0.0, 1.0)
        }
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }
}
