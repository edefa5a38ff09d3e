use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::TracingLayer;

/// Traced point in slice voxel coordinates (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: i32,
    pub y: i32,
}

impl TracePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn distance_squared(&self, other: &TracePoint) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        dx * dx + dy * dy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraceKey {
    pub layer: TracingLayer,
    /// Axial slice index.
    pub slice: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceStore {
    points: BTreeMap<TraceKey, Vec<TracePoint>>,
}

impl TraceStore {
    pub fn points(&self, key: TraceKey) -> &[TracePoint] {
        self.points.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn total_points(&self) -> usize {
        self.points.values().map(Vec::len).sum()
    }

    pub fn add(&mut self, key: TraceKey, points: &[TracePoint]) {
        if points.is_empty() {
            return;
        }
        self.points.entry(key).or_default().extend_from_slice(points);
    }

    /// Removes one stored instance per entry of `points`, newest first.
    pub fn remove(&mut self, key: TraceKey, points: &[TracePoint]) {
        let Some(stored) = self.points.get_mut(&key) else {
            return;
        };
        for point in points {
            if let Some(index) = stored.iter().rposition(|candidate| candidate == point) {
                stored.remove(index);
            }
        }
        if stored.is_empty() {
            self.points.remove(&key);
        }
    }

    pub fn replace(&mut self, key: TraceKey, points: Vec<TracePoint>) {
        if points.is_empty() {
            self.points.remove(&key);
        } else {
            self.points.insert(key, points);
        }
    }

    /// Stored points farther than `radius` from every eraser point, in stored order.
    pub fn without_near(
        &self,
        key: TraceKey,
        erasers: &[TracePoint],
        radius: f32,
    ) -> Vec<TracePoint> {
        let limit = radius.max(0.0) * radius.max(0.0);
        self.points(key)
            .iter()
            .filter(|stored| {
                erasers
                    .iter()
                    .all(|eraser| stored.distance_squared(eraser) > limit)
            })
            .copied()
            .collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Freehand stroke in window pixels. Each new point relaxes the three points
/// before it towards their successor, which removes mouse jitter.
#[derive(Debug, Clone, Default)]
pub struct TraceStroke {
    points: Vec<Vec2>,
}

const SMOOTHING: f32 = 0.5;
const SMOOTHED_TAIL: usize = 3;

impl TraceStroke {
    pub fn new(start: Vec2) -> Self {
        Self {
            points: vec![start],
        }
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push(point);
        let count = self.points.len();
        if count <= SMOOTHED_TAIL + 1 {
            return;
        }
        for offset in 2..=SMOOTHED_TAIL + 1 {
            let index = count - offset;
            self.points[index] =
                self.points[index] * SMOOTHING + self.points[index + 1] * (1.0 - SMOOTHING);
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.points
    }
}
