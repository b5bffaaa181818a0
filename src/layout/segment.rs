//! Axis-aligned room units (lobby, corridors, turns)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::direction::{OpenSides, Side};

/// Axis-aligned rectangle on the walking plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Rect {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Build from a center and half extents (x, z)
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self::new(
            center.x - half.x,
            center.x + half.x,
            center.y - half.y,
            center.y + half.y,
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Full extents (width along X, depth along Z)
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.max_x - self.min_x, self.max_z - self.min_z)
    }

    /// Coordinate of the given edge (X for MinX/MaxX, Z for MinZ/MaxZ)
    pub fn edge(&self, side: Side) -> f32 {
        match side {
            Side::MinX => self.min_x,
            Side::MaxX => self.max_x,
            Side::MinZ => self.min_z,
            Side::MaxZ => self.max_z,
        }
    }

    /// Midpoint of the given edge
    pub fn edge_midpoint(&self, side: Side) -> Vec2 {
        let c = self.center();
        match side {
            Side::MinX | Side::MaxX => Vec2::new(self.edge(side), c.y),
            Side::MinZ | Side::MaxZ => Vec2::new(c.x, self.edge(side)),
        }
    }

    /// Length of the given edge
    pub fn edge_length(&self, side: Side) -> f32 {
        let size = self.size();
        match side {
            Side::MinX | Side::MaxX => size.y,
            Side::MinZ | Side::MaxZ => size.x,
        }
    }

    /// Move one edge outward by `amount` (negative moves it inward)
    #[must_use]
    pub fn push_edge(mut self, side: Side, amount: f32) -> Self {
        match side {
            Side::MinX => self.min_x -= amount,
            Side::MaxX => self.max_x += amount,
            Side::MinZ => self.min_z -= amount,
            Side::MaxZ => self.max_z += amount,
        }
        self
    }

    /// Inclusive containment; false for NaN coordinates
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_z && p.y <= self.max_z
    }
}

/// What a segment is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentRole {
    Lobby,
    Corridor,
    Turn,
}

/// One room unit of the generated gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub role: SegmentRole,
    pub bounds: Rect,
    pub open: OpenSides,
}

impl Segment {
    pub fn new(role: SegmentRole, bounds: Rect, open: OpenSides) -> Self {
        Self { role, bounds, open }
    }

    pub fn is_open(&self, side: Side) -> bool {
        self.open.contains(side)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(Vec2::new(0.0, -20.0), Vec2::new(10.0, 20.0));
        assert_eq!(r, Rect::new(-10.0, 10.0, -40.0, 0.0));
        assert_eq!(r.size(), Vec2::new(20.0, 40.0));
        assert_eq!(r.edge_midpoint(Side::MinZ), Vec2::new(0.0, -40.0));
        assert_eq!(r.edge_length(Side::MinZ), 20.0);
    }

    #[test]
    fn test_push_edge() {
        let r = Rect::new(0.0, 10.0, 0.0, 10.0);
        let r = r.push_edge(Side::MinX, 1.0).push_edge(Side::MaxZ, -2.0);
        assert_eq!(r, Rect::new(-1.0, 10.0, 0.0, 8.0));
    }

    #[test]
    fn test_contains_is_inclusive_and_rejects_nan() {
        let r = Rect::new(0.0, 1.0, 0.0, 1.0);
        assert!(r.contains(Vec2::new(1.0, 0.0)));
        assert!(!r.contains(Vec2::new(1.01, 0.5)));
        assert!(!r.contains(Vec2::new(f32::NAN, 0.5)));
    }
}
