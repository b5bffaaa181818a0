//! Compass directions and rectangle sides
//!
//! Directions drive corridor extrusion; sides tag which edges of a segment are
//! passages. Each direction leaves a rectangle through exactly one side:
//! North -> MinZ, East -> MaxX, South -> MaxZ, West -> MinX.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Travel direction, cyclic in clockwise order (seen from above)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// -Z
    North,
    /// +X
    East,
    /// +Z
    South,
    /// -X
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % 4]
    }

    /// `(dir + 1) mod 4`
    pub fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// `(dir + 3) mod 4`
    pub fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Unit step on the walking plane
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::North => Vec2::new(0.0, -1.0),
            Direction::East => Vec2::new(1.0, 0.0),
            Direction::South => Vec2::new(0.0, 1.0),
            Direction::West => Vec2::new(-1.0, 0.0),
        }
    }

    /// Side of a rectangle this direction exits through
    pub fn side(self) -> Side {
        match self {
            Direction::North => Side::MinZ,
            Direction::East => Side::MaxX,
            Direction::South => Side::MaxZ,
            Direction::West => Side::MinX,
        }
    }

    /// Whether travel runs along the Z axis
    pub fn is_north_south(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// One boundary edge of an axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    MinX,
    MaxX,
    MinZ,
    MaxZ,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::MinX, Side::MaxX, Side::MinZ, Side::MaxZ];

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Side::MinX => 0b0001,
            Side::MaxX => 0b0010,
            Side::MinZ => 0b0100,
            Side::MaxZ => 0b1000,
        }
    }

    /// Outward normal of this edge
    pub fn outward(self) -> Vec2 {
        match self {
            Side::MinX => Vec2::new(-1.0, 0.0),
            Side::MaxX => Vec2::new(1.0, 0.0),
            Side::MinZ => Vec2::new(0.0, -1.0),
            Side::MaxZ => Vec2::new(0.0, 1.0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::MinX => Side::MaxX,
            Side::MaxX => Side::MinX,
            Side::MinZ => Side::MaxZ,
            Side::MaxZ => Side::MinZ,
        }
    }
}

/// Set of open sides as a 4-bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenSides(u8);

impl OpenSides {
    pub const NONE: OpenSides = OpenSides(0);

    pub fn of(sides: &[Side]) -> Self {
        sides.iter().fold(Self::NONE, |set, &s| set.with(s))
    }

    #[must_use]
    pub fn with(self, side: Side) -> Self {
        OpenSides(self.0 | side.bit())
    }

    #[inline]
    pub fn contains(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Sides not in the set, in `Side::ALL` order
    pub fn closed(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |&s| !self.contains(s))
    }

    pub fn iter(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |&s| self.contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_are_cyclic() {
        for dir in Direction::ALL {
            assert_eq!(dir.turn_right().turn_left(), dir);
            assert_eq!(dir.turn_right().turn_right(), dir.opposite());
            assert_eq!(dir.turn_left().turn_left().turn_left().turn_left(), dir);
        }
        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Direction::North.turn_left(), Direction::West);
    }

    #[test]
    fn test_exit_side_matches_vector() {
        for dir in Direction::ALL {
            assert_eq!(dir.side().outward(), dir.vector());
            assert_eq!(dir.opposite().side(), dir.side().opposite());
        }
    }

    #[test]
    fn test_open_sides_mask() {
        let open = OpenSides::of(&[Side::MinZ, Side::MaxZ]);
        assert_eq!(open.len(), 2);
        assert!(open.contains(Side::MinZ));
        assert!(!open.contains(Side::MinX));
        assert_eq!(open.closed().collect::<Vec<_>>(), vec![Side::MinX, Side::MaxX]);
        assert_eq!(OpenSides::of(&[Side::MaxX, Side::MaxX]).len(), 1);
        assert!(OpenSides::NONE.is_empty());
    }
}
