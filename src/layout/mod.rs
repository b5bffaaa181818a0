//! Procedural gallery layout
//!
//! Turns an ordered media list into a chain of axis-aligned segments
//! (lobby, corridors, turns) with wall-mounted placements. Structure is a
//! pure function of the media list and tuning; only decoration is seeded.

pub mod decor;
pub mod direction;
pub mod generate;
pub mod media;
pub mod segment;

pub use decor::{DecorKind, Decoration};
pub use direction::{Direction, OpenSides, Side};
pub use generate::{
    FrameFixture, Frontier, Layout, Placement, Slot, SpawnPose, SurfaceKind, SurfaceSlab,
    WallSide, WallSlab, generate,
};
pub use media::{MediaItem, MediaKind};
pub use segment::{Rect, Segment, SegmentRole};
