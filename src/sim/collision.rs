//! Walkability and wall-slide resolution
//!
//! The walkable region is the union of all segment rectangles, each closed
//! side pulled in by the wall margin and each open side pushed out by a small
//! overlap so neighbouring segments join without a dead zone at the seam.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::layout::{Rect, Segment};
use crate::tuning::MotionTuning;

/// Per-side bound adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Inward contraction on closed sides
    pub wall: f32,
    /// Outward expansion on open sides
    pub open: f32,
}

impl Default for Margins {
    fn default() -> Self {
        MotionTuning::default().margins()
    }
}

/// Segment bounds after margin adjustment
pub fn walkable_bounds(segment: &Segment, margins: Margins) -> Rect {
    crate::layout::Side::ALL
        .into_iter()
        .fold(segment.bounds, |rect, side| {
            let amount = if segment.is_open(side) {
                margins.open
            } else {
                -margins.wall
            };
            rect.push_edge(side, amount)
        })
}

/// True if `p` lies inside at least one segment's adjusted bounds
///
/// Total: any input, including NaN or far-away points, yields a bool.
pub fn is_walkable(p: Vec2, segments: &[Segment], margins: Margins) -> bool {
    segments
        .iter()
        .any(|seg| walkable_bounds(seg, margins).contains(p))
}

/// Which resolution path was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideOutcome {
    /// Intended position accepted
    Free,
    /// Only the X component applied; Z velocity absorbed
    SlideX,
    /// Only the Z component applied; X velocity absorbed
    SlideZ,
    /// Both axes blocked; position unchanged
    Blocked,
}

impl SlideOutcome {
    /// Per-axis factor to multiply velocity by (x, z)
    pub fn velocity_mask(self) -> Vec2 {
        match self {
            SlideOutcome::Free => Vec2::ONE,
            SlideOutcome::SlideX => Vec2::new(1.0, 0.0),
            SlideOutcome::SlideZ => Vec2::new(0.0, 1.0),
            SlideOutcome::Blocked => Vec2::ZERO,
        }
    }
}

/// Result of resolving one step's displacement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub position: Vec2,
    pub outcome: SlideOutcome,
}

/// Resolve a move from `previous` toward `intended`
///
/// Tries the full move, then X only, then Z only, then gives up. X before Z
/// is a fixed tie-break; it only matters at corners.
pub fn resolve(previous: Vec2, intended: Vec2, segments: &[Segment], margins: Margins) -> Resolution {
    let walkable = |p| is_walkable(p, segments, margins);

    if walkable(intended) {
        return Resolution {
            position: intended,
            outcome: SlideOutcome::Free,
        };
    }

    let delta = intended - previous;

    let x_only = previous + Vec2::new(delta.x, 0.0);
    if walkable(x_only) {
        return Resolution {
            position: x_only,
            outcome: SlideOutcome::SlideX,
        };
    }

    let z_only = previous + Vec2::new(0.0, delta.y);
    if walkable(z_only) {
        return Resolution {
            position: z_only,
            outcome: SlideOutcome::SlideZ,
        };
    }

    Resolution {
        position: previous,
        outcome: SlideOutcome::Blocked,
    }
}
