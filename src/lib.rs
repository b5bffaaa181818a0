//! Memory Gallery - procedural corridor gallery with first-person walking
//!
//! Core modules:
//! - `layout`: Media list -> segments, walls, art placements (deterministic structure)
//! - `sim`: Walkability predicate, slide resolution, per-step locomotion
//! - `gallery`: Session state (entry guard, fixed timestep accumulator)
//! - `tuning`: Data-driven distances, margins and motion constants
//! - `platform`: Browser bindings for the JS host
//!
//! Planar coordinates use `Vec2` where `x` is world X and `y` is world Z.
//! World Y is up; North is -Z.

pub mod error;
pub mod gallery;
pub mod layout;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{GalleryError, Result};
pub use gallery::{GallerySession, SessionPhase};
pub use layout::{Layout, MediaItem, MediaKind, generate};
pub use tuning::{LayoutTuning, MotionTuning, Tuning};

use glam::{Vec2, Vec3};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Media items per corridor (2 per wall side)
    pub const CHUNK_SIZE: usize = 4;

    /// Default decoration seed used by the native demo and tests
    pub const DEFAULT_DECOR_SEED: u64 = 0x6761_6c6c_6572_7921;
}

/// Project a world position onto the walking plane
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Lift a planar position back into world space at height `y`
#[inline]
pub fn lift(p: Vec2, y: f32) -> Vec3 {
    Vec3::new(p.x, y, p.y)
}

/// Yaw (rotation about +Y) that turns a +Z facing plane toward `normal`
#[inline]
pub fn yaw_toward(normal: Vec2) -> f32 {
    normal.x.atan2(normal.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_yaw_toward_axes() {
        assert!(yaw_toward(Vec2::new(0.0, 1.0)).abs() < 1e-6);
        assert!((yaw_toward(Vec2::new(1.0, 0.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((yaw_toward(Vec2::new(-1.0, 0.0)) + FRAC_PI_2).abs() < 1e-6);
        assert!((yaw_toward(Vec2::new(0.0, -1.0)).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_planar_lift() {
        let p = planar(Vec3::new(3.0, 4.0, -5.0));
        assert_eq!(p, Vec2::new(3.0, -5.0));
        assert_eq!(lift(p, 4.0), Vec3::new(3.0, 4.0, -5.0));
    }
}
