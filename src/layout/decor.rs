//! Ambient decoration scatter (visitor figures, floating hearts)
//!
//! Purely cosmetic. Uses its own seeded RNG so structural geometry never
//! depends on the seed.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::segment::{Segment, SegmentRole};
use crate::lift;
use crate::tuning::LayoutTuning;

/// Visitor capsule center height
const VISITOR_HEIGHT: f32 = 0.9;
/// Heart spin range (radians/sec)
const HEART_SPIN_MIN: f32 = 0.6;
const HEART_SPIN_MAX: f32 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorKind {
    Visitor,
    Heart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: DecorKind,
    pub position: Vec3,
    pub yaw: f32,
    /// Continuous rotation about +Y (radians/sec), 0 for static figures
    pub spin_speed: f32,
    /// Phase offset for vertical bobbing
    pub bob_phase: f32,
}

/// Scatter decorations across the generated segments
pub fn scatter(segments: &[Segment], tuning: &LayoutTuning, seed: u64) -> Vec<Decoration> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut out = Vec::new();

    for seg in segments.iter().filter(|s| s.role == SegmentRole::Corridor) {
        if rng.random::<f32>() < tuning.visitor_chance {
            out.push(Decoration {
                kind: DecorKind::Visitor,
                position: lift(seg.center(), VISITOR_HEIGHT),
                yaw: rng.random_range(0.0..TAU),
                spin_speed: 0.0,
                bob_phase: 0.0,
            });
        }
    }

    if segments.is_empty() {
        return out;
    }

    for _ in 0..tuning.heart_count {
        let seg = &segments[rng.random_range(0..segments.len())];
        let b = seg.bounds;
        let x = rng.random_range(b.min_x..b.max_x);
        let z = rng.random_range(b.min_z..b.max_z);
        let y = rng.random_range(tuning.heart_min_height..=tuning.heart_max_height);
        out.push(Decoration {
            kind: DecorKind::Heart,
            position: Vec3::new(x, y, z),
            yaw: rng.random_range(0.0..TAU),
            spin_speed: rng.random_range(HEART_SPIN_MIN..HEART_SPIN_MAX),
            bob_phase: rng.random_range(0.0..PI),
        });
    }

    out
}
