//! Data-driven gallery tuning
//!
//! Every distance and motion constant the generator and locomotion engine use.
//! The host may override any subset from JSON; missing fields keep defaults.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::CHUNK_SIZE;
use crate::error::{GalleryError, Result};
use crate::sim::Margins;

/// Layout dimensions (world units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    /// Media items per corridor
    pub chunk_size: usize,

    // === Lobby ===
    pub lobby_width: f32,
    pub lobby_length: f32,
    /// Spawn distance from the lobby's open edge
    pub spawn_z: f32,

    // === Corridors & turns ===
    pub corridor_width: f32,
    pub corridor_length: f32,
    pub turn_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,

    // === Art ===
    /// Hanging height of a frame's center
    pub art_height: f32,
    /// Distance from the wall plane into the corridor
    pub art_inset: f32,
    /// Near/far slot offset from the corridor center along travel
    pub art_spacing: f32,
    pub photo_size: Vec2,
    pub frame_size: Vec2,
    /// Spotlight position in the frame's local space (+Z faces the viewer)
    pub spot_offset: Vec3,
    pub spot_angle: f32,
    pub spot_range: f32,

    // === Decoration ===
    /// Chance that a corridor gets an ambient visitor figure
    pub visitor_chance: f32,
    pub heart_count: usize,
    pub heart_min_height: f32,
    pub heart_max_height: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,

            lobby_width: 20.0,
            lobby_length: 25.0,
            spawn_z: 15.0,

            corridor_width: 20.0,
            corridor_length: 40.0,
            turn_size: 20.0,
            wall_height: 12.0,
            wall_thickness: 1.0,

            art_height: 4.0,
            art_inset: 0.7,
            art_spacing: 10.0,
            photo_size: Vec2::new(4.0, 3.0),
            frame_size: Vec2::new(4.2, 3.2),
            spot_offset: Vec3::new(0.0, 2.0, 4.0),
            spot_angle: std::f32::consts::FRAC_PI_4,
            spot_range: 15.0,

            visitor_chance: 0.5,
            heart_count: 50,
            heart_min_height: 2.0,
            heart_max_height: 10.0,
        }
    }
}

/// Player movement and collision constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Camera height, pinned every step
    pub eye_height: f32,
    /// Exponential velocity decay rate (1/s)
    pub damping: f32,
    /// Input acceleration (units/s^2)
    pub acceleration: f32,

    // === Collision ===
    /// Inward contraction applied to closed sides
    pub wall_margin: f32,
    /// Outward expansion applied to open sides
    pub open_overlap: f32,

    // === Recovery ===
    /// Slack beyond the farthest segment corner; past it the player is
    /// respawned
    pub recovery_radius: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            eye_height: 4.0,
            damping: 10.0,
            acceleration: 400.0,

            wall_margin: 1.5,
            open_overlap: 0.1,

            recovery_radius: 500.0,
            min_y: -10.0,
            max_y: 50.0,
        }
    }
}

impl MotionTuning {
    pub fn margins(&self) -> Margins {
        Margins {
            wall: self.wall_margin,
            open: self.open_overlap,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub layout: LayoutTuning,
    pub motion: MotionTuning,
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would produce a broken or unwalkable gallery
    pub fn validate(&self) -> Result<()> {
        let l = &self.layout;
        let m = &self.motion;

        if l.chunk_size == 0 {
            return Err(GalleryError::tuning("chunk_size", "must be at least 1"));
        }

        positive("lobby_width", l.lobby_width)?;
        positive("lobby_length", l.lobby_length)?;
        positive("corridor_width", l.corridor_width)?;
        positive("corridor_length", l.corridor_length)?;
        positive("turn_size", l.turn_size)?;
        positive("wall_height", l.wall_height)?;
        positive("wall_thickness", l.wall_thickness)?;
        positive("art_height", l.art_height)?;
        positive("spot_range", l.spot_range)?;
        non_negative("art_inset", l.art_inset)?;
        non_negative("art_spacing", l.art_spacing)?;

        if l.turn_size < l.corridor_width {
            return Err(GalleryError::tuning(
                "turn_size",
                format!("{} is narrower than corridor_width {}", l.turn_size, l.corridor_width),
            ));
        }
        if l.lobby_width < l.corridor_width {
            return Err(GalleryError::tuning(
                "lobby_width",
                format!("{} is narrower than corridor_width {}", l.lobby_width, l.corridor_width),
            ));
        }
        if l.art_inset >= l.corridor_width / 2.0 {
            return Err(GalleryError::tuning("art_inset", "places art past the corridor center"));
        }
        if l.art_spacing > l.corridor_length / 2.0 {
            return Err(GalleryError::tuning("art_spacing", "places art outside the corridor"));
        }
        if !(l.spawn_z > 0.0 && l.spawn_z < l.lobby_length) {
            return Err(GalleryError::tuning("spawn_z", "must lie inside the lobby"));
        }
        if !(0.0..=1.0).contains(&l.visitor_chance) {
            return Err(GalleryError::tuning("visitor_chance", "must be within [0, 1]"));
        }
        if !(l.heart_min_height.is_finite()
            && l.heart_max_height.is_finite()
            && l.heart_min_height <= l.heart_max_height)
        {
            return Err(GalleryError::tuning(
                "heart_min_height",
                "must be finite and not above heart_max_height",
            ));
        }

        non_negative("damping", m.damping)?;
        positive("acceleration", m.acceleration)?;
        non_negative("wall_margin", m.wall_margin)?;
        non_negative("open_overlap", m.open_overlap)?;
        positive("recovery_radius", m.recovery_radius)?;
        if !(m.min_y < m.eye_height && m.eye_height < m.max_y) {
            return Err(GalleryError::tuning("eye_height", "must lie inside [min_y, max_y]"));
        }

        let narrowest = l.corridor_width.min(l.lobby_width).min(l.turn_size);
        if m.wall_margin * 2.0 >= narrowest {
            return Err(GalleryError::tuning(
                "wall_margin",
                format!("{} leaves no walkable width in a {} wide room", m.wall_margin, narrowest),
            ));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GalleryError::tuning(field, format!("{value} must be finite and > 0")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GalleryError::tuning(field, format!("{value} must be finite and >= 0")))
    }
}
