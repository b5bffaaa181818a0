//! Fixed timestep locomotion step
//!
//! Damps velocity, applies held movement keys along the view's horizontal
//! facing, resolves the displacement against the walkable region and pins
//! the camera to eye height.

use glam::{Vec2, Vec3};

use super::collision::{SlideOutcome, is_walkable, resolve};
use super::state::PlayerState;
use crate::layout::Layout;
use crate::tuning::MotionTuning;

/// Input snapshot for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// View direction in world space (only X/Z are used)
    pub facing: Vec3,
    /// Pointer lock held; without it the step does nothing
    pub captured: bool,
}

impl TickInput {
    /// Horizontal forward and right unit vectors derived from `facing`
    pub fn basis(&self) -> (Vec2, Vec2) {
        let forward = Vec2::new(self.facing.x, self.facing.z).normalize_or_zero();
        // forward x up
        let right = Vec2::new(-forward.y, forward.x);
        (forward, right)
    }

    /// Normalized wish direction from held keys, zero when idle
    pub fn wish_dir(&self) -> Vec2 {
        let (forward, right) = self.basis();
        let f = self.forward as i8 - self.backward as i8;
        let s = self.right as i8 - self.left as i8;
        (forward * f as f32 + right * s as f32).normalize_or_zero()
    }
}

/// What happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Input not captured; nothing changed
    Skipped,
    Moved(SlideOutcome),
    /// Player was out of bounds or off the walkable region and respawned
    Recovered,
}

/// Advance the player by one step of `dt` seconds
pub fn tick(
    player: &mut PlayerState,
    layout: &Layout,
    input: &TickInput,
    motion: &MotionTuning,
    dt: f32,
) -> StepOutcome {
    if !input.captured {
        return StepOutcome::Skipped;
    }

    // Exponential decay keeps the feel independent of step size
    player.vel *= (-motion.damping * dt).exp();
    player.vel += input.wish_dir() * motion.acceleration * dt;

    let segments = &layout.segments;
    let margins = motion.margins();
    let intended = player.pos + player.vel * dt;
    let resolution = resolve(player.pos, intended, segments, margins);
    player.pos = resolution.position;
    player.vel *= resolution.outcome.velocity_mask();

    // No jumping or gravity
    player.eye_height = motion.eye_height;

    if out_of_bounds(player, layout.recovery_radius, motion) {
        log::warn!(
            "Player out of bounds at ({}, {}, {}); respawning",
            player.pos.x,
            player.eye_height,
            player.pos.y
        );
        player.respawn();
        return StepOutcome::Recovered;
    }

    if !is_walkable(player.pos, segments, margins) {
        log::warn!(
            "Player stuck outside walkable area at ({}, {}); respawning",
            player.pos.x,
            player.pos.y
        );
        player.respawn();
        return StepOutcome::Recovered;
    }

    StepOutcome::Moved(resolution.outcome)
}

fn out_of_bounds(player: &PlayerState, radius: f32, motion: &MotionTuning) -> bool {
    player.pos.length() > radius
        || player.eye_height < motion.min_y
        || player.eye_height > motion.max_y
}
