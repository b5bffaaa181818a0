//! Locomotion and collision
//!
//! Pure and deterministic per step:
//! - Fixed timestep only
//! - Reads the segment list, never mutates it
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Margins, Resolution, SlideOutcome, is_walkable, resolve, walkable_bounds};
pub use state::PlayerState;
pub use tick::{StepOutcome, TickInput, tick};
