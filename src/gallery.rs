//! Gallery session: one generation run plus the walking player
//!
//! Generation must finish before any step runs, and entry is accepted once
//! per session (the host's entry trigger may fire twice).

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::{GalleryError, Result};
use crate::layout::{Layout, MediaItem, generate};
use crate::sim::{PlayerState, StepOutcome, TickInput, tick};
use crate::tuning::Tuning;

/// Longest frame delta accepted before clamping (seconds)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing generated yet
    Idle,
    /// Generation in progress
    Generating,
    /// Layout built, player may walk
    Ready,
}

#[derive(Debug)]
pub struct GallerySession {
    tuning: Tuning,
    phase: SessionPhase,
    layout: Option<Layout>,
    player: Option<PlayerState>,
    accumulator: f32,
}

impl GallerySession {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: SessionPhase::Idle,
            layout: None,
            player: None,
            accumulator: 0.0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn player(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }

    /// Generate the gallery and place the player at spawn
    pub fn enter(&mut self, media: &[MediaItem], decor_seed: u64) -> Result<&Layout> {
        if self.phase != SessionPhase::Idle {
            log::warn!("Gallery entry ignored: already {:?}", self.phase);
            return Err(GalleryError::AlreadyEntered);
        }

        self.phase = SessionPhase::Generating;
        let layout = match generate(media, &self.tuning, decor_seed) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("Gallery generation failed: {e}");
                self.phase = SessionPhase::Idle;
                return Err(e);
            }
        };

        self.player = Some(PlayerState::at_spawn(&layout.spawn));
        self.accumulator = 0.0;
        self.phase = SessionPhase::Ready;
        log::info!("Gallery ready with {} segments", layout.segments.len());
        Ok(self.layout.insert(layout))
    }

    /// Run exactly one fixed step
    pub fn step(&mut self, input: &TickInput) -> Result<StepOutcome> {
        let (Some(layout), Some(player), SessionPhase::Ready) =
            (self.layout.as_ref(), self.player.as_mut(), self.phase)
        else {
            return Err(GalleryError::NotReady);
        };
        Ok(tick(player, layout, input, &self.tuning.motion, SIM_DT))
    }

    /// Feed one rendered frame's elapsed time; returns substeps run
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> Result<u32> {
        if self.phase != SessionPhase::Ready {
            return Err(GalleryError::NotReady);
        }

        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(input)?;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        Ok(substeps)
    }

    /// Discard the gallery so it can be generated again
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.layout = None;
        self.player = None;
        self.accumulator = 0.0;
    }
}
