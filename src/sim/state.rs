//! Player state mutated by the locomotion step

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::layout::SpawnPose;
use crate::{lift, planar};

/// First-person walker. Facing belongs to the view; only position and
/// velocity live here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Planar position (x, z)
    pub pos: Vec2,
    /// Planar velocity (x, z), units/sec
    pub vel: Vec2,
    /// Fixed camera height
    pub eye_height: f32,
    /// Recovery target
    spawn: Vec2,
}

impl PlayerState {
    pub fn at_spawn(spawn: &SpawnPose) -> Self {
        let pos = planar(spawn.position);
        Self {
            pos,
            vel: Vec2::ZERO,
            eye_height: spawn.position.y,
            spawn: pos,
        }
    }

    /// World-space camera position
    pub fn position(&self) -> Vec3 {
        lift(self.pos, self.eye_height)
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Teleport back to spawn and stop
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respawn_resets_motion() {
        let spawn = SpawnPose {
            position: Vec3::new(0.0, 4.0, 15.0),
            yaw: 0.0,
        };
        let mut player = PlayerState::at_spawn(&spawn);
        assert_eq!(player.position(), spawn.position);

        player.pos = Vec2::new(300.0, -2.0);
        player.vel = Vec2::new(5.0, 5.0);
        player.respawn();
        assert_eq!(player.pos, Vec2::new(0.0, 15.0));
        assert_eq!(player.vel, Vec2::ZERO);
    }
}
