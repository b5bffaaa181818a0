//! Platform abstraction layer
//!
//! Browser host bindings. The JS side owns the camera, pointer lock and
//! meshes; it hands us media names and per-frame key state, and gets back the
//! layout (as JSON) and the corrected camera position.

use crate::sim::TickInput;
use glam::Vec3;

/// Bit layout of the packed key state passed by the host
pub mod keys {
    pub const FORWARD: u32 = 1 << 0;
    pub const BACKWARD: u32 = 1 << 1;
    pub const LEFT: u32 = 1 << 2;
    pub const RIGHT: u32 = 1 << 3;
    /// Pointer lock held
    pub const CAPTURED: u32 = 1 << 4;
}

/// Unpack host key bits and facing into a step input
pub fn input_from_keys(bits: u32, facing_x: f32, facing_z: f32) -> TickInput {
    TickInput {
        forward: bits & keys::FORWARD != 0,
        backward: bits & keys::BACKWARD != 0,
        left: bits & keys::LEFT != 0,
        right: bits & keys::RIGHT != 0,
        facing: Vec3::new(facing_x, 0.0, facing_z),
        captured: bits & keys::CAPTURED != 0,
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use super::input_from_keys;
    use crate::GallerySession;
    use crate::layout::MediaItem;
    use crate::sim::is_walkable;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[wasm_bindgen(start)]
    pub fn wasm_main() {
        console_error_panic_hook::set_once();
        // Logger may already be installed if the module is re-instantiated
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Memory gallery core loaded");
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// One gallery visit, driven from the host's animation frame callback
    #[wasm_bindgen]
    pub struct GalleryHandle {
        session: GallerySession,
        layout_json: String,
    }

    #[wasm_bindgen]
    impl GalleryHandle {
        /// `media_json`: array of filenames; `tuning_json`: partial tuning or empty
        #[wasm_bindgen(constructor)]
        pub fn new(media_json: &str, tuning_json: &str, seed: u64) -> Result<GalleryHandle, JsValue> {
            let sources: Vec<String> = serde_json::from_str(media_json).map_err(js_err)?;
            let tuning = if tuning_json.trim().is_empty() {
                Tuning::default()
            } else {
                Tuning::from_json(tuning_json).map_err(js_err)?
            };

            let media = MediaItem::from_sources(sources);
            let mut session = GallerySession::new(tuning);
            let layout_json = session
                .enter(&media, seed)
                .and_then(|layout| layout.to_json())
                .map_err(js_err)?;

            Ok(GalleryHandle {
                session,
                layout_json,
            })
        }

        #[wasm_bindgen(js_name = layoutJson)]
        pub fn layout_json(&self) -> String {
            self.layout_json.clone()
        }

        /// Advance by one rendered frame; returns camera `[x, y, z]`
        pub fn step(
            &mut self,
            frame_dt: f32,
            key_bits: u32,
            facing_x: f32,
            facing_z: f32,
        ) -> Result<Box<[f32]>, JsValue> {
            let input = input_from_keys(key_bits, facing_x, facing_z);
            self.session.advance(frame_dt, &input).map_err(js_err)?;
            let pos = self
                .session
                .player()
                .map(|p| p.position())
                .ok_or_else(|| js_err(crate::GalleryError::NotReady))?;
            Ok(Box::new([pos.x, pos.y, pos.z]))
        }

        #[wasm_bindgen(js_name = isWalkable)]
        pub fn is_walkable(&self, x: f32, z: f32) -> bool {
            self.session.layout().is_some_and(|layout| {
                is_walkable(
                    Vec2::new(x, z),
                    &layout.segments,
                    self.session.tuning().motion.margins(),
                )
            })
        }
    }
}
