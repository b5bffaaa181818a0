//! Memory Gallery entry point
//!
//! The browser build enters through `platform::wasm_main`; natively this runs
//! a headless walk through a generated gallery.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// CLI
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media filenames in gallery order; defaults to the bundled set
    media: Vec<String>,

    /// Path to tuning JSON (partial overrides allowed)
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Decoration seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds to walk north from the spawn point
    #[arg(short, long, default_value = "2.0")]
    walk_seconds: f32,
}

/// Gallery content shipped with the site
#[cfg(not(target_arch = "wasm32"))]
fn default_media() -> Vec<String> {
    (1..=35)
        .map(|i| match i {
            3 => format!("gallery_memory_{i:02}.png"),
            34 | 35 => format!("gallery_memory_{i:02}.mp4"),
            8 | 12.. => format!("gallery_memory_{i:02}.jpeg"),
            _ => format!("gallery_memory_{i:02}.jpg"),
        })
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<&std::path::Path>) -> memory_gallery::Result<memory_gallery::Tuning> {
    let Some(path) = path else {
        return Ok(memory_gallery::Tuning::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| {
        memory_gallery::GalleryError::InvalidTuning {
            field: "tuning",
            reason: format!("cannot read {}: {e}", path.display()),
        }
    })?;
    log::info!("Loaded tuning from {}", path.display());
    memory_gallery::Tuning::from_json(&json)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec3;
    use memory_gallery::consts::SIM_DT;
    use memory_gallery::sim::{StepOutcome, TickInput};
    use memory_gallery::{GallerySession, MediaItem};

    env_logger::init();
    log::info!("Memory Gallery (native) starting...");

    let args = Args::parse();
    let sources = if args.media.is_empty() {
        default_media()
    } else {
        args.media
    };
    let media = MediaItem::from_sources(sources);

    let tuning = match load_tuning(args.tuning.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Decoration seed {seed}");

    let mut session = GallerySession::new(tuning);
    let layout = match session.enter(&media, seed) {
        Ok(layout) => layout,
        Err(e) => {
            log::error!("Gallery entry failed: {e}");
            std::process::exit(1);
        }
    };

    for (i, seg) in layout.segments.iter().enumerate() {
        let b = seg.bounds;
        println!(
            "{i:3} {:<8} x[{:7.1}, {:7.1}] z[{:7.1}, {:7.1}] open={:?}",
            format!("{:?}", seg.role),
            b.min_x,
            b.max_x,
            b.min_z,
            b.max_z,
            seg.open.iter().collect::<Vec<_>>()
        );
    }
    println!(
        "{} placements, {} walls, {} decorations",
        layout.placements.len(),
        layout.walls.len(),
        layout.decorations.len()
    );

    // Straight ahead from the lobby
    let input = TickInput {
        forward: true,
        facing: Vec3::new(0.0, 0.0, -1.0),
        captured: true,
        ..Default::default()
    };
    let steps = (args.walk_seconds.max(0.0) / SIM_DT) as u32;
    for _ in 0..steps {
        match session.step(&input) {
            Ok(StepOutcome::Recovered) => log::warn!("Walker respawned"),
            Ok(_) => {}
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        }
    }
    if let Some(player) = session.player() {
        println!("Walker ended at {:?}", player.position());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["memory-gallery"]).unwrap();
        assert!(args.media.is_empty());
        assert!(args.tuning.is_none());
        assert!(args.seed.is_none());
        assert_eq!(args.walk_seconds, 2.0);
    }

    #[test]
    fn test_args_media_and_flags() {
        let args = Args::try_parse_from([
            "memory-gallery",
            "--seed",
            "42",
            "-t",
            "tuning.json",
            "a.jpg",
            "b.mp4",
        ])
        .unwrap();
        assert_eq!(args.media, vec!["a.jpg", "b.mp4"]);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.tuning, Some(PathBuf::from("tuning.json")));
    }

    #[test]
    fn test_missing_tuning_file_is_reported() {
        let err = load_tuning(Some(std::path::Path::new("/nonexistent/tuning.json"))).unwrap_err();
        assert!(matches!(
            err,
            memory_gallery::GalleryError::InvalidTuning { field: "tuning", .. }
        ));
        assert!(load_tuning(None).is_ok());
    }
}
