//! `prism` - render a scene file (or the demo scene) to a PNG.

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::{demo_scene, load_scene, Scene};
use prism_renderer::{render, render_parallel};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn build_scene(args: &Args) -> Result<Scene> {
    let mut scene = match &args.scene {
        Some(path) => load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, using the demo scene");
            demo_scene()
        }
    };

    if let Some(width) = args.width {
        scene.projection.width = width;
    }
    if let Some(height) = args.height {
        scene.projection.height = height;
    }
    scene.validate().context("Invalid render settings")?;

    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    log::info!("Starting Prism");

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the thread pool")?;
    }

    let scene = build_scene(&args)?;
    log::info!(
        "Rendering {} surfaces at {}x{}",
        scene.surface_count(),
        scene.projection.width,
        scene.projection.height
    );

    let config = args.render_config();
    let image = if args.single_threaded {
        render(&scene, &config)
    } else {
        render_parallel(&scene, &config)
    };

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
