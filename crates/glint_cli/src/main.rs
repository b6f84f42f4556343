use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{
    render_parallel, render_with_progress, write_image_file, ImageBuffer, RenderConfig,
    ShadingMode,
};
use glint_scene::{builtin, load_scene, SceneDescription, BUILTIN_NAMES};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod logger;

use cli::Args;
use logger::{init_logger, ProgressLog};

/// Resolve `--scene`: a built-in name, otherwise a JSON file.
fn scene_description(scene: &str, seed: u64) -> Result<SceneDescription> {
    if BUILTIN_NAMES.contains(&scene) {
        let mut rng = StdRng::seed_from_u64(seed);
        return builtin(scene, &mut rng)
            .with_context(|| format!("Failed to create scene '{}'", scene));
    }

    let path = Path::new(scene);
    if !path.exists() {
        anyhow::bail!(
            "Scene '{}' is neither a built-in ({}) nor an existing file",
            scene,
            BUILTIN_NAMES.join(", ")
        );
    }
    load_scene(path).with_context(|| format!("Failed to load scene file {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Glint {}", env!("CARGO_PKG_VERSION"));

    let description = scene_description(&args.scene, args.seed)?;

    if let Some(path) = &args.dump_scene {
        let json = description.to_json().context("Failed to serialize scene")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
        info!("Wrote scene description to {}", path.display());
    }

    let start = Instant::now();
    let scene = description
        .build()
        .with_context(|| format!("Failed to build scene '{}'", description.name))?;
    info!(
        "Scene '{}' built with {} spheres in {:?}",
        scene.name,
        scene.sphere_count(),
        start.elapsed()
    );

    let camera = scene
        .camera_for(args.width, args.height)
        .context("Invalid camera for this image size")?;

    let shading = if args.normals {
        ShadingMode::Normals
    } else {
        ShadingMode::Scatter
    };
    let config = RenderConfig::default()
        .with_resolution(args.width, args.height)
        .with_quality(args.samples, args.max_depth)
        .with_shading(shading);

    let progress = ProgressLog::new();
    let report = |done: u32, total: u32| {
        progress.report(done, total);
    };

    let start = Instant::now();
    let image: ImageBuffer = match args.threads {
        1 => {
            let mut rng = StdRng::seed_from_u64(args.seed);
            render_with_progress(&camera, &scene.world, &config, &mut rng, &report)?
        }
        0 => render_parallel(&camera, &scene.world, &config, args.seed, &report)?,
        threads => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build thread pool")?;
            pool.install(|| render_parallel(&camera, &scene.world, &config, args.seed, &report))?
        }
    };
    info!("Rendered in {:?}", start.elapsed());

    write_image_file(&args.output, &image)
        .with_context(|| format!("Failed to write image to {}", args.output.display()))?;
    info!("Saved {}", args.output.display());

    Ok(())
}
