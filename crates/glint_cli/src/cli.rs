use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Recursive CPU ray tracer", version)]
pub struct Args {
    /// Built-in scene name (cover, spheres, empty) or path to a JSON scene
    #[arg(long, default_value = "cover")]
    pub scene: String,

    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 225)]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    pub samples: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = glint_renderer::DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Worker threads: 0 uses every core, 1 renders on the calling thread
    #[arg(long, short = 'j', default_value_t = 0)]
    pub threads: usize,

    /// Shade by surface normal instead of tracing materials
    #[arg(long)]
    pub normals: bool,

    /// Output image (.ppm, .png, .jpg, .bmp, ...)
    #[arg(long, short = 'o', default_value = "out.ppm")]
    pub output: PathBuf,

    /// Also write the scene description as JSON
    #[arg(long)]
    pub dump_scene: Option<PathBuf>,

    /// Logging level; RUST_LOG takes precedence when set
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
