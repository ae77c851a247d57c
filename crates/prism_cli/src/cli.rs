use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::{RenderConfig, ShadingMode, DEFAULT_BUCKET_SIZE};

/// Log levels accepted on the command line.
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

#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Ray trace a scene of spheres, planes and cones to a PNG")]
pub struct Args {
    /// JSON scene file; the built-in demo scene is used when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Override the scene's image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the scene's image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Worker threads (rayon default when omitted)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Trace pixels in a single column/row loop instead of parallel buckets
    #[arg(long)]
    pub single_threaded: bool,

    /// Bucket edge length in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Skip the shadow ray
    #[arg(long)]
    pub no_shadows: bool,

    /// Color by world normal instead of Phong shading
    #[arg(long)]
    pub normals: bool,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            shading: if self.normals {
                ShadingMode::Normals
            } else {
                ShadingMode::Phong
            },
            shadows: !self.no_shadows,
            bucket_size: self.bucket_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["prism"]).unwrap();
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert!(!args.single_threaded);
        assert!(matches!(args.log_level, LogLevel::Info));

        let config = args.render_config();
        assert_eq!(config.shading, ShadingMode::Phong);
        assert!(config.shadows);
        assert_eq!(config.bucket_size, DEFAULT_BUCKET_SIZE);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "prism",
            "--scene",
            "scenes/demo.json",
            "-o",
            "out.png",
            "--width",
            "320",
            "--height",
            "200",
            "-j",
            "2",
            "--no-shadows",
            "--normals",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(PathBuf::from("scenes/demo.json")));
        assert_eq!((args.width, args.height), (Some(320), Some(200)));
        assert_eq!(args.threads, Some(2));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);

        let config = args.render_config();
        assert_eq!(config.shading, ShadingMode::Normals);
        assert!(!config.shadows);
    }

    #[test]
    fn test_bad_log_level() {
        assert!(Args::try_parse_from(["prism", "--log-level", "loud"]).is_err());
    }
}
