mod colors;
mod config;
mod logging;
mod player;
mod settings;
mod shader;
mod terminal;

use clap::{Parser, Subcommand};
use config::{EffectConfig, EffectMode, FrameConfig, PlayConfig, DEFAULT_ASPECT, DEFAULT_SCHEME};
use settings::Settings;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "termeyes")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Terminal animation: two drifting, blinking eyes over plasma or doom-style flames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the animation full-screen (q/Esc quit, space pause, +/- fps, Shift+digit colors)
    Play {
        /// Effect preset
        #[arg(short, long, value_enum)]
        mode: Option<EffectMode>,

        /// Target frames per second
        #[arg(short, long)]
        fps: Option<u32>,

        /// Character cell width / height
        #[arg(short, long)]
        aspect: Option<f64>,

        /// Random seed for the noise table and flame jitter
        #[arg(short, long)]
        seed: Option<u64>,

        /// Color scheme (0-9, 7 = mono)
        #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(0..=9))]
        scheme: Option<u8>,

        /// Write log events to this file (filter with RUST_LOG)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print a single frame to stdout
    Frame {
        /// Effect preset
        #[arg(short, long, value_enum)]
        mode: Option<EffectMode>,

        /// Grid width
        #[arg(long, default_value = "80", value_parser = clap::value_parser!(u16).range(1..=1000))]
        cols: u16,

        /// Grid height
        #[arg(long, default_value = "24", value_parser = clap::value_parser!(u16).range(1..=1000))]
        rows: u16,

        /// Elapsed time in milliseconds
        #[arg(short, long, default_value = "0")]
        time: f64,

        /// Character cell width / height
        #[arg(short, long)]
        aspect: Option<f64>,

        /// Random seed for the noise table and flame jitter
        #[arg(short, long)]
        seed: Option<u64>,

        /// Flame frames to simulate before the printed one
        #[arg(short, long, default_value = "100")]
        warmup: u32,

        /// Print glyphs only, no ANSI styling
        #[arg(short, long)]
        plain: bool,

        /// Color scheme (0-9, 7 = mono)
        #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(0..=9))]
        scheme: Option<u8>,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            mode,
            fps,
            aspect,
            seed,
            scheme,
            log_file,
        } => {
            logging::init(log_file.as_deref())?;
            let saved = Settings::load().play;

            let effect = effect_config(mode.or(saved.mode), fps.or(saved.fps));
            let config = PlayConfig {
                effect,
                aspect: cell_aspect(aspect.or(saved.aspect)),
                seed: seed.or(saved.seed),
                scheme: scheme.or(saved.scheme).unwrap_or(DEFAULT_SCHEME),
            };
            player::run(config)?;
        }
        Commands::Frame {
            mode,
            cols,
            rows,
            time,
            aspect,
            seed,
            warmup,
            plain,
            scheme,
        } => {
            let saved = Settings::load().play;

            let config = FrameConfig {
                effect: effect_config(mode.or(saved.mode), saved.fps),
                cols: cols as usize,
                rows: rows as usize,
                time_ms: if time.is_finite() { time.max(0.0) } else { 0.0 },
                aspect: cell_aspect(aspect.or(saved.aspect)),
                seed: seed.or(saved.seed),
                warmup,
                plain,
                scheme: scheme.or(saved.scheme).unwrap_or(DEFAULT_SCHEME),
            };
            player::print_frame(config)?;
        }
    }

    Ok(())
}

fn effect_config(mode: Option<EffectMode>, fps: Option<u32>) -> EffectConfig {
    let effect = mode.map(EffectConfig::from_mode).unwrap_or_default();
    match fps {
        Some(fps) => effect.with_fps(fps),
        None => effect,
    }
}

/// Aspect ratios must be positive and finite
fn cell_aspect(aspect: Option<f64>) -> f64 {
    aspect
        .filter(|a| a.is_finite() && *a > 0.0)
        .unwrap_or(DEFAULT_ASPECT)
}
