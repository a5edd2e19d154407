use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};
use rand::seq::SliceRandom;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rotator::constants::*;
use rotator::{LogRenderer, Rotation, RotationConfig};

mod texture_loader;
#[cfg(feature = "viewer")]
mod slide;
#[cfg(feature = "viewer")]
mod viewer;

use crate::texture_loader::load_sorted_image_paths;

#[derive(Parser, Debug)]
#[command(name = "rotator", about = "Rotate through a set of images like a slideshow")]
struct Cli {
    #[command(flatten)]
    rotation: RotationArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct RotationArgs {
    /// Milliseconds between automatic transitions.
    #[arg(long, global = true, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    delay: u64,
    /// Milliseconds a fade takes.
    #[arg(long, global = true, default_value_t = DEFAULT_SPEED.as_millis() as u64)]
    speed: u64,
    /// Show the start element and wait instead of rotating.
    #[arg(long, global = true)]
    no_autoplay: bool,
    /// Index of the element shown first.
    #[arg(long, global = true, default_value_t = DEFAULT_START_INDEX)]
    start_index: usize,
    /// Full cycles before stopping, 0 rotates forever.
    #[arg(long, global = true, default_value_t = DEFAULT_CYCLE_COUNT)]
    cycles: usize,
    /// Index on which a bounded rotation stops.
    #[arg(long, global = true, default_value_t = DEFAULT_CYCLE_END_INDEX)]
    cycle_end_index: usize,
    /// Rotate backwards.
    #[arg(long, global = true)]
    reverse: bool,
    /// Shuffle the elements before rotating.
    #[arg(long, global = true)]
    shuffle: bool,
}

impl RotationArgs {
    fn config(&self) -> RotationConfig {
        RotationConfig::default()
            .with_delay(Duration::from_millis(self.delay))
            .with_speed(Duration::from_millis(self.speed))
            .with_autoplay(!self.no_autoplay)
            .with_start_index(self.start_index)
            .with_cycle_count(self.cycles)
            .with_cycle_end_index(self.cycle_end_index)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a rotation without a window and log what would be shown.
    Simulate {
        /// Directory of images to rotate. Synthetic elements are used when omitted.
        dir: Option<PathBuf>,
        /// Number of synthetic elements.
        #[arg(long, default_value_t = 5)]
        count: usize,
        /// Milliseconds of rotation time to simulate.
        #[arg(long, default_value_t = 30_000)]
        duration: u64,
        /// Milliseconds per simulated frame (defaults to one frame at 60 FPS).
        #[arg(long)]
        frame: Option<u64>,
    },
    /// Show the images of a directory in a window.
    #[cfg(feature = "viewer")]
    View {
        /// Directory of images to rotate.
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            dir,
            count,
            duration,
            frame,
        } => run_simulate(&cli.rotation, dir, count, duration, frame)?,
        #[cfg(feature = "viewer")]
        Commands::View { dir } => {
            let mut paths = load_sorted_image_paths(&dir)?;
            if cli.rotation.shuffle {
                paths.shuffle(&mut rand::rng());
            }
            viewer::run(paths, cli.rotation.config(), cli.rotation.reverse)?
        }
    }

    Ok(())
}

fn run_simulate(
    args: &RotationArgs,
    dir: Option<PathBuf>,
    count: usize,
    duration: u64,
    frame: Option<u64>,
) -> Result<()> {
    let mut names: Vec<String> = match dir {
        Some(dir) => load_sorted_image_paths(&dir)?
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect(),
        None => (0..count).map(|i| format!("slide-{i}")).collect(),
    };
    if args.shuffle {
        names.shuffle(&mut rand::rng());
    }

    let config = args.config();
    let autoplay = config.autoplay;
    let mut rotation = Rotation::new(
        LogRenderer::new(names),
        config.with_autoplay(autoplay && !args.reverse),
    )
    .context("failed to start rotation")?;
    if autoplay && args.reverse {
        rotation.play(true);
    }

    let transitions = Rc::new(Cell::new(0usize));
    let finished = Rc::new(Cell::new(false));
    {
        let transitions = Rc::clone(&transitions);
        rotation.bind("transition", move |rotation, hidden| {
            transitions.set(transitions.get() + 1);
            info!(hidden, shown = ?rotation.index(), "transition finished");
        });
    }
    {
        let finished = Rc::clone(&finished);
        rotation.bind("cycleEnd", move |_, index| {
            finished.set(true);
            info!(index, "cycle finished");
        });
    }

    let frame = frame.map(Duration::from_millis).unwrap_or(FRAME_TIME);
    ensure!(!frame.is_zero(), "frame time must be positive");
    let end = Duration::from_millis(duration);
    while rotation.elapsed() < end && !finished.get() {
        rotation.update(frame);
    }

    info!(
        elapsed = ?rotation.elapsed(),
        transitions = transitions.get(),
        index = ?rotation.index(),
        "simulation done"
    );
    Ok(())
}
