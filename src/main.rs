//! Lava Leap entry point
//!
//! Plays levels headlessly: plans come from files (or the built-in set), input
//! comes from a script, and frames advance on a synthetic clock.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use lava_leap::script::InputScript;
use lava_leap::sim::{GridLevel, InputSnapshot, Key};
use lava_leap::{FrameClock, Game, Progress, Settings, levels};

#[derive(Debug, Parser)]
#[command(name = "lava-leap", version, about = "Run platformer levels headlessly")]
struct Cli {
    /// Level plan files, played in order (built-in levels when omitted)
    levels: Vec<PathBuf>,

    /// Settings file (defaults are used when it does not exist)
    #[arg(long, default_value = "lava-leap.json")]
    settings: PathBuf,

    /// JSON input script; without one the player holds ArrowRight
    #[arg(long)]
    script: Option<PathBuf>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Stop after this many frames
    #[arg(long, default_value_t = 36_000)]
    max_frames: u64,

    /// Print the final world state as JSON
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(progress) => {
            println!("{}", describe(progress));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Progress> {
    let settings = Settings::load(&cli.settings)?;
    let levels = load_levels(&cli.levels, settings.level_seed)?;
    let script = match &cli.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::hold(InputSnapshot::pressed(&[Key::ArrowRight])),
    };

    let mut game = Game::new(levels, &settings).context("no levels to play")?;
    let mut clock = FrameClock::new(settings.max_frame_step);
    let frame_ms = 1000.0 / f64::from(cli.fps.max(1));
    clock.tick(0.0);

    let mut progress = Progress::Running;
    for frame in 0..cli.max_frames {
        let now = (frame + 1) as f64 * frame_ms;
        let Some(dt) = clock.tick(now) else {
            continue;
        };
        progress = game.frame(dt, &script.input_at(frame))?;
        if progress != Progress::Running {
            log::info!("Frame {}: {:?}", frame, progress);
        }
        if progress.is_over() {
            break;
        }
    }

    if !progress.is_over() {
        log::warn!(
            "Stopped after {} frames on level {} of {}",
            cli.max_frames,
            game.level_index() + 1,
            game.level_count()
        );
    }
    if cli.dump {
        println!("{}", serde_json::to_string_pretty(game.state())?);
    }
    Ok(progress)
}

fn load_levels(paths: &[PathBuf], seed: u64) -> Result<Vec<GridLevel>> {
    if paths.is_empty() {
        log::info!("Using built-in levels");
        return levels::all()
            .into_iter()
            .map(|plan| GridLevel::parse_seeded(plan, seed).context("built-in level"))
            .collect();
    }

    paths
        .iter()
        .map(|path| {
            let plan = fs::read_to_string(path)
                .with_context(|| format!("failed to read level {}", path.display()))?;
            GridLevel::parse_seeded(&plan, seed)
                .with_context(|| format!("invalid level {}", path.display()))
        })
        .collect()
}

fn describe(progress: Progress) -> &'static str {
    match progress {
        Progress::Victory => "You win!",
        Progress::GameOver => "Game over",
        Progress::Running | Progress::LevelCleared { .. } | Progress::LifeLost { .. } => {
            "Out of frames"
        }
    }
}
