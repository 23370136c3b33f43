//! Headless host loop
//!
//! Everything stateful that sits around the pure kernel:
//! - `FrameClock`: turns wall-clock timestamps into bounded time steps
//! - `LevelRun`: one attempt at a level, with a short ending animation
//! - `Game`: level progression and lives

use std::sync::Arc;

use crate::consts::MAX_FRAME_STEP;
use crate::settings::Settings;
use crate::sim::{GridLevel, InputSnapshot, Status, StepError, WorldState};

/// Converts frame timestamps (ms) into kernel time steps (s)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_step: f32,
}

impl FrameClock {
    /// A `max_step` that is not a positive finite number falls back to
    /// `MAX_FRAME_STEP`.
    pub fn new(max_step: f32) -> Self {
        let max_step = if max_step.is_finite() && max_step > 0.0 {
            max_step
        } else {
            log::warn!("max frame step {max_step} is invalid, using {MAX_FRAME_STEP}");
            MAX_FRAME_STEP
        };
        Self {
            last_ms: None,
            max_step,
        }
    }

    /// Step since the previous call, capped at `max_step`. The first call only
    /// records the time.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let step = self.last_ms.map(|last| {
            let elapsed = (now_ms - last)
                .max(0.0)
                .min(f64::from(self.max_step) * 1000.0);
            (elapsed / 1000.0) as f32
        });
        self.last_ms = Some(now_ms);
        step
    }
}

/// A single attempt at a level
#[derive(Debug, Clone)]
pub struct LevelRun {
    state: WorldState,
    ending: f32,
    finished: bool,
}

impl LevelRun {
    pub fn new(level: Arc<GridLevel>, ending_delay: f32) -> Self {
        Self {
            state: WorldState::start(level),
            ending: ending_delay,
            finished: false,
        }
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Step the world. Returns the final status once, after the ending delay
    /// has run out.
    pub fn frame(&mut self, dt: f32, input: &InputSnapshot) -> Result<Option<Status>, StepError> {
        if self.finished {
            return Ok(None);
        }

        self.state = self.state.update(dt, input)?;
        if self.state.status().is_playing() {
            return Ok(None);
        }
        if self.ending > 0.0 {
            self.ending -= dt;
            return Ok(None);
        }

        self.finished = true;
        Ok(Some(self.state.status()))
    }
}

/// What a game frame led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Current level still running
    Running,
    /// Level won; `next` is the index now being played
    LevelCleared { next: usize },
    /// Level lost; it restarts with `lives` remaining
    LifeLost { lives: u32 },
    /// Every level won
    Victory,
    /// Out of lives
    GameOver,
}

impl Progress {
    pub fn is_over(&self) -> bool {
        matches!(self, Progress::Victory | Progress::GameOver)
    }
}

/// Multi-level session with lives
#[derive(Debug, Clone)]
pub struct Game {
    levels: Vec<Arc<GridLevel>>,
    level_index: usize,
    lives: u32,
    ending_delay: f32,
    run: LevelRun,
    outcome: Option<Progress>,
}

impl Game {
    /// Start at the first level. Returns `None` when `levels` is empty.
    /// Out-of-range settings are replaced by their defaults.
    pub fn new(levels: Vec<GridLevel>, settings: &Settings) -> Option<Self> {
        let settings = settings.clone().validated();
        let levels: Vec<Arc<GridLevel>> = levels.into_iter().map(Arc::new).collect();
        let first = Arc::clone(levels.first()?);
        log::info!(
            "Starting game: {} levels, {} lives",
            levels.len(),
            settings.lives
        );
        Some(Self {
            levels,
            level_index: 0,
            lives: settings.lives,
            ending_delay: settings.ending_delay,
            run: LevelRun::new(first, settings.ending_delay),
            outcome: None,
        })
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn state(&self) -> &WorldState {
        self.run.state()
    }

    pub fn outcome(&self) -> Option<Progress> {
        self.outcome
    }

    pub fn frame(&mut self, dt: f32, input: &InputSnapshot) -> Result<Progress, StepError> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }

        let Some(status) = self.run.frame(dt, input)? else {
            return Ok(Progress::Running);
        };

        let progress = match status {
            // A run only reports once the world has finished
            Status::Playing => return Ok(Progress::Running),
            Status::Won => {
                self.level_index += 1;
                if self.level_index >= self.levels.len() {
                    log::info!("All {} levels cleared", self.levels.len());
                    Progress::Victory
                } else {
                    log::info!("Level {} cleared", self.level_index);
                    Progress::LevelCleared {
                        next: self.level_index,
                    }
                }
            }
            Status::Lost => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    log::info!("Game over on level {}", self.level_index + 1);
                    Progress::GameOver
                } else {
                    log::info!(
                        "Lost level {}, {} lives left",
                        self.level_index + 1,
                        self.lives
                    );
                    Progress::LifeLost { lives: self.lives }
                }
            }
        };

        if progress.is_over() {
            self.outcome = Some(progress);
        } else {
            let level = Arc::clone(&self.levels[self.level_index]);
            self.run = LevelRun::new(level, self.ending_delay);
        }
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Key;

    const WIN_PLAN: &str = ".......\n.@o....\n#######";
    const LOSE_PLAN: &str = ".....\n..@..\n.....\n..+..\n#####";

    fn settings(lives: u32) -> Settings {
        Settings {
            lives,
            ending_delay: 0.25,
            ..Settings::default()
        }
    }

    fn level(plan: &str) -> GridLevel {
        GridLevel::parse(plan).unwrap()
    }

    fn play_until_event(game: &mut Game, input: &InputSnapshot) -> Progress {
        for _ in 0..1000 {
            let progress = game.frame(0.05, input).unwrap();
            if progress != Progress::Running {
                return progress;
            }
        }
        panic!("no progress event within 1000 frames");
    }

    #[test]
    fn test_frame_clock_skips_first_and_clamps() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.tick(1000.0), None);
        assert!((clock.tick(1016.0).unwrap() - 0.016).abs() < 1e-6);
        assert!((clock.tick(3016.0).unwrap() - 0.1).abs() < 1e-6);
        // Clock going backwards yields a zero step
        assert_eq!(clock.tick(3000.0), Some(0.0));
    }

    #[test]
    fn test_frame_clock_rejects_bad_max_step() {
        for max_step in [-0.1, 0.0, f32::NAN, f32::INFINITY] {
            let mut clock = FrameClock::new(max_step);
            assert_eq!(clock.tick(0.0), None);
            assert!((clock.tick(16.0).unwrap() - 0.016).abs() < 1e-6);
            assert!((clock.tick(5000.0).unwrap() - MAX_FRAME_STEP).abs() < 1e-6);
        }
    }

    #[test]
    fn test_level_run_waits_for_ending_delay() {
        let mut run = LevelRun::new(Arc::new(level(WIN_PLAN)), 0.25);
        let right = InputSnapshot::pressed(&[Key::ArrowRight]);

        assert_eq!(run.frame(0.1, &right).unwrap(), None);
        assert_eq!(run.state().status(), Status::Won);

        let mut frames = 0;
        let status = loop {
            frames += 1;
            if let Some(status) = run.frame(0.1, &right).unwrap() {
                break status;
            }
        };
        assert_eq!(status, Status::Won);
        assert_eq!(frames, 3);
        // Reported once only
        assert_eq!(run.frame(0.1, &right).unwrap(), None);
    }

    #[test]
    fn test_win_advances_then_victory() {
        let levels = vec![level(WIN_PLAN), level(WIN_PLAN)];
        let mut game = Game::new(levels, &settings(3)).unwrap();
        let right = InputSnapshot::pressed(&[Key::ArrowRight]);

        assert_eq!(
            play_until_event(&mut game, &right),
            Progress::LevelCleared { next: 1 }
        );
        assert_eq!(game.level_index(), 1);
        assert_eq!(game.state().status(), Status::Playing);

        assert_eq!(play_until_event(&mut game, &right), Progress::Victory);
        assert_eq!(game.outcome(), Some(Progress::Victory));
        assert_eq!(game.lives(), 3);
        assert_eq!(game.frame(0.05, &right).unwrap(), Progress::Victory);
    }

    #[test]
    fn test_loss_costs_lives_until_game_over() {
        let mut game = Game::new(vec![level(LOSE_PLAN)], &settings(2)).unwrap();
        let idle = InputSnapshot::default();

        assert_eq!(
            play_until_event(&mut game, &idle),
            Progress::LifeLost { lives: 1 }
        );
        assert_eq!(game.level_index(), 0);
        assert_eq!(game.state().status(), Status::Playing);

        assert_eq!(play_until_event(&mut game, &idle), Progress::GameOver);
        assert_eq!(game.lives(), 0);
        assert!(game.outcome().is_some_and(|p| p.is_over()));
    }

    #[test]
    fn test_zero_lives_falls_back_to_default() {
        let mut game = Game::new(vec![level(LOSE_PLAN)], &settings(0)).unwrap();
        assert_eq!(game.lives(), crate::consts::START_LIVES);

        let idle = InputSnapshot::default();
        assert_eq!(
            play_until_event(&mut game, &idle),
            Progress::LifeLost {
                lives: crate::consts::START_LIVES - 1
            }
        );
    }

    #[test]
    fn test_empty_game() {
        assert!(Game::new(Vec::new(), &Settings::default()).is_none());
    }
}
