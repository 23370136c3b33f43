//! Scripted input for headless runs
//!
//! A script is a JSON list of steps, each holding a set of keys for a number
//! of frames:
//!
//! ```json
//! [
//!   { "frames": 30, "keys": ["ArrowRight"] },
//!   { "frames": 5, "keys": ["ArrowRight", "ArrowUp"] },
//!   { "frames": 10 }
//! ]
//! ```
//!
//! The script repeats once it runs out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::sim::{InputSnapshot, Key, UnknownKey};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownKey(#[from] UnknownKey),

    #[error("script covers no frames")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct ScriptStep {
    frames: u32,
    #[serde(default)]
    keys: Vec<String>,
}

/// Repeating sequence of input snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct InputScript {
    steps: Vec<(u64, InputSnapshot)>,
    period: u64,
}

impl InputScript {
    /// The same input every frame
    pub fn hold(input: InputSnapshot) -> Self {
        Self {
            steps: vec![(1, input)],
            period: 1,
        }
    }

    pub fn parse(json: &str) -> Result<Self, ScriptError> {
        let raw: Vec<ScriptStep> = serde_json::from_str(json)?;
        let mut steps = Vec::with_capacity(raw.len());
        for step in raw {
            let keys = step
                .keys
                .iter()
                .map(|name| name.parse::<Key>())
                .collect::<Result<Vec<_>, _>>()?;
            if step.frames > 0 {
                steps.push((u64::from(step.frames), InputSnapshot::pressed(&keys)));
            }
        }

        let period: u64 = steps.iter().map(|(frames, _)| frames).sum();
        if period == 0 {
            return Err(ScriptError::Empty);
        }
        Ok(Self { steps, period })
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::parse(&json)?;
        log::info!(
            "Loaded input script {} ({} steps, {} frames)",
            path.display(),
            script.steps.len(),
            script.period
        );
        Ok(script)
    }

    /// Input for a 0-based frame number
    pub fn input_at(&self, frame: u64) -> InputSnapshot {
        let mut offset = frame % self.period;
        for (frames, input) in &self.steps {
            if offset < *frames {
                return *input;
            }
            offset -= frames;
        }
        InputSnapshot::default()
    }
}
