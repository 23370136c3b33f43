//! Simulation error types
//!
//! Level construction and tick stepping are the only fallible operations.
//! Everything else (blocked moves, removals, status changes) is normal control
//! flow.

/// A level plan could not be turned into a grid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelFormatError {
    /// The plan contains no rows after trimming.
    #[error("level plan is empty")]
    Empty,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character outside the legend.
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },

    /// No `@` in the plan.
    #[error("level plan has no player spawn")]
    MissingPlayer,

    /// More than one `@` in the plan.
    #[error("level plan has {count} player spawns, expected exactly one")]
    MultiplePlayers { count: usize },
}

/// A world state could not be advanced.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum StepError {
    /// Δt was negative, NaN or infinite.
    #[error("invalid time step {0}: must be finite and non-negative")]
    InvalidDelta(f32),

    /// The actor list has no player to steer or collide against.
    #[error("world state has no player")]
    MissingPlayer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LevelFormatError::UnknownTile {
            ch: 'x',
            row: 2,
            col: 5,
        };
        assert_eq!(err.to_string(), "unknown tile 'x' at row 2, column 5");

        let err = StepError::InvalidDelta(-1.0);
        assert!(err.to_string().contains("-1"));
    }
}
