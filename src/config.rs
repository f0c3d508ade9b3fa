use std::collections::HashSet;

use thiserror::Error;

/// Reasons a [`BoardConfig`] cannot produce a board.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("a board needs at least one row and one column")]
    EmptyBoard,
    /// Tiles come in pairs, so a board with an odd number of tiles can never be cleared.
    #[error("{rows}x{cols} board holds an odd number of tiles")]
    OddTileCount { rows: usize, cols: usize },
    #[error("at least one tile kind is required")]
    NoKinds,
    #[error("kind {0:?} is listed more than once")]
    DuplicateKind(char),
    /// `.` displays cleared tiles.
    #[error("{0:?} cannot display a tile kind")]
    ReservedDisplay(char),
}

/// Parameters for [`generate`](crate::generator::generate)-ing a random board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// The display character of every kind of tile which may appear.
    pub kinds: Vec<char>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            kinds: ('A'..='H').collect(),
        }
    }
}

impl BoardConfig {
    pub fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check that a board can be generated from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.tile_count() % 2 != 0 {
            return Err(ConfigError::OddTileCount { rows: self.rows, cols: self.cols });
        }
        if self.kinds.is_empty() {
            return Err(ConfigError::NoKinds);
        }

        let mut seen = HashSet::with_capacity(self.kinds.len());
        for kind in &self.kinds {
            if *kind == '.' {
                return Err(ConfigError::ReservedDisplay(*kind));
            }
            if !seen.insert(*kind) {
                return Err(ConfigError::DuplicateKind(*kind));
            }
        }

        Ok(())
    }
}
