//! Serialized adjudication of the pairs a player selects.
//!
//! A player may keep selecting tiles while earlier pairs are still being judged.
//! Selected pairs wait in a first-in, first-out queue and are resolved one at a time:
//! each resolution runs its connection search and clears its tiles before the next pair is looked at,
//! so no search ever runs against a board that is about to change underneath it.

use std::collections::VecDeque;

use log::{debug, info, warn};
use rand::Rng;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::config::{BoardConfig, ConfigError};
use crate::generator::generate;
use crate::location::Location;
use crate::path::Path;
use crate::solver::SolverFailure;

/// What became of a selected tile.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    /// The location is off the board, already cleared, waiting to be resolved, or already held.
    Ignored,
    /// The first tile of a pair; held until a second is selected.
    Held(Location),
    /// The second tile of a pair; the pair has joined the resolution queue.
    Queued { first: Location, second: Location },
}

/// Why a pair was not matched.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mismatch {
    DifferentKinds,
    /// The tiles are of the same kind but need more than [`MAX_TURNS`](crate::MAX_TURNS) turns to connect.
    NoConnection,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The tiles were connected by `path` and have been cleared.
    Matched { path: Path },
    Mismatched(Mismatch),
    /// The pair could not be searched at all. This indicates a bookkeeping error and is logged.
    Rejected(SolverFailure),
}

/// The adjudication of a single selected pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub first: Location,
    pub second: Location,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        matches!(self.outcome, Outcome::Matched { .. })
    }
}

/// One round of the game: the board together with the player's pending selections.
///
/// The game is the only writer of its board; every resolution borrows it mutably, so resolutions never overlap.
pub struct Game {
    board: Board,
    held: Option<Location>,
    pending: VecDeque<UnorderedPair<Location>>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            held: None,
            pending: VecDeque::new(),
        }
    }

    /// Start a round on a freshly generated board.
    pub fn generate<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<Self, ConfigError> {
        generate(config, rng).map(Self::new)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The tile selected as the first of a pair, if any.
    pub fn held(&self) -> Option<Location> {
        self.held
    }

    /// The number of pairs waiting to be resolved.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn is_pending(&self, location: Location) -> bool {
        self.pending.iter().any(|UnorderedPair(a, b)| *a == location || *b == location)
    }

    /// Select the tile at `location`.
    ///
    /// Every second accepted selection completes a pair, which is queued for [`resolve_next`](Self::resolve_next).
    /// Selection may continue while pairs are pending; tiles already in a pending pair cannot be selected again.
    pub fn select(&mut self, location: Location) -> Selection {
        if !self.board.contains(location)
            || self.board.is_cleared(location)
            || self.is_pending(location)
            || self.held == Some(location) {
            return Selection::Ignored;
        }

        match self.held.take() {
            None => {
                self.held = Some(location);
                Selection::Held(location)
            }
            Some(first) => {
                self.pending.push_back(UnorderedPair(first, location));
                debug!("queued {} and {}; {} pending", first, location, self.pending.len());
                Selection::Queued { first, second: location }
            }
        }
    }

    /// Drop the held tile, if any, without queueing it.
    pub fn deselect(&mut self) -> Option<Location> {
        self.held.take()
    }

    /// Resolve the oldest pending pair, clearing both tiles if they match.
    ///
    /// Returns [`None`] if nothing is pending.
    pub fn resolve_next(&mut self) -> Option<Resolution> {
        let UnorderedPair(first, second) = self.pending.pop_front()?;
        let outcome = self.adjudicate(first, second);

        match &outcome {
            Outcome::Matched { path } => {
                info!("matched {} and {} with {} turns; {} tiles remain", first, second, path.turns(), self.board.remaining());
            }
            Outcome::Mismatched(reason) => debug!("{} and {} do not match: {:?}", first, second, reason),
            Outcome::Rejected(failure) => warn!("rejected pair {} and {}: {}", first, second, failure),
        }

        Some(Resolution { first, second, outcome })
    }

    fn adjudicate(&mut self, first: Location, second: Location) -> Outcome {
        // a missing kind is reported by the solver's precondition checks below
        if let (Some(kind_a), Some(kind_b)) = (self.board.kind_at(first), self.board.kind_at(second)) {
            if kind_a != kind_b {
                return Outcome::Mismatched(Mismatch::DifferentKinds);
            }
        }

        match self.board.find_connection(first, second) {
            Ok(Some(path)) => {
                self.board.clear(first);
                self.board.clear(second);
                Outcome::Matched { path }
            }
            Ok(None) => Outcome::Mismatched(Mismatch::NoConnection),
            Err(failure) => Outcome::Rejected(failure),
        }
    }

    /// Resolve every pending pair, oldest first.
    pub fn resolve_all(&mut self) -> Vec<Resolution> {
        std::iter::from_fn(|| self.resolve_next()).collect()
    }

    /// The share of tiles cleared so far, as a whole percentage rounded down.
    pub fn progress(&self) -> u8 {
        let total = self.board.tile_count();
        if total == 0 {
            return 100;
        }
        ((total - self.board.remaining()) * 100 / total) as u8
    }

    /// Whether every tile has been cleared.
    pub fn is_won(&self) -> bool {
        self.board.is_complete()
    }
}
