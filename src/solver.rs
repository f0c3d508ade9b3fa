use std::collections::{HashMap, VecDeque};

use log::{debug, trace};
use strum::VariantArray;
use thiserror::Error;

use crate::board::Board;
use crate::location::Location;
use crate::path::Path;
use crate::shape::{Axis, SquareStep};

/// The most turns a connection may take. Tiles needing more turns cannot be matched.
pub const MAX_TURNS: u8 = 3;

/// Reasons a [`ConnectionSolver`] may refuse to search.
///
/// Each is a mistake by the caller; a search which simply finds nothing is not a failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Both endpoints are the same tile.
    #[error("cannot connect {0} to itself")]
    SameLocation(Location),
    /// An endpoint is not a tile on the board.
    #[error("{0} is not on the board")]
    OutOfBounds(Location),
    /// An endpoint has already been cleared.
    #[error("the tile at {0} has already been cleared")]
    AlreadyCleared(Location),
}

// one per (location, arrival axis, turns) triple
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
struct SearchKey {
    location: Location,
    axis: Option<Axis>,
    turns: u8,
}

#[derive(Copy, Clone, Debug)]
struct SearchNode {
    location: Location,
    // None only at the start, which has no direction of arrival
    axis: Option<Axis>,
    turns: u8,
    // cells on the path so far, both ends included
    cells: usize,
    parent: Option<usize>,
}

impl From<&SearchNode> for SearchKey {
    fn from(node: &SearchNode) -> Self {
        Self {
            location: node.location,
            axis: node.axis,
            turns: node.turns,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Arrival {
    // the node from which the final straight segment leaves
    from: usize,
    turns: u8,
    cells: usize,
}

/// Breadth-first search for the connection between two tiles with the fewest turns, then the fewest cells.
/// Use [`Self::solve`] to search.
///
/// The search moves in straight segments through passable cells, charging a turn whenever a segment changes axis.
/// It is retried with a turn budget of 0, 1, 2 and finally [`MAX_TURNS`], and the first budget yielding any path wins.
pub struct ConnectionSolver<'a> {
    board: &'a Board,
}

impl<'a> From<&'a Board> for ConnectionSolver<'a> {
    fn from(board: &'a Board) -> Self {
        Self { board }
    }
}

impl ConnectionSolver<'_> {
    fn check_endpoint(&self, location: Location) -> Result<(), SolverFailure> {
        if !self.board.contains(location) {
            return Err(SolverFailure::OutOfBounds(location));
        }
        if self.board.is_cleared(location) {
            return Err(SolverFailure::AlreadyCleared(location));
        }
        Ok(())
    }

    /// Find the connection from `start` to `end`, returning [`Ok`] with the path if one exists within [`MAX_TURNS`] turns,
    /// `Ok(None)` if not, or [`Err`] with a [`SolverFailure`] if the endpoints are unsuitable.
    ///
    /// The board is not modified.
    pub fn solve(&self, start: Location, end: Location) -> Result<Option<Path>, SolverFailure> {
        if start == end {
            return Err(SolverFailure::SameLocation(start));
        }
        self.check_endpoint(start)?;
        self.check_endpoint(end)?;

        for budget in 0..=MAX_TURNS {
            if let Some(path) = self.search(start, end, budget) {
                debug!("connected {} to {} in {} cells with budget {}", start, end, path.len(), budget);
                return Ok(Some(path));
            }
        }

        debug!("no connection from {} to {} within {} turns", start, end, MAX_TURNS);
        Ok(None)
    }

    fn search(&self, start: Location, end: Location, max_turns: u8) -> Option<Path> {
        let mut nodes = vec![SearchNode {
            location: start,
            axis: None,
            turns: 0,
            cells: 1,
            parent: None,
        }];
        let mut best_cells: HashMap<SearchKey, usize> = HashMap::new();
        best_cells.insert(SearchKey::from(&nodes[0]), 1);
        let mut frontier = VecDeque::from([0]);
        let mut found: Option<Arrival> = None;

        while let Some(index) = frontier.pop_front() {
            let current = nodes[index];

            // superseded by a cheaper arrival at the same state
            if best_cells.get(&SearchKey::from(&current)).is_some_and(|best| *best < current.cells) {
                continue;
            }
            // extending can only lengthen the path
            if found.is_some_and(|arrival| current.cells >= arrival.cells) {
                continue;
            }

            for step in SquareStep::VARIANTS {
                let axis = step.axis();
                let turns = match current.axis {
                    Some(previous) if previous != axis => current.turns + 1,
                    _ => current.turns,
                };
                if turns > max_turns {
                    continue;
                }

                let mut location = current.location;
                let mut cells = current.cells;
                loop {
                    location = step.attempt_from(location);
                    if !self.board.in_extended(location) {
                        break;
                    }
                    cells += 1;

                    if location == end {
                        let better = found.map_or(true, |arrival| (turns, cells) < (arrival.turns, arrival.cells));
                        if better {
                            found = Some(Arrival { from: index, turns, cells });
                        }
                        break;
                    }

                    if !self.board.is_passable(location) {
                        break;
                    }

                    let key = SearchKey { location, axis: Some(axis), turns };
                    if best_cells.get(&key).map_or(true, |best| cells < *best) {
                        best_cells.insert(key, cells);
                        nodes.push(SearchNode {
                            location,
                            axis: Some(axis),
                            turns,
                            cells,
                            parent: Some(index),
                        });
                        frontier.push_back(nodes.len() - 1);
                    }
                }
            }
        }

        trace!("budget {} from {} to {}: {} states expanded", max_turns, start, end, nodes.len());

        found.map(|arrival| {
            let mut waypoints = vec![end];
            let mut cursor = Some(arrival.from);
            while let Some(index) = cursor {
                waypoints.push(nodes[index].location);
                cursor = nodes[index].parent;
            }
            waypoints.reverse();

            Path::through(&waypoints)
        })
    }
}
