use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;

use crate::location::Location;
use crate::shape::SquareStep;

/// A connection between two tiles: an ordered sequence of at least two [`Location`]s, each one unit step from the last.
///
/// A path may pass through the ring of cells just outside the board.
/// Paths are produced by [`Board::find_connection`](crate::Board::find_connection) and are never stored on the board.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Path(Vec<Location>);

impl Path {
    /// Walk straight from each waypoint to the next. Consecutive waypoints must share a row or a column.
    pub(crate) fn through(waypoints: &[Location]) -> Self {
        let mut locations = Vec::with_capacity(waypoints.len() * 2);
        locations.extend(waypoints.first().copied());

        for (from, to) in waypoints.iter().tuple_windows() {
            debug_assert!(from.0 == to.0 || from.1 == to.1);
            let mut current = *from;
            while current != *to {
                current = current.offset_by(((to.0 - current.0).signum(), (to.1 - current.1).signum()));
                locations.push(current);
            }
        }

        Self(locations)
    }

    /// The locations of this path, from the first selected tile to the second.
    pub fn locations(&self) -> &[Location] {
        &self.0
    }

    pub fn iter(&self) -> Iter<'_, Location> {
        self.0.iter()
    }

    /// The number of cells on this path, endpoints included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a path holds at least its two endpoints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self) -> Location {
        self.0[0]
    }

    pub fn end(&self) -> Location {
        self.0[self.0.len() - 1]
    }

    /// The unit steps taken along this path.
    pub fn steps(&self) -> impl Iterator<Item = SquareStep> + '_ {
        self.0.iter()
            .tuple_windows()
            .filter_map(|(a, b)| SquareStep::direction_to(*a, *b))
    }

    /// The number of times this path changes axis.
    pub fn turns(&self) -> usize {
        self.steps()
            .tuple_windows()
            .filter(|(a, b)| a.axis() != b.axis())
            .count()
    }

    /// The locations at which this path changes axis, in order. These are the points the game numbers when drawing a connection.
    pub fn turn_points(&self) -> Vec<Location> {
        self.0.iter()
            .tuple_windows()
            .filter(|(a, b, c)| {
                let before = SquareStep::direction_to(**a, **b).map(|step| step.axis());
                let after = SquareStep::direction_to(**b, **c).map(|step| step.axis());
                before != after
            })
            .map(|(_, b, _)| *b)
            .collect_vec()
    }

    /// The same connection walked from the other end.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect_vec())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Location;
    type IntoIter = Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" -> "))
    }
}
