use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = isize;
pub(crate) type Dimension = NonZero<usize>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a board. The top left tile is `Location(0, 0)`.
///
/// Coordinates are signed so that the ring of cells just outside the board, where paths may travel, can be named.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The array index of this location, if it has no negative component.
    pub(crate) fn as_index(&self) -> Option<(Ix, Ix)> {
        Some((usize::try_from(self.0).ok()?, usize::try_from(self.1).ok()?))
    }

    pub(crate) fn offset_by(self, rhs: (Coord, Coord)) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }

    /// Whether `self` and `other` are one unit step apart.
    pub fn is_adjacent_to(&self, other: Location) -> bool {
        (self.0 - other.0).abs() + (self.1 - other.1).abs() == 1
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        // boards are far smaller than isize::MAX in either dimension
        Self(value.0 as Coord, value.1 as Coord)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
