use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::location::{Coord, Dimension, Location};
use crate::path::Path;
use crate::solver::{ConnectionSolver, SolverFailure};
use crate::tile::{KindID, Tile};

/// A board of square tiles, each either occupied by a tile of some kind or cleared.
///
/// Paths may travel through cleared tiles and through the ring of cells one step outside the board on every side.
/// Once cleared, a tile is never occupied again.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder) or [`generate`](crate::generator::generate)d.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) tiles: Array2<Tile>,
    // rows, cols
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) kind_displays: Vec<char>,
    pub(crate) remaining: usize,
}

impl Board {
    pub(crate) fn from_tiles(tiles: Array2<Tile>, kind_displays: Vec<char>) -> Option<Self> {
        let (rows, cols) = tiles.dim();
        let dims = (Dimension::new(rows)?, Dimension::new(cols)?);
        let remaining = tiles.iter().filter(|tile| tile.is_occupied()).count();

        Some(Self {
            tiles,
            dims,
            kind_displays,
            remaining,
        })
    }

    /// The dimensions of this board, in `(rows, cols)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    #[inline]
    fn rows(&self) -> Coord {
        self.dims.0.get() as Coord
    }

    #[inline]
    fn cols(&self) -> Coord {
        self.dims.1.get() as Coord
    }

    /// Whether `location` names a tile on this board.
    pub fn contains(&self, location: Location) -> bool {
        (0..self.rows()).contains(&location.0) && (0..self.cols()).contains(&location.1)
    }

    /// Whether `location` is on this board or in the ring of cells one step beyond its border.
    pub fn in_extended(&self, location: Location) -> bool {
        (-1..=self.rows()).contains(&location.0) && (-1..=self.cols()).contains(&location.1)
    }

    #[inline]
    fn tile(&self, location: Location) -> Option<&Tile> {
        if !self.contains(location) {
            return None;
        }
        self.tiles.get(location.as_index()?)
    }

    /// Whether a path may travel through `location`.
    ///
    /// Cells in the ring outside the board are always passable, as are cleared tiles.
    /// Occupied tiles and anything further than one step outside the board are not.
    pub fn is_passable(&self, location: Location) -> bool {
        match self.tile(location) {
            Some(tile) => !tile.is_occupied(),
            None => self.in_extended(location),
        }
    }

    /// The kind of the tile at `location`, or [`None`] if the tile has been cleared or is not on the board.
    pub fn kind_at(&self, location: Location) -> Option<KindID> {
        self.tile(location).and_then(Tile::kind)
    }

    /// Whether `location` is on the board and holds no tile.
    pub fn is_cleared(&self, location: Location) -> bool {
        self.tile(location).is_some_and(|tile| !tile.is_occupied())
    }

    /// The character used to display tiles of `kind`.
    pub fn display_of(&self, kind: KindID) -> Option<char> {
        self.kind_displays.get(kind).copied()
    }

    /// Clear the tile at `location`, returning whether it was occupied beforehand.
    ///
    /// Clearing an already cleared tile, or a location off the board, does nothing.
    pub fn clear(&mut self, location: Location) -> bool {
        if !self.contains(location) {
            return false;
        }
        let Some(tile) = location.as_index().and_then(|index| self.tiles.get_mut(index)) else {
            return false;
        };

        match *tile {
            Tile::Occupied { .. } => {
                *tile = Tile::Matched;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// The number of tiles not yet cleared.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// The number of tiles placed on this board at the start of the round, cleared or not.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !matches!(tile, Tile::Empty)).count()
    }

    /// Whether every tile has been cleared.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Find the connection from `start` to `end` with the fewest turns, then the fewest cells, deferring to a [`ConnectionSolver`].
    ///
    /// Returns `Ok(None)` if the two tiles cannot be joined within [`MAX_TURNS`](crate::MAX_TURNS) turns.
    /// The kinds of the two tiles are not compared.
    pub fn find_connection(&self, start: Location, end: Location) -> Result<Option<Path>, SolverFailure> {
        ConnectionSolver::from(self).solve(start, end)
    }

    /// Whether the tiles at `start` and `end` can be joined at all.
    pub fn is_connectable(&self, start: Location, end: Location) -> bool {
        matches!(self.find_connection(start, end), Ok(Some(_)))
    }

    fn display_tile(&self, tile: &Tile) -> char {
        match tile {
            Tile::Occupied { kind } => self.display_of(*kind).unwrap_or('?'),
            Tile::Matched | Tile::Empty => '.',
        }
    }

    /// Draw `path` over this board, including the ring of cells outside it.
    ///
    /// Path cells are drawn as `*`, except the endpoints, which keep their tile, and the turn points, which are numbered in order.
    pub fn render_path(&self, path: &Path) -> String {
        let turn_points = path.turn_points();
        let width = self.dims.1.get() + 2;
        let mut out = String::with_capacity((self.dims.0.get() + 2) * (width + 1));

        for row in -1..=self.rows() {
            for col in -1..=self.cols() {
                let location = Location(row, col);
                let tile = self.tile(location);

                let display = if location == path.start() || location == path.end() {
                    tile.map_or('.', |tile| self.display_tile(tile))
                } else if let Some(index) = turn_points.iter().position(|point| *point == location) {
                    char::from_digit(index as u32 + 1, 10).unwrap_or('+')
                } else if path.locations().contains(&location) {
                    '*'
                } else {
                    tile.map_or('.', |tile| self.display_tile(tile))
                };

                out.push(display);
            }
            out.push('\n');
        }

        out
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.tiles.nrows() * (self.tiles.ncols() + 1));

        for row in self.tiles.rows() {
            for tile in row {
                out.push(self.display_tile(tile));
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
