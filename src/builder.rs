use std::collections::HashMap;
use std::num::NonZero;

use itertools::Itertools;
use ndarray::Array2;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::location::{Dimension, Location};
use crate::tile::{KindID, Tile};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A tile was placed outside the bounds specified by `dims` on a builder.
    #[error("{0} is outside the board")]
    FeatureOutOfBounds(Location),
    /// A tile was placed where another tile already is.
    #[error("{0} already holds a tile")]
    LocationTaken(Location),
    /// A parsed layout holds an odd number of tiles of this kind, so they cannot all be matched.
    #[error("kind {0:?} appears an odd number of times")]
    UnpairedKind(char),
    /// A parsed layout has rows of differing lengths.
    #[error("row {0} has a different length from the first row")]
    RaggedRow(usize),
    /// A parsed layout has no tiles at all.
    #[error("layout is empty")]
    EmptyLayout,
}

/// A builder for rectangular boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Tiles are only ever added in same-kind pairs, so every kind on a built board can in principle be cleared.
#[derive(Clone)]
pub struct BoardBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    kind_displays: Vec<char>,
    pairs: Vec<(KindID, UnorderedPair<Location>)>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(6).unwrap(), NonZero::new(6).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(rows, cols)` order.
    /// Every tile starts out cleared.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            kind_displays: Default::default(),
            pairs: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Construct a builder from an ASCII layout, one line per row.
    /// `.` is a cleared tile and any other character is a tile of the kind displayed by that character.
    ///
    /// Tiles of each kind are paired in reading order.
    /// The builder is invalid if rows differ in length, if the layout is empty, or if any kind appears an odd number of times.
    pub fn parse(layout: &str) -> Self {
        let rows = layout.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect_vec();
        let cols = rows.first().map_or(0, |row| row.chars().count());

        let (Some(row_dim), Some(col_dim)) = (NonZero::new(rows.len()), NonZero::new(cols)) else {
            let mut builder = Self::default();
            builder.invalid_reasons.push(BuilderInvalidReason::EmptyLayout);
            return builder;
        };
        let mut builder = Self::with_dims((row_dim, col_dim));

        let mut by_display: HashMap<char, Vec<Location>> = HashMap::new();
        let mut display_order = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != cols {
                builder.invalid_reasons.push(BuilderInvalidReason::RaggedRow(row));
                continue;
            }
            for (col, display) in line.chars().enumerate() {
                if display == '.' {
                    continue;
                }
                by_display.entry(display)
                    .or_insert_with(|| {
                        display_order.push(display);
                        Vec::new()
                    })
                    .push(Location::from((row, col)));
            }
        }

        for display in display_order {
            let locations = &by_display[&display];
            if locations.len() % 2 != 0 {
                builder.invalid_reasons.push(BuilderInvalidReason::UnpairedKind(display));
                continue;
            }
            for (a, b) in locations.iter().tuples() {
                builder.add_pair(display, (*a, *b));
            }
        }

        builder
    }

    #[inline]
    fn contains(&self, location: Location) -> bool {
        location.as_index()
            .is_some_and(|(row, col)| row < self.dims.0.get() && col < self.dims.1.get())
    }

    fn is_taken(&self, location: Location) -> bool {
        self.pairs.iter().any(|(_, UnorderedPair(a, b))| *a == location || *b == location)
    }

    /// Add a pair of tiles of the kind displayed as `display`. The order in which `locations` are specified does not matter.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either location is out of bounds,
    /// or a [`LocationTaken`](BuilderInvalidReason::LocationTaken) invalid state if either location already holds a tile.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_pair(&mut self, display: char, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !self.contains(location) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds(location));
                return self;
            }
            if self.is_taken(location) {
                self.invalid_reasons.push(BuilderInvalidReason::LocationTaken(location));
                return self;
            }
        }
        if locations.0 == locations.1 {
            self.invalid_reasons.push(BuilderInvalidReason::LocationTaken(locations.1));
            return self;
        }

        let kind = match self.kind_displays.iter().position(|known| *known == display) {
            Some(kind) => kind,
            None => {
                self.kind_displays.push(display);
                self.kind_displays.len() - 1
            }
        };
        self.pairs.push((kind, UnorderedPair(locations.0, locations.1)));

        self
    }

    /// Remove the most recently added pair of tiles.
    ///
    /// If the builder is in an invalid state or no pairs are present, this function does nothing.
    pub fn pop_pair(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some((kind, _)) = self.pairs.pop() {
            // forget the kind too if that was its last pair, so displays stay dense
            if kind == self.kind_displays.len() - 1 && self.pairs.iter().all(|(other, _)| *other != kind) {
                self.kind_displays.pop();
            }
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut tiles = Array2::from_elem((self.dims.0.get(), self.dims.1.get()), Tile::Empty);
        for (kind, UnorderedPair(a, b)) in &self.pairs {
            for location in [a, b] {
                if let Some(tile) = location.as_index().and_then(|index| tiles.get_mut(index)) {
                    *tile = Tile::Occupied { kind: *kind };
                }
            }
        }

        // the dimensions are nonzero, so this always succeeds
        Board::from_tiles(tiles, self.kind_displays.clone()).ok_or(&self.invalid_reasons)
    }
}
