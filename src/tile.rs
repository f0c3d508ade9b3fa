/// Identifies the kind (icon) of a tile. Kinds index into the display table of their [`Board`](crate::Board).
pub type KindID = usize;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Tile {
    Occupied { kind: KindID },
    // cleared by a match
    Matched,
    #[default]
    Empty,
}

impl Tile {
    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    #[inline]
    pub(crate) fn kind(&self) -> Option<KindID> {
        match self {
            Self::Occupied { kind } => Some(*kind),
            _ => None,
        }
    }
}
