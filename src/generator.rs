use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::config::{BoardConfig, ConfigError};
use crate::tile::{KindID, Tile};

/// Draw the kinds of every tile, two at a time.
///
/// Kinds are drawn without replacement from a pool which is refilled once exhausted, so the kinds are spread as evenly as the tile count allows.
fn draw_kinds<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Vec<KindID> {
    let total = config.tile_count();
    let mut kinds = Vec::with_capacity(total);
    let mut pool: Vec<KindID> = Vec::with_capacity(config.kinds.len());

    while kinds.len() < total {
        if pool.is_empty() {
            pool.extend(0..config.kinds.len());
        }
        let kind = pool.swap_remove(rng.gen_range(0..pool.len()));
        kinds.push(kind);
        kinds.push(kind);
    }

    kinds
}

/// Generate a board with every tile occupied, as laid out at the start of a round.
///
/// Every kind appears an even number of times and positions are shuffled uniformly at random.
pub fn generate<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<Board, ConfigError> {
    config.validate()?;

    let mut kinds = draw_kinds(config, rng);
    kinds.shuffle(rng);

    let tiles = Array2::from_shape_vec(
        (config.rows, config.cols),
        kinds.into_iter().map(|kind| Tile::Occupied { kind }).collect_vec(),
    ).map_err(|_| ConfigError::EmptyBoard)?;

    debug!("generated {}x{} board with {} kinds", config.rows, config.cols, config.kinds.len());
    Board::from_tiles(tiles, config.kinds.clone()).ok_or(ConfigError::EmptyBoard)
}
