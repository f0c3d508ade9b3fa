//! Bindings for a JavaScript front end, enabled by the `wasm` feature.

use itertools::Itertools;
use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::builder::BoardBuilder;
use crate::config::BoardConfig;
use crate::generator::generate;
use crate::location::{Coord, Location};

/// A [`Board`] handed to JavaScript.
#[wasm_bindgen]
pub struct WasmBoard {
    board: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Build a board from an ASCII layout as accepted by [`BoardBuilder::parse`].
    #[wasm_bindgen(constructor)]
    pub fn new(layout: &str) -> Result<WasmBoard, JsError> {
        BoardBuilder::parse(layout)
            .build()
            .map(|board| Self { board })
            .map_err(|reasons| JsError::new(&reasons.iter().join("; ")))
    }

    /// Generate a random board of the default size and kinds.
    pub fn generate() -> Result<WasmBoard, JsError> {
        generate(&BoardConfig::default(), &mut rand::thread_rng())
            .map(|board| Self { board })
            .map_err(|error| JsError::new(&error.to_string()))
    }

    pub fn rows(&self) -> usize {
        self.board.dims().0.get()
    }

    pub fn cols(&self) -> usize {
        self.board.dims().1.get()
    }

    /// The display character of the tile at `(row, col)`, or `undefined` if it is cleared.
    #[wasm_bindgen(js_name = kindAt)]
    pub fn kind_at(&self, row: i32, col: i32) -> Option<String> {
        self.board.kind_at(location(row, col))
            .and_then(|kind| self.board.display_of(kind))
            .map(String::from)
    }

    pub fn clear(&mut self, row: i32, col: i32) -> bool {
        self.board.clear(location(row, col))
    }

    pub fn remaining(&self) -> usize {
        self.board.remaining()
    }

    /// The connection between two tiles as an array of `[row, col]` pairs, or `null` if they cannot be connected.
    #[wasm_bindgen(js_name = findConnection)]
    pub fn find_connection(&self, start_row: i32, start_col: i32, end_row: i32, end_col: i32) -> Result<JsValue, JsError> {
        let path = self.board
            .find_connection(location(start_row, start_col), location(end_row, end_col))
            .map_err(|failure| JsError::new(&failure.to_string()))?;

        Ok(match path {
            None => JsValue::NULL,
            Some(path) => {
                let out = Array::new();
                for Location(row, col) in path.iter() {
                    out.push(&Array::of2(&JsValue::from(*row as i32), &JsValue::from(*col as i32)));
                }
                out.into()
            }
        })
    }

    /// Draw the connection between two tiles over the board, or return `undefined` if there is none.
    #[wasm_bindgen(js_name = renderConnection)]
    pub fn render_connection(&self, start_row: i32, start_col: i32, end_row: i32, end_col: i32) -> Option<String> {
        self.board
            .find_connection(location(start_row, start_col), location(end_row, end_col))
            .ok()
            .flatten()
            .map(|path| self.board.render_path(&path))
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_display_string(&self) -> String {
        self.board.to_string()
    }
}

fn location(row: i32, col: i32) -> Location {
    Location(row as Coord, col as Coord)
}
