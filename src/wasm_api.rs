use crate::game::Game;
use log::warn;
use crate::notify::SubscriberId;
use crate::piece::PieceKind;
use crate::snapshot::GameSnapshot;
use crate::square::Square;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<GameSnapshot>,
    error: Option<String>,
}

fn square(row: usize, col: usize) -> Option<Square> {
    Square::new(row as i32, col as i32)
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn rejected(reason: &str) -> JsValue {
    to_js(&MoveResult {
        board_state: None,
        error: Some(reason.to_string()),
    })
}

#[wasm_bindgen(js_name = Game)]
pub struct WasmGame {
    game: Game,
    subscribers: Vec<Option<SubscriberId>>,
}

#[wasm_bindgen(js_class = Game)]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            game: Game::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&GameSnapshot::capture(&self.game))
    }

    pub fn make_move(&mut self, from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> JsValue {
        let (from, to) = match (square(from_row, from_col), square(to_row, to_col)) {
            (Some(from), Some(to)) => (from, to),
            _ => return rejected("Square off the board"),
        };
        if self.game.try_move(from, to) {
            to_js(&GameSnapshot::capture(&self.game))
        } else {
            rejected("Illegal move")
        }
    }

    /// `piece` is "Queen", "Rook", "Bishop" or "Knight"; anything else is ignored.
    pub fn promote(&mut self, row: usize, col: usize, piece: &str) {
        if let (Some(sq), Ok(kind)) = (square(row, col), piece.parse::<PieceKind>()) {
            self.game.promote(sq, kind);
        }
    }

    pub fn get_legal_moves_for_square(&self, row: usize, col: usize) -> JsValue {
        let destinations: Vec<[usize; 2]> = square(row, col)
            .map(|from| self.game.legal_destinations(from))
            .unwrap_or_default()
            .iter()
            .map(|sq| [sq.rank(), sq.file()])
            .collect();
        to_js(&destinations)
    }

    pub fn notation(&self) -> String {
        self.game.notation()
    }

    /// Registers a zero-argument JS callback run after every change.
    /// Returns a handle for `unsubscribe`.
    pub fn subscribe(&mut self, callback: js_sys::Function) -> usize {
        let id = self.game.subscribe(move || {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                warn!("JS subscriber threw: {:?}", err);
            }
        });
        self.subscribers.push(Some(id));
        self.subscribers.len() - 1
    }

    pub fn unsubscribe(&mut self, handle: usize) -> bool {
        match self.subscribers.get_mut(handle).and_then(Option::take) {
            Some(id) => self.game.unsubscribe(id),
            None => false,
        }
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
