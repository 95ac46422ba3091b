use serde::Serialize;

use crate::game::Game;
use crate::piece::{Color, PieceKind};
use crate::square::Square;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SquarePiece {
    pub kind: PieceKind,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

/// Read-only picture of a game for a view layer. Built fresh after every
/// change notification rather than patched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// `squares[rank][file]`, rank 0 first.
    pub squares: Vec<Vec<Option<SquarePiece>>>,
    pub side_to_move: Color,
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub move_number: usize,
    pub notation: String,
    pub last_move: Option<LastMove>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        let squares = (0..8)
            .map(|rank| {
                (0..8)
                    .map(|file| {
                        game.board().at(rank, file).map(|p| SquarePiece {
                            kind: p.kind,
                            color: p.color,
                        })
                    })
                    .collect()
            })
            .collect();

        let status = game.status();
        GameSnapshot {
            squares,
            side_to_move: status.side_to_move,
            in_check: status.in_check,
            checkmate: status.checkmate,
            stalemate: status.stalemate,
            move_number: status.move_number,
            notation: game.notation(),
            last_move: game.history().last().map(|r| LastMove {
                from: r.from,
                to: r.to,
            }),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
