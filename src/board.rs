use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// 8x8 grid of optional pieces, indexed `squares[rank][file]`.
/// Pure storage: no legality logic lives here beyond the attack test, which
/// only asks each piece's own movement rule.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard initial position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            let home = color.home_rank() as i32;
            let pawns = color.pawn_start_rank() as i32;
            for (file, kind) in BACK_RANK.iter().enumerate() {
                if let Some(sq) = Square::new(home, file as i32) {
                    board.place(sq, Some(Piece::new(*kind, color, sq)));
                }
                if let Some(sq) = Square::new(pawns, file as i32) {
                    board.place(sq, Some(Piece::new(PieceKind::Pawn, color, sq)));
                }
            }
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank()][sq.file()]
    }

    /// Lookup by raw coordinates; anything off the board holds no piece.
    pub fn at(&self, rank: i32, file: i32) -> Option<Piece> {
        Square::new(rank, file).and_then(|sq| self.get(sq))
    }

    pub(crate) fn get_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.squares[sq.rank()][sq.file()].as_mut()
    }

    /// Write a piece (or clear the cell). A placed piece takes `sq` as its square.
    pub fn place(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.rank()][sq.file()] = piece.map(|mut p| {
            p.square = sq;
            p
        });
    }

    /// Move whatever stands on `from` to `to`, unconditionally overwriting the
    /// destination. The overwritten occupant is handed back so callers that
    /// need to restore it can keep it. An empty `from` changes nothing.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = match self.squares[from.rank()][from.file()].take() {
            Some(p) => p,
            None => return None,
        };
        let displaced = self.get(to);
        self.place(to, Some(piece));
        displaced
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|p| *p)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    /// Setup sanity check: at most one king per color.
    pub fn kings_are_unique(&self) -> bool {
        [Color::White, Color::Black].iter().all(|&color| {
            self.pieces_of(color)
                .filter(|p| p.kind == PieceKind::King)
                .count()
                <= 1
        })
    }

    /// Whether any piece of `attacker` could capture on `sq`.
    pub fn is_square_attacked_by(&self, sq: Square, attacker: Color) -> bool {
        self.pieces_of(attacker).any(|p| p.attacks(self, sq))
    }

    /// A side without a king on the board is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => self.is_square_attacked_by(king, color.opposite()),
            None => false,
        }
    }

    /// Drop every pawn's en passant eligibility.
    pub fn clear_double_steps(&mut self) {
        for piece in self.squares.iter_mut().flatten().flatten() {
            piece.just_double_stepped = false;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            let row: Vec<String> = (0..8)
                .map(|file| {
                    self.squares[rank][file]
                        .map(|p| p.symbol())
                        .unwrap_or('.')
                        .to_string()
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
