use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::Error;
use crate::special_moves::{self, CastleSide};
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank holding this side's king and rooks at the start.
    pub fn home_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// +1 if this side's pawns advance towards rank 8, -1 otherwise.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn pawn_start_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The rank a pawn of this color must stand on to capture en passant
    /// (the fifth rank from its own side).
    pub fn en_passant_rank(self) -> usize {
        match self {
            Color::White => 4,
            Color::Black => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Notation prefix. Pawns have none.
    pub fn letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    /// Kinds a pawn may be turned into.
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl FromStr for PieceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "pawn" => Ok(PieceKind::Pawn),
            "n" | "knight" => Ok(PieceKind::Knight),
            "b" | "bishop" => Ok(PieceKind::Bishop),
            "r" | "rook" => Ok(PieceKind::Rook),
            "q" | "queen" => Ok(PieceKind::Queen),
            "k" | "king" => Ok(PieceKind::King),
            _ => Err(Error::InvalidPieceKind(s.to_string())),
        }
    }
}

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// A piece on the board. `square` always names the cell holding it; the
/// board keeps the two in step on every relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    /// Only meaningful for kings and rooks.
    pub has_moved: bool,
    /// Only meaningful for pawns; true for the single ply after a double step.
    pub just_double_stepped: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
            just_double_stepped: false,
        }
    }

    /// Board-diagram character: upper case for White, lower case for Black.
    pub fn symbol(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Pseudo-legality against raw coordinates. The bounds check is the first
    /// gate, so anything off the board is simply `false`.
    pub fn pseudo_legal(&self, board: &Board, rank: i32, file: i32) -> bool {
        match Square::new(rank, file) {
            Some(to) => self.can_reach(board, to),
            None => false,
        }
    }

    /// Movement geometry plus occupancy rule, ignoring turn order and
    /// whether the move would expose this side's king.
    pub fn can_reach(&self, board: &Board, to: Square) -> bool {
        self.reaches(board, to, false)
    }

    /// Whether this piece could capture something standing on `to`. Pawns
    /// attack diagonally only and castling is never an attack; otherwise this
    /// is `can_reach` with the target treated as an enemy.
    pub fn attacks(&self, board: &Board, to: Square) -> bool {
        self.reaches(board, to, true)
    }

    fn reaches(&self, board: &Board, to: Square, capture_probe: bool) -> bool {
        if to == self.square {
            return false;
        }
        let dr = to.rank() as i32 - self.square.rank() as i32;
        let df = to.file() as i32 - self.square.file() as i32;

        match self.kind {
            PieceKind::Pawn => self.pawn_reaches(board, to, dr, df, capture_probe),
            PieceKind::Knight => {
                KNIGHT_OFFSETS.contains(&(dr, df)) && self.open_for(board, to, capture_probe)
            }
            PieceKind::Bishop => {
                dr.abs() == df.abs()
                    && self.ray_clear(board, dr, df)
                    && self.open_for(board, to, capture_probe)
            }
            PieceKind::Rook => {
                (dr == 0 || df == 0)
                    && self.ray_clear(board, dr, df)
                    && self.open_for(board, to, capture_probe)
            }
            PieceKind::Queen => {
                (dr == 0 || df == 0 || dr.abs() == df.abs())
                    && self.ray_clear(board, dr, df)
                    && self.open_for(board, to, capture_probe)
            }
            PieceKind::King => {
                if dr.abs() <= 1 && df.abs() <= 1 {
                    return self.open_for(board, to, capture_probe);
                }
                // A two-file shift along the home rank is the castling signal,
                // which only the resolver can judge.
                if !capture_probe
                    && dr == 0
                    && df.abs() == 2
                    && !self.has_moved
                    && self.square.rank() == self.color.home_rank()
                {
                    let side = if df > 0 { CastleSide::Kingside } else { CastleSide::Queenside };
                    return special_moves::can_castle(board, self, side);
                }
                false
            }
        }
    }

    fn pawn_reaches(&self, board: &Board, to: Square, dr: i32, df: i32, capture_probe: bool) -> bool {
        let dir = self.color.pawn_direction();
        if capture_probe {
            return dr == dir && df.abs() == 1;
        }

        let target = board.get(to);
        if df == 0 {
            if target.is_some() {
                return false;
            }
            if dr == dir {
                return true;
            }
            // Double step: from the start rank, through an empty cell.
            return dr == 2 * dir
                && self.square.rank() == self.color.pawn_start_rank()
                && self
                    .square
                    .offset(dir, 0)
                    .map(|mid| board.get(mid).is_none())
                    .unwrap_or(false);
        }

        // Ordinary diagonal capture. En passant is the resolver's business.
        df.abs() == 1 && dr == dir && target.map(|p| p.color != self.color).unwrap_or(false)
    }

    /// Destination is empty or holds an opponent.
    fn open_for(&self, board: &Board, to: Square, capture_probe: bool) -> bool {
        capture_probe || board.get(to).map(|p| p.color != self.color).unwrap_or(true)
    }

    /// Every cell strictly between `self.square` and the target along a
    /// straight line is empty. Callers have already checked the delta is a line.
    fn ray_clear(&self, board: &Board, dr: i32, df: i32) -> bool {
        let steps = dr.abs().max(df.abs());
        let (step_r, step_f) = (dr.signum(), df.signum());
        (1..steps).all(|i| {
            self.square
                .offset(step_r * i, step_f * i)
                .map(|sq| board.get(sq).is_none())
                .unwrap_or(false)
        })
    }
}
