// =============================================================================
// Castling and en passant
//
// Both moves depend on history a single piece's movement rule cannot see
// (has-moved flags, the opponent's last double step), so they are judged and
// performed here rather than in `Piece::can_reach`. Everything is stateless:
// the board is the only input.
// =============================================================================

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Side implied by the king's file shift.
    pub fn from_shift(df: i32) -> CastleSide {
        if df > 0 {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        }
    }

    fn direction(self) -> i32 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    pub fn rook_file(self) -> usize {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            CastleSide::Kingside => "O-O",
            CastleSide::Queenside => "O-O-O",
        }
    }
}

fn castle_rook(board: &Board, king: &Piece, side: CastleSide) -> Option<Piece> {
    king.square
        .with_file(side.rook_file() as i32)
        .and_then(|sq| board.get(sq))
        .filter(|p| p.kind == PieceKind::Rook && p.color == king.color)
}

/// File every king starts on.
const KING_HOME_FILE: usize = 4;

pub fn can_castle(board: &Board, king: &Piece, side: CastleSide) -> bool {
    if king.kind != PieceKind::King || king.has_moved {
        return false;
    }
    if king.square.rank() != king.color.home_rank() || king.square.file() != KING_HOME_FILE {
        debug!("castle {:?} for {:?}: king is not on its home square", side, king.color);
        return false;
    }
    let rook = match castle_rook(board, king, side) {
        Some(rook) if !rook.has_moved => rook,
        _ => {
            debug!("castle {:?} for {:?}: rook missing or moved", side, king.color);
            return false;
        }
    };

    let (king_file, rook_file) = (king.square.file() as i32, rook.square.file() as i32);
    let between = (king_file.min(rook_file) + 1)..king_file.max(rook_file);
    let path_clear = between
        .filter_map(|file| king.square.with_file(file))
        .all(|sq| board.get(sq).is_none());
    if !path_clear {
        debug!("castle {:?} for {:?}: path blocked", side, king.color);
        return false;
    }

    // Start, transit and destination must all be out of the enemy's reach.
    let enemy = king.color.opposite();
    let dir = side.direction();
    let safe = (0..=2)
        .filter_map(|step| king.square.offset(0, dir * step))
        .all(|sq| !board.is_square_attacked_by(sq, enemy));
    if !safe {
        debug!("castle {:?} for {:?}: king would cross an attacked square", side, king.color);
    }
    safe
}

/// King goes two files towards the rook, the rook lands on the square the
/// king crossed. Both are marked as moved.
pub fn execute_castle(board: &mut Board, king: &Piece, side: CastleSide) {
    let dir = side.direction();
    let (king_to, rook_to) = match (king.square.offset(0, 2 * dir), king.square.offset(0, dir)) {
        (Some(k), Some(r)) => (k, r),
        _ => return,
    };
    let rook_from = match castle_rook(board, king, side) {
        Some(rook) => rook.square,
        None => return,
    };

    board.relocate(king.square, king_to);
    board.relocate(rook_from, rook_to);
    for sq in [king_to, rook_to] {
        if let Some(p) = board.get_mut(sq) {
            p.has_moved = true;
        }
    }
}

/// Where the capturing pawn lands and where the captured pawn stands.
fn en_passant_squares(pawn: &Piece, dest_file: usize) -> Option<(Square, Square)> {
    let landing = pawn
        .square
        .offset(pawn.color.pawn_direction(), 0)?
        .with_file(dest_file as i32)?;
    let victim = pawn.square.with_file(dest_file as i32)?;
    Some((landing, victim))
}

pub fn can_en_passant(board: &Board, pawn: &Piece, dest_file: usize) -> bool {
    if pawn.kind != PieceKind::Pawn || pawn.square.rank() != pawn.color.en_passant_rank() {
        return false;
    }
    if (dest_file as i32 - pawn.square.file() as i32).abs() != 1 {
        return false;
    }
    let (landing, victim) = match en_passant_squares(pawn, dest_file) {
        Some(squares) => squares,
        None => return false,
    };
    if board.get(landing).is_some() {
        return false;
    }
    board
        .get(victim)
        .map(|p| p.kind == PieceKind::Pawn && p.color != pawn.color && p.just_double_stepped)
        .unwrap_or(false)
}

/// Removes the pawn beside the mover, then moves the mover diagonally.
/// Returns the captured pawn.
pub fn execute_en_passant(board: &mut Board, pawn: &Piece, dest_file: usize) -> Option<Piece> {
    let (landing, victim) = en_passant_squares(pawn, dest_file)?;
    let captured = board.get(victim);
    board.place(victim, None);
    board.relocate(pawn.square, landing);
    captured
}
