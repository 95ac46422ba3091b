use serde::{Deserialize, Serialize};

use crate::config::NotationConfig;
use crate::error::Error;
use crate::piece::{Piece, PieceKind};
use crate::special_moves::CastleSide;
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion,
}

impl MoveKind {
    pub fn castle(side: CastleSide) -> MoveKind {
        match side {
            CastleSide::Kingside => MoveKind::CastleKingside,
            CastleSide::Queenside => MoveKind::CastleQueenside,
        }
    }
}

/// What the move did to the opponent's king, judged right after commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckMark {
    #[default]
    NoCheck,
    Check,
    Checkmate,
}

/// One executed move. Immutable once it is in the history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Ply number, starting at 0.
    pub index: usize,
    pub from: Square,
    pub to: Square,
    /// The mover as it stood before the move.
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
    pub check: CheckMark,
}

impl MoveRecord {
    /// Coordinate notation, e.g. "e2e4", "a7a8q"
    pub fn to_coordinate(&self) -> String {
        let promo = match self.kind {
            MoveKind::Promotion => "q",
            _ => "",
        };
        format!("{}{}{promo}", self.from, self.to)
    }

    /// Algebraic-flavoured notation for a single move: "Nf3", "exd5", "O-O",
    /// "a8=Q". A promotion is written with the queen it lands as; a later
    /// `Game::promote` correction does not rewrite the record.
    pub fn to_algebraic(&self, config: &NotationConfig) -> String {
        let mut out = match self.kind {
            MoveKind::CastleKingside => CastleSide::Kingside.token().to_string(),
            MoveKind::CastleQueenside => CastleSide::Queenside.token().to_string(),
            _ => {
                let mut s = String::from(self.moved.kind.letter());
                if self.captured.is_some() {
                    if self.moved.kind == PieceKind::Pawn {
                        s.push((b'a' + self.from.file() as u8) as char);
                    }
                    s.push('x');
                }
                s.push_str(&self.to.to_string());
                if self.kind == MoveKind::Promotion {
                    s.push_str("=Q");
                }
                s
            }
        };
        if config.mark_checks {
            match self.check {
                CheckMark::Check => out.push('+'),
                CheckMark::Checkmate => out.push('#'),
                CheckMark::NoCheck => {}
            }
        }
        if self.kind == MoveKind::EnPassant && config.mark_en_passant {
            out.push_str(" e.p.");
        }
        out
    }
}

/// Parse coordinate notation ("e2e4"). A trailing promotion letter is
/// accepted and ignored, since promotion always lands a queen first.
pub fn parse_coordinate_move(s: &str) -> Result<(Square, Square), Error> {
    let s = s.trim();
    if !(4..=5).contains(&s.len()) || !s.is_ascii() {
        return Err(Error::InvalidMove(s.to_string()));
    }
    let from: Square = s[0..2]
        .parse()
        .map_err(|_| Error::InvalidMove(s.to_string()))?;
    let to: Square = s[2..4]
        .parse()
        .map_err(|_| Error::InvalidMove(s.to_string()))?;
    if s.len() == 5 {
        let promo: PieceKind = s[4..].parse()?;
        if !promo.is_promotion_target() {
            return Err(Error::InvalidMove(s.to_string()));
        }
    }
    Ok((from, to))
}
