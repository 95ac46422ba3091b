// =============================================================================
// Game orchestration
//
// A single logical state, "awaiting a move from `side_to_move`". Every move
// request runs the same pipeline: ownership, castling, en passant, the
// piece's own movement rule, then a simulate/undo safety check. Only a move
// that survives all of it touches the real board, the history and the
// observers, in that order.
//
// Terminal outcomes (checkmate, stalemate) are derived on demand by an
// exhaustive scan over every (piece, square) pair rather than stored.
// =============================================================================

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Error;
use crate::history::MoveHistory;
use crate::moves::{self, CheckMark, MoveKind, MoveRecord};
use crate::notify::{ChangeNotifier, SubscriberId};
use crate::piece::{Color, Piece, PieceKind};
use crate::special_moves::{self, CastleSide};
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

/// Everything a view usually asks for after a change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub side_to_move: Color,
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub move_number: usize,
}

// =============================================================================
// Move pipeline (board-level, shared by commits and read-only probes)
// =============================================================================

/// Which branch of the pipeline a request falls into. Decided by shape only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Castle(CastleSide),
    EnPassant,
    Regular,
}

fn route(board: &Board, piece: &Piece, to: Square) -> Route {
    let dr = to.rank() as i32 - piece.square.rank() as i32;
    let df = to.file() as i32 - piece.square.file() as i32;
    match piece.kind {
        PieceKind::King if dr == 0 && df.abs() == 2 => Route::Castle(CastleSide::from_shift(df)),
        PieceKind::Pawn
            if df.abs() == 1 && dr == piece.color.pawn_direction() && board.get(to).is_none() =>
        {
            Route::EnPassant
        }
        _ => Route::Regular,
    }
}

/// Complete inverse of a simulated move.
struct Undo {
    mover: Piece,
    to: Square,
    displaced: Option<Piece>,
    side_capture: Option<Piece>,
}

fn simulate(board: &mut Board, mover: Piece, to: Square, en_passant: bool) -> Undo {
    let mut side_capture = None;
    if en_passant {
        if let Some(victim_sq) = mover.square.with_file(to.file() as i32) {
            side_capture = board.get(victim_sq);
            board.place(victim_sq, None);
        }
    }
    let displaced = board.relocate(mover.square, to);
    Undo {
        mover,
        to,
        displaced,
        side_capture,
    }
}

fn undo(board: &mut Board, inverse: Undo) {
    board.place(inverse.to, inverse.displaced);
    board.place(inverse.mover.square, Some(inverse.mover));
    if let Some(victim) = inverse.side_capture {
        board.place(victim.square, Some(victim));
    }
}

/// Play the move on `board`, ask whether `mover`'s side is in check, and put
/// everything back exactly as it was regardless of the answer.
fn leaves_king_safe(board: &mut Board, mover: Piece, to: Square, en_passant: bool) -> bool {
    let inverse = simulate(board, mover, to, en_passant);
    let in_check = board.is_in_check(mover.color);
    undo(board, inverse);
    debug!(
        "simulated {:?} {}{}: king {}",
        mover.kind,
        mover.square,
        to,
        if in_check { "exposed" } else { "safe" }
    );
    !in_check
}

/// Full legality of `from -> to` for `color`, leaving `board` unchanged.
fn legal_on(board: &mut Board, color: Color, from: Square, to: Square) -> bool {
    let piece = match board.get(from) {
        Some(p) if p.color == color => p,
        _ => return false,
    };
    match route(board, &piece, to) {
        Route::Castle(side) => special_moves::can_castle(board, &piece, side),
        Route::EnPassant => {
            special_moves::can_en_passant(board, &piece, to.file())
                && leaves_king_safe(board, piece, to, true)
        }
        Route::Regular => piece.can_reach(board, to) && leaves_king_safe(board, piece, to, false),
    }
}

fn has_legal_move(board: &mut Board, color: Color) -> bool {
    let origins: Vec<Square> = board.pieces_of(color).map(|p| p.square).collect();
    origins
        .into_iter()
        .any(|from| Square::all().any(|to| legal_on(board, color, from, to)))
}

// =============================================================================
// Game
// =============================================================================

#[derive(Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    history: MoveHistory,
    config: GameConfig,
    observers: ChangeNotifier,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard initial position, White to move, empty history.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
            history: MoveHistory::new(),
            config,
            observers: ChangeNotifier::new(),
        }
    }

    /// Start from an arbitrary position. At most one king per color is a
    /// setup precondition.
    pub fn from_position(board: Board, side_to_move: Color) -> Self {
        debug_assert!(board.kings_are_unique(), "more than one king of a color");
        Game {
            board,
            side_to_move,
            history: MoveHistory::new(),
            config: GameConfig::default(),
            observers: ChangeNotifier::new(),
        }
    }

    /// Throw the current game away and start over. Subscribers stay
    /// registered and are told about the fresh board.
    pub fn new_game(&mut self) {
        self.board = Board::standard();
        self.side_to_move = Color::White;
        self.history = MoveHistory::new();
        info!("new game");
        self.observers.notify();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn notation(&self) -> String {
        self.history.notation(&self.config.notation)
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    /// In check with no legal move at all.
    pub fn in_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && !has_legal_move(&mut self.board.clone(), color)
    }

    /// Side to move is not in check and has no legal move.
    pub fn in_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && !has_legal_move(&mut self.board.clone(), self.side_to_move)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.in_checkmate(self.side_to_move) {
            Some(Outcome::Checkmate {
                winner: self.side_to_move.opposite(),
            })
        } else if self.in_stalemate() {
            Some(Outcome::Stalemate)
        } else {
            None
        }
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            side_to_move: self.side_to_move,
            in_check: self.in_check(self.side_to_move),
            checkmate: self.in_checkmate(self.side_to_move),
            stalemate: self.in_stalemate(),
            move_number: self.history.move_number(),
        }
    }

    /// Would `try_move(from, to)` succeed right now?
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        legal_on(&mut self.board.clone(), self.side_to_move, from, to)
    }

    /// Every square the piece on `from` may legally move to. Empty for
    /// empty squares and for the side not on move.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut scratch = self.board.clone();
        Square::all()
            .filter(|&to| legal_on(&mut scratch, self.side_to_move, from, to))
            .collect()
    }

    /// All legal `(from, to)` pairs for the side to move.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        let mut scratch = self.board.clone();
        let color = self.side_to_move;
        let origins: Vec<Square> = self.board.pieces_of(color).map(|p| p.square).collect();
        let mut moves = Vec::new();
        for from in origins {
            for to in Square::all() {
                if legal_on(&mut scratch, color, from, to) {
                    moves.push((from, to));
                }
            }
        }
        moves
    }

    /// Whether the side to move could castle towards `side` now.
    pub fn can_castle(&self, side: CastleSide) -> bool {
        self.board
            .find_king(self.side_to_move)
            .and_then(|sq| self.board.get(sq))
            .map(|king| special_moves::can_castle(&self.board, &king, side))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Validate and, if legal, execute a move. A rejected move leaves the
    /// game exactly as it was and notifies nobody.
    pub fn try_move(&mut self, from: Square, to: Square) -> bool {
        let color = self.side_to_move;
        let piece = match self.board.get(from) {
            Some(p) if p.color == color => p,
            Some(_) => {
                debug!("reject {from}{to}: piece belongs to {:?}", color.opposite());
                return false;
            }
            None => {
                debug!("reject {from}{to}: no piece on {from}");
                return false;
            }
        };

        let (kind, captured) = match route(&self.board, &piece, to) {
            Route::Castle(side) => {
                if !special_moves::can_castle(&self.board, &piece, side) {
                    debug!("reject {from}{to}: castling {:?} not allowed", side);
                    return false;
                }
                special_moves::execute_castle(&mut self.board, &piece, side);
                (MoveKind::castle(side), None)
            }
            Route::EnPassant => {
                if !special_moves::can_en_passant(&self.board, &piece, to.file()) {
                    debug!("reject {from}{to}: no en passant available");
                    return false;
                }
                if !leaves_king_safe(&mut self.board, piece, to, true) {
                    debug!("reject {from}{to}: en passant exposes the king");
                    return false;
                }
                let captured = special_moves::execute_en_passant(&mut self.board, &piece, to.file());
                (MoveKind::EnPassant, captured)
            }
            Route::Regular => {
                if !piece.can_reach(&self.board, to) {
                    debug!("reject {from}{to}: {:?} cannot move that way", piece.kind);
                    return false;
                }
                if !leaves_king_safe(&mut self.board, piece, to, false) {
                    debug!("reject {from}{to}: leaves own king in check");
                    return false;
                }
                let captured = self.board.relocate(from, to);
                if piece.kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
                    self.board
                        .place(to, Some(Piece::new(PieceKind::Queen, color, to)));
                    (MoveKind::Promotion, captured)
                } else {
                    (MoveKind::Normal, captured)
                }
            }
        };

        self.commit(piece, to, kind, captured);
        true
    }

    /// Parse coordinate notation ("e2e4") and try the move.
    pub fn try_move_str(&mut self, mv: &str) -> Result<bool, Error> {
        let (from, to) = moves::parse_coordinate_move(mv)?;
        Ok(self.try_move(from, to))
    }

    /// Bookkeeping shared by every accepted move: flags, turn, history, then
    /// observers, so nobody ever sees a half-applied move.
    fn commit(&mut self, moved: Piece, to: Square, kind: MoveKind, captured: Option<Piece>) {
        self.board.clear_double_steps();
        if let Some(p) = self.board.get_mut(to) {
            match p.kind {
                PieceKind::King | PieceKind::Rook => p.has_moved = true,
                PieceKind::Pawn => {
                    p.just_double_stepped = (to.rank() as i32 - moved.square.rank() as i32).abs() == 2
                }
                _ => {}
            }
        }

        self.side_to_move = self.side_to_move.opposite();
        let check = if !self.board.is_in_check(self.side_to_move) {
            CheckMark::NoCheck
        } else if has_legal_move(&mut self.board.clone(), self.side_to_move) {
            CheckMark::Check
        } else {
            CheckMark::Checkmate
        };

        self.history.append(MoveRecord {
            index: 0,
            from: moved.square,
            to,
            moved,
            captured,
            kind,
            check,
        });
        if let Some(record) = self.history.last() {
            info!(
                "{:?} played {} ({})",
                moved.color,
                record.to_algebraic(&self.config.notation),
                record.to_coordinate()
            );
        }
        self.observers.notify();
    }

    /// Replace the piece on `sq` with a fresh `kind` of the same color. Meant
    /// to correct the automatic queen after a promotion; it is not a move, so
    /// turn and history are untouched.
    pub fn promote(&mut self, sq: Square, kind: PieceKind) {
        if !kind.is_promotion_target() {
            warn!("promote {sq}: {:?} is not a promotion piece", kind);
            return;
        }
        let color = match self.board.get(sq) {
            Some(p) => p.color,
            None => {
                warn!("promote {sq}: square is empty");
                return;
            }
        };
        self.board.place(sq, Some(Piece::new(kind, color, sq)));
        info!("{:?} piece on {sq} promoted to {:?}", color, kind);
        self.observers.notify();
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriberId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Re-send the change signal without changing anything.
    pub fn refresh(&mut self) {
        self.observers.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn setup(pieces: &[(PieceKind, Color, &str)], to_move: Color) -> Game {
        let mut board = Board::empty();
        for &(kind, color, at) in pieces {
            board.place(sq(at), Some(Piece::new(kind, color, sq(at))));
        }
        Game::from_position(board, to_move)
    }

    fn play(game: &mut Game, moves: &[&str]) {
        for mv in moves {
            assert!(game.try_move_str(mv).unwrap(), "move {mv} was rejected");
        }
    }

    fn counter(game: &mut Game) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        game.subscribe(move || c.set(c.get() + 1));
        count
    }

    use PieceKind::*;

    #[test]
    fn scenario_a_opening_double_step() {
        let mut game = Game::new();
        assert!(game.try_move(sq("e2"), sq("e4")));
        assert!(game.piece_at(sq("e2")).is_none());
        let pawn = game.piece_at(sq("e4")).unwrap();
        assert_eq!((pawn.kind, pawn.color), (Pawn, Color::White));
        assert!(pawn.just_double_stepped);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn scenario_b_queen_on_open_file_gives_check() {
        let game = setup(
            &[(King, Color::White, "e1"), (Queen, Color::Black, "e8"), (King, Color::Black, "a8")],
            Color::White,
        );
        assert!(game.in_check(Color::White));
        assert!(!game.in_check(Color::Black));
    }

    #[test]
    fn scenario_c_kingside_castle() {
        let mut game = setup(
            &[(King, Color::White, "e1"), (Rook, Color::White, "h1"), (King, Color::Black, "e8")],
            Color::White,
        );
        assert!(game.can_castle(CastleSide::Kingside));
        assert!(game.legal_destinations(sq("e1")).contains(&sq("g1")));
        assert!(game.try_move(sq("e1"), sq("g1")));

        let king = game.piece_at(sq("g1")).unwrap();
        let rook = game.piece_at(sq("f1")).unwrap();
        assert_eq!(king.kind, King);
        assert_eq!(rook.kind, Rook);
        assert!(king.has_moved && rook.has_moved);
        assert_eq!(game.history().last().map(|r| r.kind), Some(MoveKind::CastleKingside));
        assert_eq!(game.notation(), "1. O-O");
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn scenario_d_lone_king_stalemate() {
        let game = setup(
            &[(King, Color::Black, "a8"), (Queen, Color::White, "b6"), (King, Color::White, "c6")],
            Color::Black,
        );
        assert!(!game.in_check(Color::Black));
        assert!(game.in_stalemate());
        assert!(!game.in_checkmate(Color::Black));
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
        assert!(game.legal_destinations(sq("a8")).is_empty());
    }

    #[test]
    fn stalemate_with_queen_and_king_against_corner() {
        let game = setup(
            &[(King, Color::White, "a1"), (Queen, Color::Black, "b3"), (King, Color::Black, "c2")],
            Color::White,
        );
        assert!(game.in_stalemate());
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn scenario_e_automatic_queen() {
        let mut game = setup(
            &[(Pawn, Color::White, "a7"), (King, Color::White, "e1"), (King, Color::Black, "h6")],
            Color::White,
        );
        assert!(game.try_move(sq("a7"), sq("a8")));
        let queen = game.piece_at(sq("a8")).unwrap();
        assert_eq!((queen.kind, queen.color), (Queen, Color::White));
        assert_eq!(game.history().last().map(|r| r.kind), Some(MoveKind::Promotion));
        assert_eq!(game.notation(), "1. a8=Q");
    }

    #[test]
    fn promotion_by_capture_records_the_victim() {
        let mut game = setup(
            &[
                (Pawn, Color::White, "b7"),
                (Rook, Color::Black, "a8"),
                (King, Color::White, "e1"),
                (King, Color::Black, "h6"),
            ],
            Color::White,
        );
        assert!(game.try_move(sq("b7"), sq("a8")));
        let record = game.history().last().unwrap();
        assert_eq!(record.captured.map(|p| p.kind), Some(Rook));
        assert_eq!(game.piece_at(sq("a8")).map(|p| p.kind), Some(Queen));
        assert_eq!(game.notation(), "1. bxa8=Q");
    }

    #[test]
    fn promote_overrides_the_queen_and_notifies() {
        let mut game = setup(
            &[(Pawn, Color::Black, "c2"), (King, Color::White, "h1"), (King, Color::Black, "h8")],
            Color::Black,
        );
        let count = counter(&mut game);
        assert!(game.try_move(sq("c2"), sq("c1")));
        assert_eq!(count.get(), 1);

        game.promote(sq("c1"), Knight);
        assert_eq!(count.get(), 2);
        let knight = game.piece_at(sq("c1")).unwrap();
        assert_eq!((knight.kind, knight.color), (Knight, Color::Black));
        assert_eq!(game.side_to_move(), Color::White, "promote is not a move");
        assert_eq!(game.history().len(), 1);

        game.promote(sq("c1"), King);
        game.promote(sq("d4"), Rook);
        assert_eq!(count.get(), 2, "ignored promotions do not notify");
        assert_eq!(game.piece_at(sq("c1")).map(|p| p.kind), Some(Knight));
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut game = Game::new();
        let count = counter(&mut game);
        let before = game.board().clone();
        for (from, to) in [
            ("e2", "e5"), // too far
            ("e7", "e5"), // not White's piece
            ("e1", "e2"), // own piece on target
            ("d1", "d3"), // blocked
            ("a1", "a1"), // no-op
            ("e4", "e5"), // empty origin
            ("e1", "g1"), // castling through pieces
            ("e2", "d3"), // diagonal onto empty, no en passant
        ] {
            assert!(!game.try_move(sq(from), sq(to)), "{from}{to} accepted");
            assert!(!game.is_legal_move(sq(from), sq(to)));
        }
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.history().is_empty());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn every_committed_move_flips_the_turn() {
        let mut game = Game::new();
        let count = counter(&mut game);
        for (i, mv) in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"].iter().enumerate() {
            let before = game.side_to_move();
            assert!(game.try_move_str(mv).unwrap());
            assert_eq!(game.side_to_move(), before.opposite());
            assert_eq!(count.get(), i + 1);
        }
        assert_eq!(game.notation(), "1. e4 e5 2. Nf3 Nc6 3. Bc4 Nf6");
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut game = setup(
            &[
                (King, Color::White, "e1"),
                (Bishop, Color::White, "e2"),
                (Rook, Color::Black, "e8"),
                (King, Color::Black, "a8"),
            ],
            Color::White,
        );
        let before = game.board().clone();
        assert!(!game.try_move(sq("e2"), sq("d3")));
        assert_eq!(game.board(), &before);
        assert!(game.legal_destinations(sq("e2")).is_empty());
        assert!(game.try_move(sq("e1"), sq("d1")));
    }

    #[test]
    fn en_passant_on_the_following_ply() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert!(game.is_legal_move(sq("e5"), sq("d6")));
        assert!(game.try_move(sq("e5"), sq("d6")));
        assert!(game.piece_at(sq("d5")).is_none(), "captured pawn removed from beside");
        assert_eq!(game.piece_at(sq("d6")).map(|p| (p.kind, p.color)), Some((Pawn, Color::White)));
        let record = game.history().last().unwrap();
        assert_eq!(record.kind, MoveKind::EnPassant);
        assert_eq!(record.captured.map(|p| p.square), Some(sq("d5")));
        assert_eq!(game.notation(), "1. e4 a6 2. e5 d5 3. exd6 e.p.");
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "a6a5"]);
        let before = game.board().clone();
        assert!(!game.try_move(sq("e5"), sq("d6")));
        assert_eq!(game.board(), &before);
        assert!(!game.piece_at(sq("d5")).unwrap().just_double_stepped);
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_rejected() {
        let mut game = setup(
            &[
                (King, Color::White, "a5"),
                (Pawn, Color::White, "b5"),
                (Pawn, Color::Black, "c7"),
                (Rook, Color::Black, "h5"),
                (King, Color::Black, "h8"),
            ],
            Color::Black,
        );
        assert!(game.try_move(sq("c7"), sq("c5")));
        let before = game.board().clone();
        assert!(!game.try_move(sq("b5"), sq("c6")));
        assert_eq!(game.board(), &before, "simulate/undo must restore both pawns");
    }

    #[test]
    fn castling_refused_after_king_returns_home() {
        let mut game = setup(
            &[(King, Color::White, "e1"), (Rook, Color::White, "h1"), (King, Color::Black, "e8")],
            Color::White,
        );
        play(&mut game, &["e1e2", "e8e7", "e2e1", "e7e8"]);
        assert!(!game.can_castle(CastleSide::Kingside));
        assert!(!game.try_move(sq("e1"), sq("g1")));
    }

    #[test]
    fn castling_signal_off_the_home_rank_is_rejected() {
        let mut game = setup(
            &[(King, Color::White, "e4"), (Rook, Color::White, "h4"), (King, Color::Black, "a8")],
            Color::White,
        );
        let before = game.board().clone();
        assert!(!game.can_castle(CastleSide::Kingside));
        assert!(!game.is_legal_move(sq("e4"), sq("g4")));
        assert!(!game.try_move(sq("e4"), sq("g4")));
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn castling_signal_from_wrong_file_keeps_the_rook() {
        let mut game = setup(
            &[(King, Color::White, "f1"), (Rook, Color::White, "h1"), (King, Color::Black, "a8")],
            Color::White,
        );
        assert!(!game.legal_destinations(sq("f1")).contains(&sq("h1")));
        assert!(!game.try_move(sq("f1"), sq("h1")));
        assert!(!game.try_move(sq("f1"), sq("d1")));
        assert_eq!(game.piece_at(sq("h1")).map(|p| p.kind), Some(Rook));
        assert_eq!(game.piece_at(sq("f1")).map(|p| p.kind), Some(King));
        assert!(game.history().is_empty());
    }

    #[test]
    fn castling_refused_when_crossing_attacked_square() {
        let mut game = setup(
            &[
                (King, Color::White, "e1"),
                (Rook, Color::White, "h1"),
                (Rook, Color::White, "a1"),
                (Rook, Color::Black, "f8"),
                (King, Color::Black, "a8"),
            ],
            Color::White,
        );
        assert!(!game.try_move(sq("e1"), sq("g1")));
        assert!(game.try_move(sq("e1"), sq("c1")));
        assert_eq!(game.piece_at(sq("d1")).map(|p| p.kind), Some(Rook));
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.in_check(Color::White));
        assert!(game.in_checkmate(Color::White));
        assert!(!game.in_stalemate());
        assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
        assert_eq!(game.notation(), "1. f3 e5 2. g4 Qh4#");

        for piece in game.board().pieces_of(Color::White) {
            assert!(
                game.legal_destinations(piece.square).is_empty(),
                "{:?} on {} still has moves",
                piece.kind,
                piece.square
            );
        }
        let status = game.status();
        assert!(status.checkmate && status.in_check && !status.stalemate);
        assert_eq!(status.move_number, 3);
    }

    #[test]
    fn check_can_be_answered() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "f7f6", "d1h5"]);
        assert_eq!(game.notation(), "1. e4 f6 2. Qh5+");
        assert!(game.in_check(Color::Black));
        assert!(!game.in_checkmate(Color::Black));
        assert!(!game.try_move(sq("a7"), sq("a6")), "must answer the check");
        assert!(game.try_move(sq("g7"), sq("g6")));
    }

    #[test]
    fn legal_destinations_from_the_start() {
        let game = Game::new();
        assert_eq!(game.legal_destinations(sq("e2")), vec![sq("e3"), sq("e4")]);
        assert_eq!(game.legal_destinations(sq("g1")), vec![sq("f3"), sq("h3")]);
        assert!(game.legal_destinations(sq("e7")).is_empty(), "black is not on move");
        assert!(game.legal_destinations(sq("e4")).is_empty());
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn new_game_resets_and_keeps_subscribers() {
        let mut game = Game::new();
        let count = counter(&mut game);
        play(&mut game, &["d2d4", "d7d5"]);
        game.new_game();
        assert_eq!(count.get(), 3);
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.history().is_empty());

        game.refresh();
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn unsubscribed_view_is_not_called() {
        let mut game = Game::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = game.subscribe(move || c.set(c.get() + 1));
        assert!(game.unsubscribe(id));
        play(&mut game, &["c2c4"]);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn coordinate_moves_with_bad_input() {
        let mut game = Game::new();
        assert!(game.try_move_str("e2").is_err());
        assert_eq!(game.try_move_str("e2e5").unwrap(), false);
    }

    #[test]
    fn notation_without_marks() {
        let config = GameConfig::from_json(r#"{"notation": {"mark_checks": false}}"#).unwrap();
        let mut game = Game::with_config(config);
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(game.notation(), "1. f3 e5 2. g4 Qh4");
    }
}
