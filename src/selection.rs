use crate::game::Game;
use crate::piece::PieceKind;
use crate::square::Square;

/// Result of one click on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An own piece is now selected; its legal destinations are attached.
    Selected { square: Square, destinations: Vec<Square> },
    /// The selected square was clicked again. Nothing happened.
    Deselected,
    Moved { from: Square, to: Square },
    /// A pawn reached the last rank and became a queen; a view may now offer
    /// `Game::promote` to pick something else.
    PromotionPending { square: Square },
    Rejected { from: Square, to: Square },
    /// Click with nothing selected on a square holding no piece of the side to move.
    Ignored,
}

/// Two-click move entry: select a piece, then click where it should go.
#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<(Square, Vec<Square>)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected.as_ref().map(|(sq, _)| *sq)
    }

    /// Highlighted destinations of the current selection.
    pub fn destinations(&self) -> &[Square] {
        self.selected
            .as_ref()
            .map(|(_, dests)| dests.as_slice())
            .unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn click(&mut self, game: &mut Game, sq: Square) -> ClickOutcome {
        let own_piece = game
            .piece_at(sq)
            .map(|p| p.color == game.side_to_move())
            .unwrap_or(false);

        let (from, destinations) = match self.selected.take() {
            Some(selected) => selected,
            None if own_piece => return self.select(game, sq),
            None => return ClickOutcome::Ignored,
        };

        if sq == from {
            return ClickOutcome::Deselected;
        }
        if own_piece && !destinations.contains(&sq) {
            return self.select(game, sq);
        }

        let promoting = game
            .piece_at(from)
            .map(|p| p.kind == PieceKind::Pawn && sq.rank() == p.color.promotion_rank())
            .unwrap_or(false);
        if !game.try_move(from, sq) {
            return ClickOutcome::Rejected { from, to: sq };
        }
        if promoting {
            ClickOutcome::PromotionPending { square: sq }
        } else {
            ClickOutcome::Moved { from, to: sq }
        }
    }

    fn select(&mut self, game: &Game, sq: Square) -> ClickOutcome {
        let destinations = game.legal_destinations(sq);
        self.selected = Some((sq, destinations.clone()));
        ClickOutcome::Selected {
            square: sq,
            destinations,
        }
    }
}
