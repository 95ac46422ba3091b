use chess_rules::game::Outcome;
use chess_rules::Game;
use log::{info, warn};
use rand::seq::SliceRandom;

const MAX_PLIES: usize = 200;
const GAMES: usize = 20;

/// Plays one game of uniformly random legal moves, checking on every ply
/// that an accepted move flips the turn and that a rejected one leaves the
/// board alone. Returns the outcome (None if the ply cap was hit) and the
/// notation.
fn play_random_game(rng: &mut impl rand::Rng) -> (Option<Outcome>, String) {
    let mut game = Game::new();
    for _ in 0..MAX_PLIES {
        let moves = game.legal_moves();
        let &(from, to) = match moves.choose(rng) {
            Some(mv) => mv,
            None => break,
        };

        // Probe an illegal request first: the king never jumps three files.
        if let Some(king) = game.board().find_king(game.side_to_move()) {
            if let Some(far) = king.offset(0, 3).or_else(|| king.offset(0, -3)) {
                let before = game.board().clone();
                let side = game.side_to_move();
                assert!(!game.try_move(king, far), "king jumped three files");
                assert_eq!(game.board(), &before, "rejected move changed the board");
                assert_eq!(game.side_to_move(), side);
            }
        }

        let side = game.side_to_move();
        assert!(game.try_move(from, to), "legal move {from}{to} was rejected");
        assert_eq!(game.side_to_move(), side.opposite(), "turn did not flip");
    }
    (game.outcome(), game.notation())
}

fn main() {
    env_logger::init();
    let mut rng = rand::thread_rng();

    let (mut mates, mut stalemates, mut unfinished) = (0, 0, 0);
    for i in 0..GAMES {
        let (outcome, notation) = play_random_game(&mut rng);
        match outcome {
            Some(Outcome::Checkmate { winner }) => {
                mates += 1;
                info!("game {i}: {winner:?} mates");
            }
            Some(Outcome::Stalemate) => {
                stalemates += 1;
                info!("game {i}: stalemate");
            }
            None => {
                unfinished += 1;
                warn!("game {i}: no result after {MAX_PLIES} plies");
            }
        }
        println!("{notation}");
    }
    eprintln!("{GAMES} games: {mates} mates, {stalemates} stalemates, {unfinished} unfinished");
}
