//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use arbiter::{perft, Game};
//!
//! let game = Game::new();
//! assert_eq!(perft(&game, 1), 12);
//! assert_eq!(perft(&game, 2), 144);
//! ```

use crate::game::Game;

/// Counts legal move paths of a given length.
///
/// Paths ending in checkmate or stalemate before the final ply are not
/// counted. Useful for comparing, testing and debugging move generation
/// correctness.
pub fn perft(game: &Game, depth: u8) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = game.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .into_iter()
                .map(|m| {
                    let mut child = game.clone();
                    child.play(m).expect("legal move");
                    perft(&child, depth - 1)
                })
                .sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_zero() {
        assert_eq!(perft(&Game::new(), 0), 1);
    }

    #[test]
    fn test_initial_moves() {
        // Single-step pawns only: eight pushes plus four knight moves per
        // side, and the first two plies do not interact.
        assert_eq!(perft(&Game::new(), 1), 12);
        assert_eq!(perft(&Game::new(), 2), 144);
    }
}
