use std::{error::Error, fmt};

use crate::{
    board::Board,
    color::Color,
    geometry,
    role::Role,
    square::Square,
    types::{Move, MoveList, Piece},
};

/// Reason a move or query was rejected.
///
/// A rejected move never changes the [`Game`]; rejection is fully
/// transactional.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveError {
    /// The move carries a promotion to a pawn or a king.
    IllegalPromotion { role: Role },
    /// The origin square is empty.
    NoPieceAt { square: Square },
    /// The piece at the origin belongs to the side that is not on move.
    NotYourTurn { color: Color },
    /// The movement pattern does not reach the destination, or the
    /// destination holds a piece of the moving side.
    IllegalDestination { from: Square, to: Square },
    /// The moving side's own king would be attacked after the move.
    WouldExposeOwnKing { color: Color },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MoveError::IllegalPromotion { role } => {
                write!(f, "cannot promote to '{}'", role.char())
            }
            MoveError::NoPieceAt { square } => write!(f, "no piece at {square}"),
            MoveError::NotYourTurn { color } => write!(f, "it is not {color}'s turn"),
            MoveError::IllegalDestination { from, to } => {
                write!(f, "piece at {from} cannot reach {to}")
            }
            MoveError::WouldExposeOwnKing { color } => {
                write!(f, "move would leave the {color} king attacked")
            }
        }
    }
}

impl Error for MoveError {}

/// Error when constructing a game from an impossible position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// A side has more than 16 pieces.
    TooManyPieces { color: Color },
    /// A side has more than 8 pawns.
    TooManyPawns { color: Color },
    /// A side has more than one king.
    TooManyKings { color: Color },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PositionError::TooManyPieces { color } => write!(f, "too many {color} pieces"),
            PositionError::TooManyPawns { color } => write!(f, "too many {color} pawns"),
            PositionError::TooManyKings { color } => write!(f, "too many {color} kings"),
        }
    }
}

impl Error for PositionError {}

/// A game in progress: one [`Board`] and the side to move.
///
/// `Game` is the sole mutator of its board. All moves go through [`play`],
/// which validates geometry, ownership and king safety before committing.
/// Game-end classifications are computed on demand and never stored.
///
/// The engine is synchronous and owns no shared state; a `Game` value used
/// from several threads needs external serialization, at most one in-flight
/// [`play`] per game at a time.
///
/// [`play`]: Game::play
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// Starts a game from the standard starting position, White to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Color::White,
        }
    }

    /// Starts a game from an arbitrary position.
    ///
    /// Per-side material limits are enforced: at most 16 pieces, at most 8
    /// pawns, at most one king. Kings may be absent. Every position
    /// reachable from [`Game::new`] through [`play`] stays within these
    /// limits.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] naming the first violated limit.
    ///
    /// [`play`]: Game::play
    pub fn from_board(board: Board, turn: Color) -> Result<Game, PositionError> {
        for color in Color::ALL {
            let mut pieces = 0;
            let mut pawns = 0;
            let mut kings = 0;

            for (_, piece) in board.pieces().filter(|(_, p)| p.color == color) {
                pieces += 1;
                match piece.role {
                    Role::Pawn => pawns += 1,
                    Role::King => kings += 1,
                    _ => (),
                }
            }

            if pieces > 16 {
                return Err(PositionError::TooManyPieces { color });
            }
            if pawns > 8 {
                return Err(PositionError::TooManyPawns { color });
            }
            if kings > 1 {
                return Err(PositionError::TooManyKings { color });
            }
        }

        Ok(Game { board, turn })
    }

    /// The current position.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Validates and plays a move.
    ///
    /// Checks, in order: `m` does not promote to a pawn or a king; a piece
    /// stands on `m.from`; it belongs to the side to move; `m.to` lies in
    /// its movement pattern (squares held by the moving side are never part
    /// of the pattern); and the moving side's king is not attacked on the
    /// board resulting from the move. On
    /// success the piece is relocated, a captured piece is removed, a
    /// promotion is applied if `m` carries one and the mover is a pawn
    /// reaching the last rank, and the turn flips.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`MoveError`], leaving the game
    /// untouched.
    pub fn play(&mut self, m: Move) -> Result<(), MoveError> {
        if let Some(role @ (Role::Pawn | Role::King)) = m.promotion {
            return Err(MoveError::IllegalPromotion { role });
        }

        let piece = self
            .board
            .piece_at(m.from)
            .ok_or(MoveError::NoPieceAt { square: m.from })?;

        if piece.color != self.turn {
            return Err(MoveError::NotYourTurn { color: piece.color });
        }

        if !geometry::targets(&self.board, m.from, piece).contains(&m.to) {
            return Err(MoveError::IllegalDestination {
                from: m.from,
                to: m.to,
            });
        }

        let next = applied(&self.board, m, piece);
        if king_attacked(&next, piece.color) {
            return Err(MoveError::WouldExposeOwnKing { color: piece.color });
        }

        self.board = next;
        self.turn = !self.turn;
        Ok(())
    }

    /// Legal moves for the piece on `from`, regardless of whose turn it is:
    /// its movement pattern minus every destination that would leave its
    /// own king attacked.
    ///
    /// # Errors
    ///
    /// Fails with [`MoveError::NoPieceAt`] if the square is empty; an empty
    /// square is never silently an empty move set.
    pub fn valid_moves(&self, from: Square) -> Result<MoveList, MoveError> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(MoveError::NoPieceAt { square: from })?;

        let mut moves = MoveList::new();
        for to in geometry::targets(&self.board, from, piece) {
            let m = Move::new(from, to);
            if !king_attacked(&applied(&self.board, m, piece), piece.color) {
                moves.push(m);
            }
        }
        Ok(moves)
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (from, piece) in self.board.pieces() {
            if piece.color != self.turn {
                continue;
            }
            for to in geometry::targets(&self.board, from, piece) {
                let m = Move::new(from, to);
                if !king_attacked(&applied(&self.board, m, piece), piece.color) {
                    moves.push(m);
                }
            }
        }
        moves
    }

    /// Whether some opposing piece's movement pattern contains `color`'s
    /// king square. A board with no `color` king is never in check.
    pub fn is_check(&self, color: Color) -> bool {
        king_attacked(&self.board, color)
    }

    /// Whether `color` is in check and has no legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_check(color) && !self.has_legal_move(color)
    }

    /// Whether `color` is to move, not in check, and has no legal move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        self.turn == color && !self.is_check(color) && !self.has_legal_move(color)
    }

    fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .any(|(from, piece)| {
                geometry::targets(&self.board, from, piece)
                    .into_iter()
                    .any(|to| {
                        !king_attacked(&applied(&self.board, Move::new(from, to), piece), color)
                    })
            })
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

/// The board after `m`, by value copy. The caller has already resolved
/// `piece` at `m.from`.
fn applied(board: &Board, m: Move, piece: Piece) -> Board {
    let mut next = board.clone();
    next.remove_piece_at(m.from);

    let placed = match m.promotion {
        Some(role) if piece.role == Role::Pawn && m.to.rank() == (!piece.color).backrank() => {
            role.of(piece.color)
        }
        _ => piece,
    };

    next.set_piece_at(m.to, placed);
    next
}

/// Whether `color`'s king square lies in the movement pattern of any
/// opposing piece.
fn king_attacked(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_of(color) else {
        return false;
    };
    board
        .pieces()
        .filter(|(_, piece)| piece.color != color)
        .any(|(from, piece)| geometry::targets(board, from, piece).contains(&king))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Move {
        s.parse().expect("test move")
    }

    fn sq(s: &str) -> Square {
        s.parse().expect("test square")
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Color::White);
        game.play(m("g1f3")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        game.play(m("b8c6")).unwrap();
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_rejection_is_transactional() {
        let mut game = Game::new();
        let before = game.clone();

        assert_eq!(
            game.play(m("e2e5")),
            Err(MoveError::IllegalDestination {
                from: sq("e2"),
                to: sq("e5"),
            })
        );
        assert_eq!(game, before);

        assert_eq!(
            game.play(m("e4e5")),
            Err(MoveError::NoPieceAt { square: sq("e4") })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_no_double_pawn_step() {
        let mut game = Game::new();
        assert!(game.play(m("e2e4")).is_err());
        assert!(game.play(m("e2e3")).is_ok());
    }

    #[test]
    fn test_black_cannot_open() {
        let mut game = Game::new();
        assert_eq!(
            game.play(m("e7e6")),
            Err(MoveError::NotYourTurn {
                color: Color::Black,
            })
        );
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let mut board = Board::empty();
        board.set_piece_at(sq("e1"), Role::King.of(Color::White));
        board.set_piece_at(sq("e2"), Role::Bishop.of(Color::White));
        board.set_piece_at(sq("e8"), Role::Rook.of(Color::Black));
        let mut game = Game::from_board(board, Color::White).expect("valid position");

        assert_eq!(
            game.play(m("e2d3")),
            Err(MoveError::WouldExposeOwnKing {
                color: Color::White,
            })
        );
        assert!(game.valid_moves(sq("e2")).unwrap().is_empty());
    }

    #[test]
    fn test_check_by_rook() {
        let mut board = Board::empty();
        board.set_piece_at(sq("e1"), Role::King.of(Color::White));
        board.set_piece_at(sq("e8"), Role::Rook.of(Color::Black));
        board.set_piece_at(sq("a8"), Role::King.of(Color::Black));
        let game = Game::from_board(board, Color::White).expect("valid position");

        assert!(game.is_check(Color::White));
        assert!(!game.is_check(Color::Black));
        assert!(!game.is_checkmate(Color::White));
    }

    #[test]
    fn test_king_must_leave_check() {
        let mut board = Board::empty();
        board.set_piece_at(sq("e1"), Role::King.of(Color::White));
        board.set_piece_at(sq("e8"), Role::Rook.of(Color::Black));
        board.set_piece_at(sq("a1"), Role::Rook.of(Color::White));
        let mut game = Game::from_board(board, Color::White).expect("valid position");

        // A rook move that ignores the check is rejected.
        assert_eq!(
            game.play(m("a1a2")),
            Err(MoveError::WouldExposeOwnKing {
                color: Color::White,
            })
        );
        // Stepping off the file resolves it.
        assert!(game.play(m("e1d2")).is_ok());
        assert!(!game.is_check(Color::White));
    }

    #[test]
    fn test_promotion_requires_flag() {
        let mut board = Board::empty();
        board.set_piece_at(sq("a7"), Role::Pawn.of(Color::White));
        board.set_piece_at(sq("e1"), Role::King.of(Color::White));
        board.set_piece_at(sq("e8"), Role::King.of(Color::Black));

        let mut game = Game::from_board(board.clone(), Color::White).expect("valid position");
        game.play(m("a7a8")).unwrap();
        assert_eq!(
            game.board().piece_at(sq("a8")),
            Some(Role::Pawn.of(Color::White))
        );

        let mut game = Game::from_board(board, Color::White).expect("valid position");
        game.play(m("a7a8n")).unwrap();
        assert_eq!(
            game.board().piece_at(sq("a8")),
            Some(Role::Knight.of(Color::White))
        );
    }

    #[test]
    fn test_promotion_flag_ignored_off_last_rank() {
        let mut board = Board::empty();
        board.set_piece_at(sq("a5"), Role::Pawn.of(Color::White));
        board.set_piece_at(sq("e1"), Role::King.of(Color::White));
        board.set_piece_at(sq("e8"), Role::King.of(Color::Black));
        let mut game = Game::from_board(board, Color::White).expect("valid position");

        game.play(m("a5a6q")).unwrap();
        assert_eq!(
            game.board().piece_at(sq("a6")),
            Some(Role::Pawn.of(Color::White))
        );
    }

    #[test]
    fn test_valid_moves_requires_a_piece() {
        let game = Game::new();
        assert_eq!(
            game.valid_moves(sq("e4")),
            Err(MoveError::NoPieceAt { square: sq("e4") })
        );
    }

    #[test]
    fn test_valid_moves_answers_for_either_side() {
        let game = Game::new();
        let black_knight = game.valid_moves(sq("b8")).unwrap();
        assert_eq!(black_knight.len(), 2);
    }

    #[test]
    fn test_promotion_to_king_or_pawn_rejected() {
        let mut board = Board::empty();
        board.set_piece_at(sq("a7"), Role::Pawn.of(Color::White));
        board.set_piece_at(sq("e1"), Role::King.of(Color::White));
        board.set_piece_at(sq("e8"), Role::King.of(Color::Black));
        let mut game = Game::from_board(board, Color::White).expect("valid position");
        let before = game.clone();

        assert_eq!(
            game.play(m("a7a8k")),
            Err(MoveError::IllegalPromotion { role: Role::King })
        );
        assert_eq!(
            game.play(m("a7a8p")),
            Err(MoveError::IllegalPromotion { role: Role::Pawn })
        );
        assert_eq!(game, before);

        assert!(game.play(m("a7a8q")).is_ok());
    }

    #[test]
    fn test_from_board_rejects_piece_flood() {
        let mut board = Board::empty();
        for square in Square::all() {
            if square.rank() == 0 || square.rank() == 7 || square.file() == 0 || square.file() == 7
            {
                board.set_piece_at(square, Role::Queen.of(Color::White));
            }
        }

        assert_eq!(
            Game::from_board(board, Color::White),
            Err(PositionError::TooManyPieces {
                color: Color::White,
            })
        );
    }

    #[test]
    fn test_from_board_material_limits() {
        let mut board = Board::empty();
        for file in 0..8 {
            board.set_piece_at(
                Square::from_coords(file, 1).unwrap(),
                Role::Pawn.of(Color::Black),
            );
        }
        board.set_piece_at(sq("e4"), Role::Pawn.of(Color::Black));
        assert_eq!(
            Game::from_board(board, Color::White),
            Err(PositionError::TooManyPawns {
                color: Color::Black,
            })
        );

        let mut board = Board::empty();
        board.set_piece_at(sq("e1"), Role::King.of(Color::White));
        board.set_piece_at(sq("a1"), Role::King.of(Color::White));
        assert_eq!(
            Game::from_board(board, Color::White),
            Err(PositionError::TooManyKings {
                color: Color::White,
            })
        );
    }

    #[test]
    fn test_dense_position_moves_fit_inline() {
        // The densest side from_board accepts: a full complement of
        // fifteen queens plus the king.
        let mut board = Board::empty();
        for file in 0..8 {
            board.set_piece_at(
                Square::from_coords(file, 0).unwrap(),
                Role::Queen.of(Color::White),
            );
        }
        for file in 0..7 {
            board.set_piece_at(
                Square::from_coords(file, 1).unwrap(),
                Role::Queen.of(Color::White),
            );
        }
        board.set_piece_at(sq("h2"), Role::King.of(Color::White));
        let game = Game::from_board(board, Color::White).expect("valid position");

        let moves = game.legal_moves();
        assert!(!moves.is_empty());
    }

    #[test]
    fn test_twelve_opening_moves() {
        // Eight single pawn pushes and four knight moves.
        assert_eq!(Game::new().legal_moves().len(), 12);
    }
}
