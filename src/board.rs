use std::fmt;

use crate::{color::Color, role::Role, square::Square, types::Piece};

/// Back rank layout, file `a` through file `h`.
const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Piece positions on the board.
///
/// Holds at most one piece per square and nothing else: no turn, no history.
/// Equality is deep, square by square.
///
/// # Examples
///
/// ```
/// use arbiter::{Board, Color, Role, Square};
///
/// let board = Board::new();
/// assert_eq!(board.piece_at(Square::E1), Some(Role::King.of(Color::White)));
/// assert_eq!(board.piece_at(Square::E4), None);
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Constructs a board with no pieces on it.
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// Constructs a board with the standard starting pieces.
    pub fn new() -> Board {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Clears the board and repopulates the 32-piece standard layout.
    pub fn reset(&mut self) {
        self.squares = [None; 64];
        for (file, role) in (0..8).zip(BACKRANK) {
            for color in Color::ALL {
                let backrank = color.backrank();
                let pawn_rank = backrank + color.pawn_direction();
                self.set_piece_at(
                    Square::from_coords(file, backrank).expect("backrank square"),
                    role.of(color),
                );
                self.set_piece_at(
                    Square::from_coords(file, pawn_rank).expect("pawn rank square"),
                    Role::Pawn.of(color),
                );
            }
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Puts a piece on a square, replacing whatever was there.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    /// Clears a square, returning the removed piece. No-op on an empty
    /// square.
    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// The square of the given side's king, if that king is on the board.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| *piece == Role::King.of(color))
            .map(|(sq, _)| sq)
    }

    /// All occupied squares with their pieces, `a1` through `h8`.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::from_coords(file, rank).expect("board square");
                let ch = self.piece_at(sq).map_or('.', Piece::char);
                write!(f, "{}{}", ch, if file < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{self}")
    }
}
