use std::{error::Error, fmt, str::FromStr};

use arrayvec::ArrayVec;

use crate::{color::Color, role::Role, square::Square};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// The piece letter, uppercase for White and lowercase for Black.
    pub fn char(self) -> char {
        self.color
            .fold(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

/// A move from one square to another, with an optional promotion.
///
/// # Display
///
/// `Move` reads and writes coordinate notation: origin square, target
/// square, and the lowercase letter of the promotion piece if any, e.g.
/// `e2e3` or `a7a8q`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Move {
    /// Constructs a move without promotion.
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Checks if the move carries a promotion.
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.promotion {
            Some(promotion) => write!(f, "{}{}{}", self.from, self.to, promotion.char()),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

/// Error when parsing an invalid move.
#[derive(Clone, Debug)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid move notation")
    }
}

impl Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        // is_ascii() makes slicing at byte boundaries safe.
        if s.len() < 4 || s.len() > 5 || !s.is_ascii() {
            return Err(ParseMoveError);
        }

        let from = s[0..2].parse().map_err(|_| ParseMoveError)?;
        let to = s[2..4].parse().map_err(|_| ParseMoveError)?;

        let promotion = match s.chars().nth(4) {
            Some(ch) => Some(Role::from_char(ch).ok_or(ParseMoveError)?),
            None => None,
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited, but there is enough space for every legal move
/// of any position within the material limits enforced by
/// [`Game::from_board`](crate::Game::from_board): a side has at most 16
/// pieces, and no piece reaches more than 27 squares.
pub type MoveList = ArrayVec<Move, 512>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char_roundtrip() {
        let piece = Role::Queen.of(Color::Black);
        assert_eq!(piece.char(), 'q');
        assert_eq!(Piece::from_char('q'), Some(piece));
        assert_eq!(Piece::from_char('Q'), Some(Role::Queen.of(Color::White)));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_parse_move() {
        let m: Move = "e2e3".parse().unwrap();
        assert_eq!(m, Move::new(Square::E2, Square::E3));

        let m: Move = "a7a8q".parse().unwrap();
        assert_eq!(m.promotion, Some(Role::Queen));

        assert!("e2".parse::<Move>().is_err());
        assert!("e2e3x".parse::<Move>().is_err());
        assert!("e2e9".parse::<Move>().is_err());
    }

    #[test]
    fn test_display_move() {
        assert_eq!(Move::new(Square::G1, Square::F3).to_string(), "g1f3");
        assert_eq!(
            Move {
                from: Square::A7,
                to: Square::A8,
                promotion: Some(Role::Knight),
            }
            .to_string(),
            "a7a8n"
        );
    }
}
