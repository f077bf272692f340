use std::{error::Error, fmt, str::FromStr};

/// A square of the board, packed as `file | rank << 3`.
///
/// Files and ranks are indexed `0..8`; `a1` is file 0, rank 0. A `Square`
/// always addresses a real square, so board queries taking a `Square` cannot
/// go out of range. Raw coordinates coming from the outside are checked at
/// construction instead.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(i8);

impl Square {
    /// Constructs a square from zero-based file and rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::Square;
    ///
    /// assert_eq!(Square::from_coords(4, 1), Some(Square::E2));
    /// assert_eq!(Square::from_coords(8, 1), None);
    /// ```
    pub fn from_coords(file: i8, rank: i8) -> Option<Square> {
        if 0 <= file && file < 8 && 0 <= rank && rank < 8 {
            Some(Square(file | (rank << 3)))
        } else {
            None
        }
    }

    #[inline]
    pub fn file(self) -> i8 {
        self.0 & 7
    }

    #[inline]
    pub fn rank(self) -> i8 {
        self.0 >> 3
    }

    /// Shifts the square by a file and rank delta, or `None` when the result
    /// would leave the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbiter::Square;
    ///
    /// assert_eq!(Square::E2.offset(0, 1), Some(Square::E3));
    /// assert_eq!(Square::H8.offset(1, 0), None);
    /// ```
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        Square::from_coords(self.file() + d_file, self.rank() + d_rank)
    }

    /// The square's index `0..64`, with `a1` at 0 and `h8` at 63.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All 64 squares, `a1` through `h8`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

/// Error when raw coordinates lie outside the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutOfRange;

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("coordinates out of range")
    }
}

impl Error for OutOfRange {}

impl TryFrom<(i8, i8)> for Square {
    type Error = OutOfRange;

    #[inline]
    fn try_from((file, rank): (i8, i8)) -> Result<Square, OutOfRange> {
        Square::from_coords(file, rank).ok_or(OutOfRange)
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parses algebraic notation, e.g. `e4`.
    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Ok(Square(
                (file as i8 - 'a' as i8) | ((rank as i8 - '1' as i8) << 3),
            )),
            _ => Err(ParseSquareError),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file() as u8) as char,
            (b'1' + self.rank() as u8) as char
        )
    }
}

impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}
