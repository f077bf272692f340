//! A chess rules engine with a mailbox board.
//!
//! Covers the vocabulary types, per-piece move generation, turn enforcement
//! and game end detection. The rule set is deliberately small: no castling,
//! no en passant, no double pawn step, and no repetition or fifty-move
//! accounting. Text I/O is limited to coordinate notation for squares and
//! moves; wire and storage formats for whole games are the hosting
//! application's concern.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use arbiter::Game;
//!
//! let game = Game::new();
//! let legals = game.legal_moves();
//! assert_eq!(legals.len(), 12);
//! ```
//!
//! Play moves:
//!
//! ```
//! use arbiter::{Color, Game, Move, Role, Square};
//!
//! let mut game = Game::new();
//!
//! // 1. Nf3
//! game.play(Move::new(Square::G1, Square::F3))?;
//!
//! assert_eq!(
//!     game.board().piece_at(Square::F3),
//!     Some(Role::Knight.of(Color::White))
//! );
//! assert_eq!(game.turn(), Color::Black);
//! # Ok::<_, arbiter::MoveError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use arbiter::{Color, Game};
//!
//! let game = Game::new();
//! assert!(!game.is_check(Color::White));
//! assert!(!game.is_checkmate(Color::White));
//! assert!(!game.is_stalemate(Color::Black));
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.

#![warn(missing_debug_implementations)]

mod color;
mod game;
mod perft;
mod role;
mod square;
mod types;

pub mod board;
pub mod geometry;

pub use board::Board;
pub use color::{Color, ParseColorError};
pub use game::{Game, MoveError, PositionError};
pub use perft::perft;
pub use role::Role;
pub use square::{OutOfRange, ParseSquareError, Square};
pub use types::{Move, MoveList, ParseMoveError, Piece};
