//! Candidate destinations by piece movement pattern.
//!
//! Every function answers the same question: given the occupancy of the
//! board, which squares can a piece of this role and color reach from
//! `from`? Own-occupied squares are excluded, king safety is not considered
//! here.

use arrayvec::ArrayVec;

use crate::{board::Board, color::Color, role::Role, square::Square, types::Piece};

/// A container for candidate destinations that can be stored inline on the
/// stack. A queen reaches at most 27 squares.
pub type SquareList = ArrayVec<Square, 32>;

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Candidate destinations for the given piece, dispatching on its role.
pub fn targets(board: &Board, from: Square, piece: Piece) -> SquareList {
    match piece.role {
        Role::Pawn => pawn_targets(board, from, piece.color),
        Role::Knight => knight_targets(board, from, piece.color),
        Role::Bishop => bishop_targets(board, from, piece.color),
        Role::Rook => rook_targets(board, from, piece.color),
        Role::Queen => queen_targets(board, from, piece.color),
        Role::King => king_targets(board, from, piece.color),
    }
}

/// One square forward if empty, diagonally forward only onto an opposing
/// piece. No double step and no en passant.
pub fn pawn_targets(board: &Board, from: Square, color: Color) -> SquareList {
    let mut acc = SquareList::new();
    let dir = color.pawn_direction();

    if let Some(to) = from.offset(0, dir) {
        if board.piece_at(to).is_none() {
            acc.push(to);
        }
    }

    for d_file in [-1, 1] {
        if let Some(to) = from.offset(d_file, dir) {
            if board.piece_at(to).is_some_and(|p| p.color != color) {
                acc.push(to);
            }
        }
    }

    acc
}

pub fn knight_targets(board: &Board, from: Square, color: Color) -> SquareList {
    step_targets(board, from, color, &KNIGHT_JUMPS)
}

pub fn bishop_targets(board: &Board, from: Square, color: Color) -> SquareList {
    slide_targets(board, from, color, &DIAGONALS)
}

pub fn rook_targets(board: &Board, from: Square, color: Color) -> SquareList {
    slide_targets(board, from, color, &ORTHOGONALS)
}

/// Union of bishop and rook geometry.
pub fn queen_targets(board: &Board, from: Square, color: Color) -> SquareList {
    let mut acc = bishop_targets(board, from, color);
    acc.extend(rook_targets(board, from, color));
    acc
}

/// The eight adjacent squares. No castling.
pub fn king_targets(board: &Board, from: Square, color: Color) -> SquareList {
    step_targets(board, from, color, &KING_STEPS)
}

/// Fixed offsets, included unless occupied by the moving side.
fn step_targets(board: &Board, from: Square, color: Color, steps: &[(i8, i8)]) -> SquareList {
    let mut acc = SquareList::new();
    for &(d_file, d_rank) in steps {
        if let Some(to) = from.offset(d_file, d_rank) {
            if board.piece_at(to).map_or(true, |p| p.color != color) {
                acc.push(to);
            }
        }
    }
    acc
}

/// Walks each direction until the board edge, stopping short of an own
/// piece and including an opposing piece as a capture.
fn slide_targets(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)]) -> SquareList {
    let mut acc = SquareList::new();
    for &(d_file, d_rank) in dirs {
        let mut current = from;
        while let Some(to) = current.offset(d_file, d_rank) {
            match board.piece_at(to) {
                None => acc.push(to),
                Some(p) => {
                    if p.color != color {
                        acc.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }
    acc
}
