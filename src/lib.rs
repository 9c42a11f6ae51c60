//! Chess rules engine: board state, legal-move generation, check and
//! mate detection, move execution, and a uniform-random move picker.

pub mod board;

pub use board::{Board, ChessField, Color, GameState, Move, Piece, PieceKind, Square};
