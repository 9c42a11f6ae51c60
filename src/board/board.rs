use super::PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};
use super::Square::Occupied;
use super::{ChessField, Color, GameState, Move, Piece, PieceKind, Square};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [[Square; 8]; 8],
    pub active_color: Color,
}

impl Board {
    /// Creates an empty board, White to move.
    pub fn new() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
            active_color: Color::White,
        }
    }

    /// Creates the starting position. The back rank runs R N B K Q B N R,
    /// mirrored for Black on row 7.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, King, Queen, Bishop, Knight, Rook];

        let mut board = Self::new();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Occupied(Piece::new(Color::White, kind));
            board.squares[7][col] = Occupied(Piece::new(Color::Black, kind));
        }
        for col in 0..8 {
            board.squares[1][col] = Occupied(Piece::new(Color::White, Pawn));
            board.squares[6][col] = Occupied(Piece::new(Color::Black, Pawn));
        }
        board
    }

    /// Bounds-checked lookup. Every generator goes through this before
    /// dereferencing a candidate square.
    pub fn square_at(&self, row: i8, col: i8) -> Option<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(self.squares[row as usize][col as usize])
        } else {
            None
        }
    }

    pub fn piece_at(&self, field: ChessField) -> Option<Piece> {
        match self.squares[field.row as usize][field.col as usize] {
            Occupied(piece) => Some(piece),
            Square::Empty => None,
        }
    }

    fn set_square(&mut self, field: ChessField, square: Square) {
        self.squares[field.row as usize][field.col as usize] = square;
    }

    /// Scans every enemy piece and reports whether any of its pseudo-legal
    /// moves lands on the king of `color`. Castling generation is disabled
    /// here; a castle never captures, and skipping it keeps the call chain
    /// safety filter -> check detection -> pseudo generation from re-entering
    /// itself.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let field = ChessField::new(row, col);
                match self.piece_at(field) {
                    Some(piece) if piece.color != color => {
                        for mv in self.pseudo_moves_from(field, false) {
                            if let Some(Piece {
                                kind: King,
                                color: king_color,
                                ..
                            }) = self.piece_at(mv.destination())
                            {
                                if king_color == color {
                                    return true;
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        false
    }

    /// The legality predicate: speculatively applies `mv` without flipping
    /// the turn, asks whether the mover's king is in check, and restores the
    /// affected cells. The restore is unconditional.
    pub fn move_is_safe_for_own_king(&mut self, mv: Move) -> bool {
        let mover = match self.piece_at(mv.origin()) {
            Some(piece) => piece,
            None => return false,
        };

        let cells = match mv {
            Move::Standard { from, to } => vec![from, to],
            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => vec![king_from, king_to, rook_from, rook_to],
        };
        let snapshot: Vec<(ChessField, Square)> = cells
            .into_iter()
            .map(|field| (field, self.squares[field.row as usize][field.col as usize]))
            .collect();

        self.execute_move(mv, false);
        let safe = !self.is_king_in_check(mover.color);

        for (field, square) in snapshot {
            self.set_square(field, square);
        }
        safe
    }

    /// Applies a move permanently. A pawn reaching its last rank is replaced
    /// by a queen of the same color; a castle relocates king and rook in one
    /// step. Flips the side to move unless `alternate_turn` is suppressed for
    /// internal what-if simulation.
    ///
    /// Executing a move whose origin is empty violates the generator contract
    /// and leaves the board untouched.
    pub fn execute_move(&mut self, mv: Move, alternate_turn: bool) {
        let mover = match self.piece_at(mv.origin()) {
            Some(piece) => piece,
            None => return,
        };

        match mv {
            Move::Standard { from, to } => {
                let landed = if mover.kind == Pawn && to.row == mover.color.promotion_row() {
                    Piece {
                        color: mover.color,
                        kind: Queen,
                        moved: true,
                    }
                } else {
                    Piece {
                        moved: true,
                        ..mover
                    }
                };
                self.set_square(to, Occupied(landed));
                self.set_square(from, Square::Empty);
            }
            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => {
                let rook = match self.piece_at(rook_from) {
                    Some(piece) => piece,
                    None => return,
                };
                self.set_square(
                    king_to,
                    Occupied(Piece {
                        moved: true,
                        ..mover
                    }),
                );
                self.set_square(king_from, Square::Empty);
                self.set_square(
                    rook_to,
                    Occupied(Piece {
                        moved: true,
                        ..rook
                    }),
                );
                self.set_square(rook_from, Square::Empty);
            }
        }

        if alternate_turn {
            self.active_color = mover.color.opposite();
        }
    }

    /// Union of the king-safe moves of every piece of the side to move.
    pub fn moves_for_active_color(&mut self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (field, _) in self.uncaptured_pieces(self.active_color) {
            moves.extend(self.valid_moves_from(field, true));
        }
        moves
    }

    /// Classifies the position for the side to move. Recomputed from scratch
    /// on every call.
    pub fn game_state(&mut self) -> GameState {
        if !self.moves_for_active_color().is_empty() {
            return GameState::Ongoing;
        }
        if self.is_king_in_check(self.active_color) {
            GameState::Checkmate
        } else {
            GameState::Stalemate
        }
    }

    /// All live pieces of `color`, with the squares they stand on.
    pub fn uncaptured_pieces(&self, color: Color) -> Vec<(ChessField, Piece)> {
        let mut pieces = Vec::new();
        for row in 0..8u8 {
            for col in 0..8u8 {
                let field = ChessField::new(row, col);
                if let Some(piece) = self.piece_at(field) {
                    if piece.color == color {
                        pieces.push((field, piece));
                    }
                }
            }
        }
        pieces
    }

    /// Picks a uniformly random piece of `color` that still has a legal move
    /// (wrapping linear search from a random starting index), then a
    /// uniformly random legal move for it. `None` means the color has no
    /// legal move anywhere.
    pub fn random_move_for_color(
        &mut self,
        color: Color,
        rng: &mut impl Rng,
    ) -> Option<Move> {
        let pieces = self.uncaptured_pieces(color);
        if pieces.is_empty() {
            return None;
        }

        let start = rng.gen_range(0..pieces.len());
        for offset in 0..pieces.len() {
            let (field, _) = pieces[(start + offset) % pieces.len()];
            let moves = self.valid_moves_from(field, true);
            if let Some(&mv) = moves.choose(rng) {
                return Some(mv);
            }
        }
        None
    }

    /// Textual dump, row 7 at the top: piece glyphs, `-` for empty.
    /// Debug and test output only.
    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        for row in (0..8).rev() {
            for col in 0..8 {
                let glyph = match &self.squares[row][col] {
                    Occupied(piece) => piece.to_char(),
                    Square::Empty => '-',
                };
                if col > 0 {
                    board_representation.push(' ');
                }
                board_representation.push(glyph);
            }
            board_representation.push('\n');
        }
        board_representation
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
