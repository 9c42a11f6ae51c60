use super::{Board, ChessField, Color, Move, Piece, PieceKind, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

const DIAGONALS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

// Per side: rook origin column, king destination column, rook destination column.
const CASTLE_LANES: [(u8, u8, u8); 2] = [(0, 1, 2), (7, 5, 4)];

impl Board {
    /// Moves for the piece standing on `field`. With `ensure_king_safety`
    /// the pseudo-legal list is filtered through the check-safety predicate;
    /// without it only movement geometry and occupancy apply.
    pub fn valid_moves_from(&mut self, field: ChessField, ensure_king_safety: bool) -> Vec<Move> {
        let moves = self.pseudo_moves_from(field, true);
        if !ensure_king_safety {
            return moves;
        }
        moves
            .into_iter()
            .filter(|&mv| self.move_is_safe_for_own_king(mv))
            .collect()
    }

    /// Pseudo-legal geometry only. Check detection and the castling attack
    /// scan call this with `include_castling` off.
    pub(crate) fn pseudo_moves_from(&self, field: ChessField, include_castling: bool) -> Vec<Move> {
        let piece = match self.piece_at(field) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(field, piece),
            PieceKind::Knight => self.offset_moves(field, piece, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.bishop_moves(field, piece),
            PieceKind::Rook => self.rook_moves(field, piece),
            PieceKind::Queen => {
                let mut moves = self.rook_moves(field, piece);
                moves.extend(self.bishop_moves(field, piece));
                moves
            }
            PieceKind::King => {
                let mut moves = self.offset_moves(field, piece, &KING_OFFSETS);
                if include_castling {
                    moves.extend(self.castle_moves(field, piece));
                }
                moves
            }
        }
    }

    fn pawn_moves(&self, field: ChessField, piece: Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let forward: i8 = match piece.color {
            Color::White => 1,
            Color::Black => -1,
        };
        let start_row: u8 = match piece.color {
            Color::White => 1,
            Color::Black => 6,
        };

        let ahead_row = field.row as i8 + forward;

        // Forward steps onto empty squares only
        if let Some(Square::Empty) = self.square_at(ahead_row, field.col as i8) {
            moves.push(Move::new(field.row, field.col, ahead_row as u8, field.col));

            if field.row == start_row {
                let two_ahead = field.row as i8 + 2 * forward;
                if let Some(Square::Empty) = self.square_at(two_ahead, field.col as i8) {
                    moves.push(Move::new(field.row, field.col, two_ahead as u8, field.col));
                }
            }
        }

        // Diagonal captures
        for offset in [-1i8, 1] {
            let capture_col = field.col as i8 + offset;
            if let Some(Square::Occupied(other)) = self.square_at(ahead_row, capture_col) {
                if other.color != piece.color {
                    moves.push(Move::new(
                        field.row,
                        field.col,
                        ahead_row as u8,
                        capture_col as u8,
                    ));
                }
            }
        }

        moves
    }

    /// Fixed-offset movers: knight and king (castling aside).
    fn offset_moves(&self, field: ChessField, piece: Piece, offsets: &[(i8, i8)]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in offsets {
            let row = field.row as i8 + d_row;
            let col = field.col as i8 + d_col;
            match self.square_at(row, col) {
                Some(Square::Empty) => {
                    moves.push(Move::new(field.row, field.col, row as u8, col as u8));
                }
                Some(Square::Occupied(other)) if other.color != piece.color => {
                    moves.push(Move::new(field.row, field.col, row as u8, col as u8));
                }
                _ => {}
            }
        }
        moves
    }

    /// Walks each of the four axis directions outward until blocked; the
    /// blocking square is included only when it holds an enemy piece.
    fn rook_moves(&self, field: ChessField, piece: Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in &ROOK_DIRECTIONS {
            let mut row = field.row as i8 + d_row;
            let mut col = field.col as i8 + d_col;
            while let Some(square) = self.square_at(row, col) {
                match square {
                    Square::Empty => {
                        moves.push(Move::new(field.row, field.col, row as u8, col as u8));
                    }
                    Square::Occupied(other) => {
                        if other.color != piece.color {
                            moves.push(Move::new(field.row, field.col, row as u8, col as u8));
                        }
                        break;
                    }
                }
                row += d_row;
                col += d_col;
            }
        }
        moves
    }

    /// All four diagonals share the distance range 1..7, so they advance in
    /// lockstep through a single loop, each with its own blocked flag.
    fn bishop_moves(&self, field: ChessField, piece: Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut blocked = [false; 4];

        for distance in 1..8i8 {
            for (diagonal, &(d_row, d_col)) in DIAGONALS.iter().enumerate() {
                if blocked[diagonal] {
                    continue;
                }
                let row = field.row as i8 + d_row * distance;
                let col = field.col as i8 + d_col * distance;
                match self.square_at(row, col) {
                    None => blocked[diagonal] = true,
                    Some(Square::Empty) => {
                        moves.push(Move::new(field.row, field.col, row as u8, col as u8));
                    }
                    Some(Square::Occupied(other)) => {
                        if other.color != piece.color {
                            moves.push(Move::new(field.row, field.col, row as u8, col as u8));
                        }
                        blocked[diagonal] = true;
                    }
                }
            }
        }
        moves
    }

    /// Castling candidates for the king on `field`. Eligible only while the
    /// king has never moved and is not in check; per side the corner rook
    /// must be an unmoved rook of the same color and every square strictly
    /// between king and rook must be empty and out of reach of any enemy
    /// pseudo-legal move. Destinations are fixed per side.
    fn castle_moves(&self, field: ChessField, king: Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        if king.moved || self.is_king_in_check(king.color) {
            return moves;
        }

        let back = field.row;
        for &(rook_col, king_to_col, rook_to_col) in &CASTLE_LANES {
            let rook_field = ChessField::new(back, rook_col);
            let rook_ok = matches!(
                self.piece_at(rook_field),
                Some(Piece { kind: PieceKind::Rook, color, moved: false }) if color == king.color
            );
            if !rook_ok {
                continue;
            }

            let (lo, hi) = if rook_col < field.col {
                (rook_col + 1, field.col)
            } else {
                (field.col + 1, rook_col)
            };
            let between: Vec<ChessField> =
                (lo..hi).map(|col| ChessField::new(back, col)).collect();

            if between.iter().any(|&f| self.piece_at(f).is_some()) {
                continue;
            }
            if self.any_enemy_move_lands_on(king.color, &between) {
                continue;
            }

            moves.push(Move::Castle {
                king_from: field,
                king_to: ChessField::new(back, king_to_col),
                rook_from: rook_field,
                rook_to: ChessField::new(back, rook_to_col),
            });
        }
        moves
    }

    /// Castling attack scan: does any enemy pseudo-legal move end on one of
    /// `targets`? Enemy castle candidates are excluded.
    fn any_enemy_move_lands_on(&self, color: Color, targets: &[ChessField]) -> bool {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let from = ChessField::new(row, col);
                match self.piece_at(from) {
                    Some(piece) if piece.color != color => {
                        for mv in self.pseudo_moves_from(from, false) {
                            if targets.contains(&mv.destination()) {
                                return true;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        false
    }
}
