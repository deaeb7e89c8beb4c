//! The 10-step apply/undo procedure. `undo` always restores state from the
//! `UndoRecord` produced by the matching `apply`; it never recomputes
//! anything from scratch.

use super::{CastlingRights, Position, UndoRecord};
use crate::types::{Color, Move, MoveFlag, PieceKind, Square};
use crate::zobrist;

fn rook_home_square(color: Color, kingside: bool) -> Square {
    let rank = if color == Color::White { 0 } else { 7 };
    let file = if kingside { 7 } else { 0 };
    Square::new(rank, file)
}

fn rook_castle_dest(color: Color, kingside: bool) -> Square {
    let rank = if color == Color::White { 0 } else { 7 };
    let file = if kingside { 5 } else { 3 };
    Square::new(rank, file)
}

/// Whether an enemy pawn sits beside `to` on the same rank — the condition
/// that makes a double push an actual en-passant opportunity rather than a
/// phantom hash key.
fn enemy_pawn_adjacent(pos: &Position, mover: Color, to: Square) -> bool {
    let enemy_pawns = pos.pieces_of(mover.opponent(), PieceKind::Pawn);
    let rank = to.rank();
    let file = to.file() as i8;
    [file - 1, file + 1]
        .into_iter()
        .filter(|&f| (0..8).contains(&f))
        .any(|f| enemy_pawns.has(Square::new(rank, f as u8)))
}

impl Position {
    /// Apply `mv` (assumed already legal) to the position.
    pub fn apply(&mut self, mv: Move) {
        let mover = self.side_to_move;
        let mut key = self.zobrist_key;

        // 1. Remove the moved piece from its origin square.
        self.remove_piece(mv.from, mover, mv.piece);
        key ^= zobrist::piece_key(mv.piece, mover, mv.from);

        // 2. Handle captures, including en passant.
        let captured = if mv.is_en_passant() {
            let captured_sq = Square::new(mv.from.rank(), mv.to.file());
            self.remove_piece(captured_sq, mover.opponent(), PieceKind::Pawn);
            key ^= zobrist::piece_key(PieceKind::Pawn, mover.opponent(), captured_sq);
            Some((PieceKind::Pawn, captured_sq))
        } else if let Some(captured_piece) = mv.captured {
            self.remove_piece(mv.to, mover.opponent(), captured_piece);
            key ^= zobrist::piece_key(captured_piece, mover.opponent(), mv.to);
            Some((captured_piece, mv.to))
        } else {
            None
        };

        // 3. Place the moved (or promoted) piece at the destination.
        let placed = mv.promotion.unwrap_or(mv.piece);
        self.set_piece(mv.to, mover, placed);
        key ^= zobrist::piece_key(placed, mover, mv.to);

        // 4. Move the rook too, if this was castling.
        if mv.is_castling() {
            let kingside = mv.flag == MoveFlag::CastleKingside;
            let rook_from = rook_home_square(mover, kingside);
            let rook_to = rook_castle_dest(mover, kingside);
            self.remove_piece(rook_from, mover, PieceKind::Rook);
            self.set_piece(rook_to, mover, PieceKind::Rook);
            key ^= zobrist::piece_key(PieceKind::Rook, mover, rook_from);
            key ^= zobrist::piece_key(PieceKind::Rook, mover, rook_to);
        }

        // 5. Toggle the outgoing en-passant file out of the hash.
        if let Some(old_ep) = self.en_passant_square {
            key ^= zobrist::en_passant_key(old_ep.file());
        }

        // 6. Set the new en-passant target — only a double pawn push with an
        // enemy pawn actually beside the landing square creates a real
        // en-passant right — and toggle it into the hash.
        let new_ep = if mv.is_double_pawn_push() && enemy_pawn_adjacent(self, mover, mv.to) {
            let mid_rank = (mv.from.rank() + mv.to.rank()) / 2;
            let sq = Square::new(mid_rank, mv.from.file());
            key ^= zobrist::en_passant_key(sq.file());
            Some(sq)
        } else {
            None
        };

        // 7. Update castling rights and XOR the diff.
        let previous_rights = self.castling_rights;
        let mut rights = self.castling_rights;
        if mv.piece == PieceKind::King {
            rights.set(mover, true, false);
            rights.set(mover, false, false);
        }
        if mv.piece == PieceKind::Rook {
            if mv.from == rook_home_square(mover, true) {
                rights.set(mover, true, false);
            } else if mv.from == rook_home_square(mover, false) {
                rights.set(mover, false, false);
            }
        }
        if let Some((PieceKind::Rook, captured_sq)) = captured {
            let opp = mover.opponent();
            if captured_sq == rook_home_square(opp, true) {
                rights.set(opp, true, false);
            } else if captured_sq == rook_home_square(opp, false) {
                rights.set(opp, false, false);
            }
        }
        for (color, kingside, idx) in [
            (Color::White, true, 0usize),
            (Color::White, false, 1usize),
            (Color::Black, true, 0usize),
            (Color::Black, false, 1usize),
        ] {
            if previous_rights.get(color, kingside) != rights.get(color, kingside) {
                key ^= zobrist::castle_key(color, idx);
            }
        }

        // 8. Toggle side to move.
        key ^= zobrist::side_key();

        // 9. Update halfmove/fullmove counters.
        let halfmove_clock = if mv.piece == PieceKind::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        let fullmove_number = if mover == Color::Black {
            self.fullmove_number + 1
        } else {
            self.fullmove_number
        };

        let record = UndoRecord {
            castling_rights: previous_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            zobrist_key: self.zobrist_key,
            captured,
            repetition_pushed: true,
        };

        self.castling_rights = rights;
        self.en_passant_square = new_ep;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        self.zobrist_key = key;
        self.side_to_move = mover.opponent();

        // 10. Push the undo record and extend the repetition history.
        self.history.push(record);
        self.repetition_keys.push(key);

        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
    }

    /// Reverse the most recently applied move using its undo record. Never
    /// recomputes state from scratch.
    pub fn undo(&mut self, mv: Move) {
        let record = self.history.pop().expect("undo called with empty history");
        if record.repetition_pushed {
            self.repetition_keys.pop();
        }

        let mover = self.side_to_move.opponent();

        // Remove the placed piece (reverse of step 3), restore moved piece.
        let placed = mv.promotion.unwrap_or(mv.piece);
        self.remove_piece(mv.to, mover, placed);
        self.set_piece(mv.from, mover, mv.piece);

        if mv.is_castling() {
            let kingside = mv.flag == MoveFlag::CastleKingside;
            let rook_from = rook_home_square(mover, kingside);
            let rook_to = rook_castle_dest(mover, kingside);
            self.remove_piece(rook_to, mover, PieceKind::Rook);
            self.set_piece(rook_from, mover, PieceKind::Rook);
        }

        if let Some((captured_piece, captured_sq)) = record.captured {
            self.set_piece(captured_sq, mover.opponent(), captured_piece);
        }

        self.castling_rights = record.castling_rights;
        self.en_passant_square = record.en_passant_square;
        self.halfmove_clock = record.halfmove_clock;
        self.fullmove_number = if mover == Color::Black {
            self.fullmove_number - 1
        } else {
            self.fullmove_number
        };
        self.zobrist_key = record.zobrist_key;
        self.side_to_move = mover;

        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
    }

    /// A null move: flips side to move and clears the en-passant square
    /// without moving any piece. Used by null-move pruning.
    pub fn apply_null(&mut self) -> (Option<Square>, u64) {
        let undo = (self.en_passant_square, self.zobrist_key);
        if let Some(ep) = self.en_passant_square {
            self.zobrist_key ^= zobrist::en_passant_key(ep.file());
        }
        self.zobrist_key ^= zobrist::side_key();
        self.en_passant_square = None;
        self.side_to_move = self.side_to_move.opponent();
        undo
    }

    pub fn undo_null(&mut self, undo: (Option<Square>, u64)) {
        self.en_passant_square = undo.0;
        self.zobrist_key = undo.1;
        self.side_to_move = self.side_to_move.opponent();
    }
}
