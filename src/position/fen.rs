//! FEN parsing/serialization and long-algebraic move-string parsing.

use super::{CastlingRights, Position};
use crate::error::{FenError, MoveParseError};
use crate::types::{Color, Move, MoveList, PieceKind, Square};

impl Position {
    /// Parse a FEN string. Accepts the standard 6-field form as well as the
    /// 4- and 5-field variants, defaulting halfmove clock to 0 and fullmove
    /// number to 1 when absent.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRank { rank: ranks.len() });
        }
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as u8;
                } else {
                    let color = if c.is_uppercase() { Color::White } else { Color::Black };
                    let piece = PieceKind::from_fen_char(c).ok_or(FenError::InvalidPiece { ch: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_from_top,
                            files: file as usize + 1,
                        });
                    }
                    pos.set_piece(Square::new(rank, file), color, piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::TooManyFiles { rank: rank_from_top, files: file as usize });
            }
        }

        for color in [Color::White, Color::Black] {
            let count = pos.pieces_of(color, PieceKind::King).popcount();
            if count != 1 {
                return Err(FenError::WrongKingCount {
                    color_is_white: color == Color::White,
                    count,
                });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove { found: other.to_string() }),
        };

        let mut rights = CastlingRights::default();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => rights.white_kingside = true,
                    'Q' => rights.white_queenside = true,
                    'k' => rights.black_kingside = true,
                    'q' => rights.black_queenside = true,
                    _ => return Err(FenError::InvalidCastling { ch: c }),
                }
            }
        }
        pos.castling_rights = rights;

        pos.en_passant_square = if parts[3] == "-" {
            None
        } else {
            let sq = Square::from_algebraic(parts[3])
                .ok_or_else(|| FenError::InvalidEnPassant { found: parts[3].to_string() })?;
            let expected_rank = if pos.side_to_move == Color::White { 5 } else { 2 };
            if sq.rank() != expected_rank {
                return Err(FenError::EnPassantInconsistent { found: parts[3].to_string() });
            }
            Some(sq)
        };

        if parts.len() >= 5 {
            pos.halfmove_clock = parts[4].parse().unwrap_or(0);
        }
        if parts.len() >= 6 {
            pos.fullmove_number = parts[5].parse().unwrap_or(1);
        }

        pos.zobrist_key = pos.recompute_zobrist_from_scratch();
        pos.repetition_keys.push(pos.zobrist_key);
        Ok(pos)
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0u8;
            for file in 0..8u8 {
                let sq = Square::new(rank, file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.side_to_move == Color::White { "w" } else { "b" };

        let cr = self.castling_rights;
        let mut castling = String::new();
        if cr.white_kingside {
            castling.push('K');
        }
        if cr.white_queenside {
            castling.push('Q');
        }
        if cr.black_kingside {
            castling.push('k');
        }
        if cr.black_queenside {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self.en_passant_square.map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

/// Parse a long-algebraic move string (e.g. `"e2e4"`, `"e7e8q"`) against the
/// supplied legal-move list. A syntactically well-formed string that names
/// no legal move returns `Ok(None)`, which callers at the `Game` boundary
/// turn into `EngineError::IllegalMove`; move generation itself never
/// fails, so the only failure mode here is one of notation.
pub fn parse_long_algebraic(s: &str, legal_moves: &MoveList) -> Result<Option<Move>, MoveParseError> {
    if s.len() < 4 || s.len() > 5 {
        return Err(MoveParseError::InvalidLength { len: s.len() });
    }
    let from = Square::from_algebraic(&s[0..2])
        .ok_or_else(|| MoveParseError::InvalidSquare { notation: s.to_string() })?;
    let to = Square::from_algebraic(&s[2..4])
        .ok_or_else(|| MoveParseError::InvalidSquare { notation: s.to_string() })?;
    let promotion = if s.len() == 5 {
        let ch = s.as_bytes()[4] as char;
        let piece = PieceKind::from_fen_char(ch).ok_or(MoveParseError::InvalidPromotion { ch })?;
        if matches!(piece, PieceKind::Pawn | PieceKind::King) {
            return Err(MoveParseError::InvalidPromotion { ch });
        }
        Some(piece)
    } else {
        None
    };

    Ok(legal_moves
        .iter()
        .find(|m| m.from == from && m.to == to && m.promotion == promotion)
        .copied())
}
