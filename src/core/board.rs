//! Board representation for the 4×5 variant
//!
//! Squares are numbered `file + 4 * rank` (a1 = 0, d5 = 19). The board keeps
//! a mailbox for occupancy queries alongside piece and color bitboards for
//! attack detection, plus an incrementally updated Zobrist hash.

use super::bitboard::Bitboard;
use super::moves::Move;
use super::position::Position;
use super::zobrist::ZobristKeys;
use crate::engine::movegen::MoveGen;
use crate::error::{EngineError, EngineResult};
use std::fmt;

pub const FILES: u8 = 4;
pub const RANKS: u8 = 5;
pub const SQUARE_COUNT: usize = (FILES * RANKS) as usize;

/// Square index (0-19, a1=0, d5=19)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const A2: Square = Square(4);
    pub const B2: Square = Square(5);
    pub const C2: Square = Square(6);
    pub const D2: Square = Square(7);
    pub const A3: Square = Square(8);
    pub const B3: Square = Square(9);
    pub const C3: Square = Square(10);
    pub const D3: Square = Square(11);
    pub const A4: Square = Square(12);
    pub const B4: Square = Square(13);
    pub const C4: Square = Square(14);
    pub const D4: Square = Square(15);
    pub const A5: Square = Square(16);
    pub const B5: Square = Square(17);
    pub const C5: Square = Square(18);
    pub const D5: Square = Square(19);

    #[inline]
    pub const fn new(sq: u8) -> Self {
        Square(sq)
    }

    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Self {
        Square(rank * FILES + file)
    }

    /// Square at `(file + df, rank + dr)`, or `None` when that falls off the board
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..FILES as i8).contains(&file) && (0..RANKS as i8).contains(&rank) {
            Some(Square::from_file_rank(file as u8, rank as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % FILES
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / FILES
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::from_square(self.0)
    }

    /// All squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT as u8).map(Square)
    }

    /// Parse a square from algebraic notation (e.g., "b3")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        if s.len() != 2 {
            return None;
        }
        let bytes = s.as_bytes();
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < FILES && rank < RANKS {
            Some(Square::from_file_rank(file, rank))
        } else {
            None
        }
    }

    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{}{}", file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// Piece color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank step a pawn of this color moves by
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the pawns of this color start on
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => RANKS - 2,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => RANKS - 1,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

/// Piece type
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Promotion choices in generation order
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// A colored piece
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Uppercase for white, lowercase for black
    pub fn to_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(piece_type, color))
    }

    /// Index into 12-entry per-piece tables
    #[inline]
    pub fn table_index(self) -> usize {
        self.color.index() * 6 + self.piece_type.index()
    }
}

/// The board state
#[derive(Clone)]
pub struct Board {
    /// Bitboards for each piece type
    pieces: [Bitboard; 6],
    /// Bitboards for each color
    colors: [Bitboard; 2],
    /// Mailbox lookup (None if empty)
    squares: [Option<Piece>; SQUARE_COUNT],
    turn: Color,
    fullmove_number: u16,
    hash: u64,
}

impl Board {
    pub const STARTPOS_FEN: &'static str = "rqkr/pppp/4/PPPP/RQKR w 1";

    pub fn empty() -> Self {
        Board {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            squares: [None; SQUARE_COUNT],
            turn: Color::White,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /// Silverman 4×5 starting position
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        let back = [
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
            PieceType::Rook,
        ];
        for file in 0..FILES {
            let pt = back[file as usize];
            board.put_piece(Piece::new(pt, Color::White), Square::from_file_rank(file, 0));
            board.put_piece(
                Piece::new(PieceType::Pawn, Color::White),
                Square::from_file_rank(file, Color::White.pawn_start_rank()),
            );
            board.put_piece(
                Piece::new(PieceType::Pawn, Color::Black),
                Square::from_file_rank(file, Color::Black.pawn_start_rank()),
            );
            board.put_piece(Piece::new(pt, Color::Black), Square::from_file_rank(file, RANKS - 1));
        }
        board.hash = board.calculate_hash();
        board
    }

    /// Parse a board from FEN-like notation: `<ranks 5..1> <w|b> [fullmove]`
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 2 || parts.len() > 3 {
            return Err(EngineError::invalid_position(format!(
                "expected '<placement> <side> [fullmove]', got '{}'",
                fen
            )));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != RANKS as usize {
            return Err(EngineError::invalid_position(format!(
                "expected {} ranks, found {}",
                RANKS,
                ranks.len()
            )));
        }

        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = RANKS - 1 - i as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(n) = c.to_digit(10) {
                    if n == 0 {
                        return Err(EngineError::invalid_position("empty run of length 0"));
                    }
                    file += n as u8;
                } else if let Some(piece) = Piece::from_char(c) {
                    if file >= FILES {
                        return Err(EngineError::invalid_position(format!(
                            "rank {} is longer than {} squares",
                            rank + 1,
                            FILES
                        )));
                    }
                    board.put_piece(piece, Square::from_file_rank(file, rank));
                    file += 1;
                } else {
                    return Err(EngineError::invalid_position(format!(
                        "unknown piece '{}'",
                        c
                    )));
                }
            }
            if file != FILES {
                return Err(EngineError::invalid_position(format!(
                    "rank {} describes {} squares instead of {}",
                    rank + 1,
                    file,
                    FILES
                )));
            }
        }

        board.turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(EngineError::invalid_position(format!(
                    "invalid side to move '{}'",
                    other
                )));
            }
        };

        if let Some(fullmove) = parts.get(2) {
            board.fullmove_number = fullmove.parse().map_err(|_| {
                EngineError::invalid_position(format!("invalid fullmove number '{}'", fullmove))
            })?;
        }

        board.validate()?;
        board.hash = board.calculate_hash();
        Ok(board)
    }

    /// Reject layouts no game can reach: wrong king counts and pawns on a back rank
    fn validate(&self) -> EngineResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self.pieces_of(PieceType::King, color).count();
            if kings != 1 {
                return Err(EngineError::invalid_position(format!(
                    "{:?} has {} kings",
                    color, kings
                )));
            }
        }
        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_5;
        if (self.pieces(PieceType::Pawn) & back_ranks).is_not_empty() {
            return Err(EngineError::invalid_position("pawn on a back rank"));
        }
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..RANKS).rev() {
            let mut empty = 0;
            for file in 0..FILES {
                let sq = Square::from_file_rank(file, rank);
                if let Some(piece) = self.squares[sq.index()] {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.to_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }

    pub fn put_piece(&mut self, piece: Piece, sq: Square) {
        let bb = sq.bitboard();
        self.pieces[piece.piece_type.index()] |= bb;
        self.colors[piece.color.index()] |= bb;
        self.squares[sq.index()] = Some(piece);
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()]?;
        let bb = sq.bitboard();
        self.pieces[piece.piece_type.index()] &= !bb;
        self.colors[piece.color.index()] &= !bb;
        self.squares[sq.index()] = None;
        Some(piece)
    }

    #[inline]
    pub fn pieces(&self, piece_type: PieceType) -> Bitboard {
        self.pieces[piece_type.index()]
    }

    #[inline]
    pub fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline]
    pub fn pieces_of(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.pieces[piece_type.index()] & self.colors[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// King square for a color; `None` once that king has been captured
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(PieceType::King, color);
        if kings.is_empty() {
            None
        } else {
            Some(Square(kings.lsb()))
        }
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist hash from scratch
    pub fn calculate_hash(&self) -> u64 {
        let keys = ZobristKeys::instance();
        let mut hash = 0u64;
        for sq in Square::all() {
            if let Some(piece) = self.squares[sq.index()] {
                hash ^= keys.piece(piece, sq);
            }
        }
        if self.turn == Color::Black {
            hash ^= keys.side_to_move();
        }
        hash
    }

    /// Pieces of `attacker_color` attacking `sq`
    pub fn attackers_to(&self, sq: Square, attacker_color: Color) -> Bitboard {
        let occupied = self.occupied();
        let attackers = self.color(attacker_color);

        let rook_attacks = MoveGen::rook_attacks(sq, occupied);
        let bishop_attacks = MoveGen::bishop_attacks(sq, occupied);
        let straight = self.pieces(PieceType::Rook) | self.pieces(PieceType::Queen);
        let diagonal = self.pieces(PieceType::Bishop) | self.pieces(PieceType::Queen);

        ((MoveGen::pawn_attacks(sq, attacker_color.opposite()) & self.pieces(PieceType::Pawn))
            | (MoveGen::knight_attacks(sq) & self.pieces(PieceType::Knight))
            | (MoveGen::king_attacks(sq) & self.pieces(PieceType::King))
            | (rook_attacks & straight)
            | (bishop_attacks & diagonal))
            & attackers
    }

    pub fn is_attacked(&self, sq: Square, by_color: Color) -> bool {
        self.attackers_to(sq, by_color).is_not_empty()
    }

    /// True when `color` still has a king and it is attacked
    pub fn king_attacked(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(sq) => self.is_attacked(sq, color.opposite()),
            None => false,
        }
    }

    /// Find the legal move matching UCI-style text (e.g. "a2a3", "b4b5q")
    pub fn parse_move(&self, s: &str) -> Option<Move> {
        let (from, to, promotion) = Move::parse_parts(s)?;
        self.find_move(from, to, promotion)
    }

    /// Legal move from `from` to `to`; without an explicit promotion piece the
    /// first generated promotion (queen) is chosen
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<PieceType>) -> Option<Move> {
        self.legal_moves().into_iter().find(|mv| {
            mv.from == from
                && mv.to == to
                && (promotion.is_none() || mv.promotion == promotion)
        })
    }
}

impl Position for Board {
    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::generate_legal_moves(self)
    }

    fn make_move(&mut self, mv: Move) {
        let keys = ZobristKeys::instance();
        let us = self.turn;

        self.hash ^= keys.piece(mv.piece, mv.from);
        self.remove_piece(mv.from);

        if let Some(captured) = self.remove_piece(mv.to) {
            self.hash ^= keys.piece(captured, mv.to);
        }

        let placed = match mv.promotion {
            Some(pt) => Piece::new(pt, us),
            None => mv.piece,
        };
        self.hash ^= keys.piece(placed, mv.to);
        self.put_piece(placed, mv.to);

        self.turn = us.opposite();
        self.hash ^= keys.side_to_move();

        if us == Color::Black {
            self.fullmove_number += 1;
        }
    }

    fn unmake_move(&mut self, mv: Move) {
        let keys = ZobristKeys::instance();
        let us = self.turn.opposite();

        self.turn = us;
        self.hash ^= keys.side_to_move();

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }

        if let Some(placed) = self.remove_piece(mv.to) {
            self.hash ^= keys.piece(placed, mv.to);
        }
        if let Some(captured) = mv.captured {
            self.hash ^= keys.piece(captured, mv.to);
            self.put_piece(captured, mv.to);
        }
        self.hash ^= keys.piece(mv.piece, mv.from);
        self.put_piece(mv.piece, mv.from);
    }

    #[inline]
    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.turn
    }

    #[inline]
    fn position_key(&self) -> u64 {
        self.hash
    }

    fn is_in_check(&self) -> bool {
        self.king_attacked(self.turn)
    }

    fn opponent_king_exposed(&self) -> bool {
        self.king_attacked(self.turn.opposite())
    }

    fn has_king(&self, color: Color) -> bool {
        self.pieces_of(PieceType::King, color).is_not_empty()
    }
}

impl PartialEq for Board {
    /// Layout and side to move; the move counter is not part of the position
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares && self.turn == other.turn
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..RANKS).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..FILES {
                let sq = Square::from_file_rank(file, rank);
                match self.squares[sq.index()] {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d")?;
        writeln!(f)?;
        writeln!(f, "  FEN: {}", self.to_fen())?;
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
