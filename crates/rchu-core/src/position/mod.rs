//! 局面表現モジュール
//!
//! - `Position`: 局面本体（盤配列・駒リスト・敵陣マップ・火鬼の焼きマップ・ハッシュ・差分評価）
//! - `UndoRecord`: 1 手分の巻き戻し情報
//! - 配置表記の解析・出力と、駒リストの詰め直し（`compact`）
//!
//! 盤配列・駒リスト・ハッシュ・差分評価・混み具合・焼きマップは `place` / `remove` を
//! 通じてのみ更新し、常に互いに整合しているように保つ。

mod apply;
mod pst;
mod setup;
mod zobrist;
mod zone;

pub use apply::UndoRecord;
pub use pst::PstTables;
pub use zobrist::{MAX_KINDS, ZOBRIST};
pub use zone::{PromoChoice, ZoneMap};

use crate::piece::{PieceDesc, Variant, class};
use crate::types::{BOARD_SIZE, Color, Direction, Square};

/// 盤配列の 1 要素（空・番兵・駒リストのインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Cell(u16);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const EDGE: Cell = Cell(u16::MAX);

    #[inline]
    const fn from_piece(id: PieceId) -> Cell {
        Cell(id.0 + 1)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_edge(self) -> bool {
        self.0 == u16::MAX
    }

    #[inline]
    pub const fn piece(self) -> Option<PieceId> {
        if self.0 == 0 || self.0 == u16::MAX {
            None
        } else {
            Some(PieceId(self.0 - 1))
        }
    }
}

/// 駒リストのインデックス（偶数: 先手、奇数: 後手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PieceId(u16);

impl PieceId {
    #[inline]
    pub const fn new(index: usize) -> PieceId {
        PieceId(index as u16)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn color(self) -> Color {
        Color::from_slot(self.0 as usize)
    }
}

/// 駒リストのエントリ
///
/// 成れる駒は成る前と成った後の 2 エントリを持ち、盤上にあるのは高々一方だけ。
/// 取られた駒は `pos` が `Square::NONE` になるだけで消えない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceEntry {
    /// 盤上の位置（盤外なら `Square::NONE`）
    pub pos: Square,
    /// 駒テーブル上のインデックス
    pub kind: u16,
    /// 成る前なら成った後、成った後なら成る前のエントリ
    pub counterpart: Option<PieceId>,
    pub promoted: bool,
    pub value: i32,
    /// 成ったときの価値の増分（成る前のエントリだけが持つ）
    pub promo_gain: i32,
    pub keys: [u32; 2],
    /// 火鬼の焼きマップ上のビット（火鬼以外は 0）
    pub burn_bit: u8,
    /// 感染成り用の予備エントリ
    pub spare: bool,
}

impl PieceEntry {
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.pos.is_none()
    }

    /// 詰め直しで取り除いてよいエントリ用の空き枠
    const fn filler() -> PieceEntry {
        PieceEntry {
            pos: Square::NONE,
            kind: 0,
            counterpart: None,
            promoted: false,
            value: 0,
            promo_gain: 0,
            keys: [0, 0],
            burn_bit: 0,
            spare: false,
        }
    }
}

/// 局面
#[derive(Clone)]
pub struct Position {
    variant: &'static Variant,
    board: Vec<Cell>,
    pieces: Vec<PieceEntry>,
    zone: ZoneMap,
    pst: PstTables,
    /// [手番][マス] そのマスを焼きの範囲に収めている火鬼のビット集合
    burn: [Vec<u8>; Color::NUM],
    hash: [u32; 2],
    side_to_move: Color,
    /// 先手視点の駒価値＋位置点
    eval_delta: i32,
    /// 先手視点の未実現の成り価値
    promo_delta: i32,
    fullness: i32,
    initial_fullness: i32,
    /// 最後の不可逆手からの手数
    rev_count: u32,
    /// 直前に敵陣へ不成で入ったマス
    deferred: [Square; Color::NUM],
    /// 直前の手が獅子以外による獅子取りだったか
    counterstrike: bool,
}

impl Position {
    fn empty(variant: &'static Variant) -> Position {
        let mut board = vec![Cell::EDGE; BOARD_SIZE];
        for rank in 0..variant.ranks {
            for file in 0..variant.files {
                board[Square::new(file, rank).index()] = Cell::EMPTY;
            }
        }
        Position {
            variant,
            board,
            pieces: Vec::new(),
            zone: ZoneMap::new(variant.files, variant.ranks, variant.zone_depth),
            pst: PstTables::new(variant.files, variant.ranks),
            burn: [vec![0; BOARD_SIZE], vec![0; BOARD_SIZE]],
            hash: [0, 0],
            side_to_move: Color::Black,
            eval_delta: 0,
            promo_delta: 0,
            fullness: 0,
            initial_fullness: 0,
            rev_count: 0,
            deferred: [Square::NONE; Color::NUM],
            counterstrike: false,
        }
    }

    #[inline]
    pub fn variant(&self) -> &'static Variant {
        self.variant
    }

    #[inline]
    pub fn files(&self) -> u8 {
        self.variant.files
    }

    #[inline]
    pub fn ranks(&self) -> u8 {
        self.variant.ranks
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.board[sq.index()].is_empty()
    }

    #[inline]
    pub fn is_edge(&self, sq: Square) -> bool {
        self.board[sq.index()].is_edge()
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<PieceId> {
        self.board[sq.index()].piece()
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &PieceEntry {
        &self.pieces[id.index()]
    }

    /// 駒の定義
    #[inline]
    pub fn desc(&self, id: PieceId) -> &'static PieceDesc {
        self.variant.desc(self.pieces[id.index()].kind as usize)
    }

    #[inline]
    pub fn pieces(&self) -> &[PieceEntry] {
        &self.pieces
    }

    /// 盤上にある `color` の駒
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        (color.index()..self.pieces.len())
            .step_by(2)
            .map(PieceId::new)
            .filter(|&id| !self.pieces[id.index()].is_absent())
    }

    /// 盤上のすべてのマス
    pub fn squares(&self) -> impl Iterator<Item = Square> + use<> {
        let files = self.variant.files;
        (0..self.variant.ranks).flat_map(move |r| (0..files).map(move |f| Square::new(f, r)))
    }

    /// `color` の王のマス
    pub fn royals(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces_of(color)
            .filter(|&id| self.desc(id).has(class::ROYAL))
            .map(|id| self.pieces[id.index()].pos)
    }

    pub fn royal_count(&self, color: Color) -> usize {
        self.royals(color).count()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 2 系統のハッシュを連結した値
    #[inline]
    pub fn hash(&self) -> u64 {
        (self.hash[0] as u64) << 32 | self.hash[1] as u64
    }

    #[inline]
    pub fn eval_delta(&self) -> i32 {
        self.eval_delta
    }

    #[inline]
    pub fn promo_delta(&self) -> i32 {
        self.promo_delta
    }

    #[inline]
    pub fn fullness(&self) -> i32 {
        self.fullness
    }

    #[inline]
    pub fn initial_fullness(&self) -> i32 {
        self.initial_fullness
    }

    #[inline]
    pub fn rev_count(&self) -> u32 {
        self.rev_count
    }

    #[inline]
    pub fn deferred(&self, color: Color) -> Option<Square> {
        let sq = self.deferred[color.index()];
        if sq.is_none() { None } else { Some(sq) }
    }

    #[inline]
    pub fn counterstrike(&self) -> bool {
        self.counterstrike
    }

    #[inline]
    pub fn zone(&self) -> &ZoneMap {
        &self.zone
    }

    #[inline]
    pub fn pst(&self) -> &PstTables {
        &self.pst
    }

    /// `color` の火鬼が焼きの範囲に収めているか
    #[inline]
    pub fn burn_mask(&self, color: Color, sq: Square) -> u8 {
        self.burn[color.index()][sq.index()]
    }

    /// 駒を盤に置き、付随する集計値をすべて更新する
    fn place(&mut self, id: PieceId, sq: Square) {
        debug_assert!(self.board[sq.index()].is_empty(), "place on occupied {sq:?}");
        let color = id.color();
        let desc = self.desc(id);
        let entry = &mut self.pieces[id.index()];
        entry.pos = sq;
        let (value, gain, keys, bit) = (entry.value, entry.promo_gain, entry.keys, entry.burn_bit);
        self.board[sq.index()] = Cell::from_piece(id);
        self.toggle_hash(keys, sq);
        self.eval_delta += color.sign() * (value + self.pst.get(desc.pst, color, sq));
        self.promo_delta += color.sign() * gain;
        self.fullness += desc.bulk;
        if bit != 0 {
            self.mark_burn(color, sq, bit, true);
        }
    }

    /// 駒を盤から取り除く（`place` の逆）
    fn remove(&mut self, id: PieceId) -> Square {
        let color = id.color();
        let desc = self.desc(id);
        let entry = &mut self.pieces[id.index()];
        let sq = entry.pos;
        debug_assert!(!sq.is_none(), "remove of absent piece {id:?}");
        entry.pos = Square::NONE;
        let (value, gain, keys, bit) = (entry.value, entry.promo_gain, entry.keys, entry.burn_bit);
        self.board[sq.index()] = Cell::EMPTY;
        self.toggle_hash(keys, sq);
        self.eval_delta -= color.sign() * (value + self.pst.get(desc.pst, color, sq));
        self.promo_delta -= color.sign() * gain;
        self.fullness -= desc.bulk;
        if bit != 0 {
            self.mark_burn(color, sq, bit, false);
        }
        sq
    }

    #[inline]
    fn toggle_hash(&mut self, keys: [u32; 2], sq: Square) {
        let c = ZOBRIST.contribution(keys, sq);
        self.hash[0] ^= c[0];
        self.hash[1] ^= c[1];
    }

    fn mark_burn(&mut self, color: Color, center: Square, bit: u8, on: bool) {
        let map = &mut self.burn[color.index()];
        for dir in Direction::ALL {
            let sq = center + dir.offset();
            if on {
                map[sq.index()] |= bit;
            } else {
                map[sq.index()] &= !bit;
            }
        }
    }

    /// 盤面から集計値をすべて計算し直し、保持している値と比べる
    pub fn verify(&self) -> Result<(), String> {
        let mut hash = [0u32; 2];
        let (mut eval, mut promo, mut full) = (0, 0, 0);
        let mut burn = [vec![0u8; BOARD_SIZE], vec![0u8; BOARD_SIZE]];
        for (i, entry) in self.pieces.iter().enumerate() {
            if entry.is_absent() {
                continue;
            }
            let id = PieceId::new(i);
            let color = id.color();
            let desc = self.desc(id);
            if self.board[entry.pos.index()] != Cell::from_piece(id) {
                return Err(format!("board/piece-list mismatch at {:?}", entry.pos));
            }
            if let Some(other) = entry.counterpart
                && !self.pieces[other.index()].is_absent()
            {
                return Err(format!("both forms of {id:?} on board"));
            }
            let c = ZOBRIST.contribution(entry.keys, entry.pos);
            hash[0] ^= c[0];
            hash[1] ^= c[1];
            eval += color.sign() * (entry.value + self.pst.get(desc.pst, color, entry.pos));
            promo += color.sign() * entry.promo_gain;
            full += desc.bulk;
            if entry.burn_bit != 0 {
                for dir in Direction::ALL {
                    burn[color.index()][(entry.pos + dir.offset()).index()] |= entry.burn_bit;
                }
            }
        }
        for sq in self.squares() {
            if let Some(id) = self.piece_at(sq)
                && self.pieces[id.index()].pos != sq
            {
                return Err(format!("stale board cell at {sq:?}"));
            }
        }
        if hash != self.hash {
            return Err("hash drift".to_string());
        }
        if eval != self.eval_delta || promo != self.promo_delta || full != self.fullness {
            return Err(format!(
                "accumulator drift: eval {eval}/{} promo {promo}/{} fullness {full}/{}",
                self.eval_delta, self.promo_delta, self.fullness
            ));
        }
        if burn != self.burn {
            return Err("burn map drift".to_string());
        }
        Ok(())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        std::ptr::eq(self.variant, other.variant)
            && self.board == other.board
            && self.pieces == other.pieces
            && self.burn == other.burn
            && self.hash == other.hash
            && self.side_to_move == other.side_to_move
            && self.eval_delta == other.eval_delta
            && self.promo_delta == other.promo_delta
            && self.fullness == other.fullness
            && self.initial_fullness == other.initial_fullness
            && self.rev_count == other.rev_count
            && self.deferred == other.deferred
            && self.counterstrike == other.counterstrike
    }
}

impl Eq for Position {}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Position")
            .field("variant", &self.variant.name)
            .field("board", &self.to_notation())
            .field("hash", &format_args!("{:016x}", self.hash()))
            .field("eval_delta", &self.eval_delta)
            .field("rev_count", &self.rev_count)
            .finish()
    }
}

impl std::fmt::Display for Position {
    /// 盤面の図（先手が下）
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..self.ranks()).rev() {
            write!(f, "{:>2} ", rank + 1)?;
            for file in 0..self.files() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(id) => {
                        let code = self.desc(id).code;
                        let text = match id.color() {
                            Color::Black => code.to_string(),
                            Color::White => code.to_ascii_lowercase(),
                        };
                        write!(f, "{text:>4}")?;
                    }
                    None => write!(f, "   .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for file in 0..self.files() {
            write!(f, "{:>4}", (b'a' + file) as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_encoding() {
        assert!(Cell::EMPTY.is_empty());
        assert!(Cell::EDGE.is_edge());
        assert_eq!(Cell::EDGE.piece(), None);
        let id = PieceId::new(7);
        assert_eq!(Cell::from_piece(id).piece(), Some(id));
        assert_eq!(id.color(), Color::White);
    }

    #[test]
    fn test_empty_board_has_guard_border() {
        let pos = Position::empty(&crate::piece::CHU);
        assert!(pos.is_empty(Square::new(0, 0)));
        assert!(pos.is_edge(Square::new(12, 0)));
        assert!(pos.is_edge(Square::new(0, 0) + Direction::W.offset()));
        assert!(pos.is_edge(Square::new(4, 11) + Direction::N.offset()));
        assert_eq!(pos.squares().count(), 144);
    }
}
