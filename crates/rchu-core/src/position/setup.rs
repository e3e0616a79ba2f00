//! 配置表記の解析・出力と駒リストの構築
//!
//! 配置表記は最奥段（先手から見て上）から順に `/` で段を区切る。
//! 数字は空きマスの数、英字は駒（大文字が先手）。`+` 前置は成駒、`'` や `!` の後置は
//! 拡張文字の区別。末尾に ` b` / ` w` で手番を付けられる（省略時は先手番）。

use log::info;

use crate::error::SetupError;
use crate::piece::{Variant, class};
use crate::types::{Color, Square};

use super::{MAX_KINDS, PieceEntry, PieceId, Position, ZOBRIST};

/// 解析した 1 マス分の駒
struct Placed {
    kind: usize,
    color: Color,
    sq: Square,
}

/// 1 段分の記述を駒のリストに分解する
fn parse_rank(
    variant: &Variant,
    text: &str,
    rank: u8,
    rank_no: usize,
    out: &mut Vec<Placed>,
) -> Result<(), SetupError> {
    let malformed = |reason: String| SetupError::MalformedRank {
        rank: rank_no,
        reason,
    };
    let chars: Vec<char> = text.chars().collect();
    let mut file = 0usize;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let run: String = chars[start..i].iter().collect();
            let n = run
                .parse::<usize>()
                .ok()
                .filter(|&n| n <= variant.files as usize - file)
                .ok_or_else(|| malformed(format!("empty run {run} overflows the rank")))?;
            file += n;
            continue;
        }
        let mut code = String::new();
        if c == '+' {
            code.push('+');
            i += 1;
        }
        let letter = *chars
            .get(i)
            .filter(|ch| ch.is_ascii_alphabetic())
            .ok_or_else(|| malformed(format!("unexpected '{c}'")))?;
        code.push(letter.to_ascii_uppercase());
        i += 1;
        while i < chars.len() && matches!(chars[i], '\'' | '!') {
            code.push(chars[i]);
            i += 1;
        }
        let kind = variant
            .find(&code)
            .ok_or_else(|| SetupError::UnknownPiece(code.clone()))?;
        if file >= variant.files as usize {
            return Err(malformed(format!("more than {} files", variant.files)));
        }
        let color = if letter.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };
        out.push(Placed {
            kind,
            color,
            sq: Square::new(file as u8, rank),
        });
        file += 1;
    }
    if file != variant.files as usize {
        return Err(malformed(format!("{file} files, expected {}", variant.files)));
    }
    Ok(())
}

/// 手番ごとに組み立て中の駒リスト
#[derive(Default)]
struct SideList {
    entries: Vec<PieceEntry>,
    /// 盤に置くエントリのローカル番号とマス
    placements: Vec<(usize, Square)>,
    burn_bits: u8,
}

impl SideList {
    fn push(&mut self, variant: &Variant, kind: usize, color: Color) -> Result<usize, SetupError> {
        let desc = variant.desc(kind);
        let burn_bit = if desc.has(class::FIRE_DEMON) {
            if self.burn_bits == u8::MAX {
                return Err(SetupError::Overflow("fire demons"));
            }
            let bit = (!self.burn_bits) & self.burn_bits.wrapping_add(1);
            self.burn_bits |= bit;
            bit
        } else {
            0
        };
        self.entries.push(PieceEntry {
            pos: Square::NONE,
            kind: kind as u16,
            counterpart: None,
            promoted: false,
            value: desc.value,
            promo_gain: 0,
            keys: ZOBRIST.piece_keys(kind, color),
            burn_bit,
            spare: false,
        });
        Ok(self.entries.len() - 1)
    }

    /// 盤上の 1 枚分（成れる駒は成る前・成った後の 2 エントリ）を登録する
    fn add_unit(&mut self, variant: &Variant, kind: usize, color: Color, sq: Square) -> Result<(), SetupError> {
        let desc = variant.desc(kind);
        // 成駒として置かれた場合は元の駒を探す
        let base = variant
            .pieces
            .iter()
            .position(|p| p.promo == Some(desc.code));
        let (base, promoted) = match (base, desc.promo.and_then(|code| variant.find(code))) {
            (Some(b), _) => (b, Some(kind)),
            (None, Some(p)) => (kind, Some(p)),
            (None, None) => (kind, None),
        };
        let b = self.push(variant, base, color)?;
        let on_board = match promoted {
            Some(p) => {
                let q = self.push(variant, p, color)?;
                self.entries[b].counterpart = Some(PieceId::new(q));
                self.entries[q].counterpart = Some(PieceId::new(b));
                self.entries[q].promoted = true;
                self.entries[b].promo_gain = self.entries[q].value - self.entries[b].value;
                if base == kind { b } else { q }
            }
            None => b,
        };
        self.placements.push((on_board, sq));
        Ok(())
    }
}

/// ローカル番号から駒リスト全体での番号へ
#[inline]
fn global(color: Color, local: usize) -> PieceId {
    PieceId::new(local * 2 + color.index())
}

/// 手番ごとのリストを交互に並べる（短い方は空き枠で埋める）
fn interleave(lists: [Vec<PieceEntry>; 2]) -> Vec<PieceEntry> {
    let len = lists[0].len().max(lists[1].len());
    let mut out = Vec::with_capacity(len * 2);
    for i in 0..len {
        for (c, list) in lists.iter().enumerate() {
            let mut entry = list.get(i).copied().unwrap_or(PieceEntry::filler());
            entry.counterpart = entry
                .counterpart
                .map(|local| global(Color::ALL[c], local.index()));
            out.push(entry);
        }
    }
    out
}

impl Position {
    /// 配置表記から局面を作る
    pub fn setup(variant: &'static Variant, notation: &str) -> Result<Position, SetupError> {
        if variant.pieces.len() > MAX_KINDS {
            return Err(SetupError::Overflow("piece kinds"));
        }
        let mut fields = notation.split_whitespace();
        let placement = fields.next().unwrap_or("");
        let side = match fields.next() {
            None | Some("b") => Color::Black,
            Some("w") => Color::White,
            Some(other) => return Err(SetupError::SideToMove(other.to_string())),
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != variant.ranks as usize {
            return Err(SetupError::RankCount {
                expected: variant.ranks as usize,
                actual: ranks.len(),
            });
        }
        let mut placed = Vec::new();
        for (i, text) in ranks.iter().enumerate() {
            let rank = variant.ranks - 1 - i as u8;
            parse_rank(variant, text, rank, i + 1, &mut placed)?;
        }

        let mut sides = [SideList::default(), SideList::default()];
        for p in &placed {
            sides[p.color.index()].add_unit(variant, p.kind, p.color, p.sq)?;
        }

        // 感染成り用の予備。感染で駒の総数は増えないので、盤上の枚数分あれば足りる
        for (kind, desc) in variant.pieces.iter().enumerate() {
            if !desc.has(class::CONTAGIOUS) {
                continue;
            }
            let total = placed.iter().filter(|p| p.kind == kind).count();
            for color in Color::ALL {
                for _ in 0..total {
                    let local = sides[color.index()].push(variant, kind, color)?;
                    sides[color.index()].entries[local].spare = true;
                }
            }
        }

        let [black, white] = sides;
        let placements: Vec<(PieceId, Square)> = black
            .placements
            .iter()
            .map(|&(l, sq)| (global(Color::Black, l), sq))
            .chain(
                white
                    .placements
                    .iter()
                    .map(|&(l, sq)| (global(Color::White, l), sq)),
            )
            .collect();
        let pieces = interleave([black.entries, white.entries]);
        if pieces.len() >= u16::MAX as usize - 1 {
            return Err(SetupError::Overflow("piece list"));
        }

        let mut pos = Position::empty(variant);
        pos.pieces = pieces;
        for (id, sq) in placements {
            pos.place(id, sq);
        }
        pos.side_to_move = side;
        pos.initial_fullness = pos.fullness;

        for color in Color::ALL {
            if pos.royal_count(color) == 0 {
                return Err(SetupError::MissingRoyal(color));
            }
        }
        info!(
            "setup {}: {} pieces on board, fullness {}",
            variant.name,
            placed.len(),
            pos.fullness
        );
        Ok(pos)
    }

    /// 変則の初期配置
    pub fn start(variant: &'static Variant) -> Result<Position, SetupError> {
        Position::setup(variant, variant.start)
    }

    /// 配置表記（`setup` と往復する）
    pub fn to_notation(&self) -> String {
        let mut out = String::new();
        for rank in (0..self.ranks()).rev() {
            let mut empty = 0;
            for file in 0..self.files() {
                match self.piece_at(Square::new(file, rank)) {
                    None => empty += 1,
                    Some(id) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        let code = self.desc(id).code;
                        match id.color() {
                            Color::Black => out.push_str(code),
                            Color::White => out.push_str(&code.to_ascii_lowercase()),
                        }
                    }
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push_str(match self.side_to_move {
            Color::Black => " b",
            Color::White => " w",
        });
        out
    }

    /// 取られて二度と盤に戻らないエントリを駒リストから取り除く
    ///
    /// 探索と探索の間に呼ぶ。ハッシュ・評価値・盤上の駒は変わらない。
    pub fn compact(&mut self) {
        let dead = |e: &PieceEntry| {
            e.is_absent()
                && !e.spare
                && e.counterpart
                    .is_none_or(|c| self.pieces[c.index()].is_absent())
        };
        let mut lists: [Vec<PieceEntry>; 2] = [Vec::new(), Vec::new()];
        let mut remap = vec![None; self.pieces.len()];
        for (i, entry) in self.pieces.iter().enumerate() {
            if dead(entry) {
                continue;
            }
            let c = Color::from_slot(i).index();
            remap[i] = Some(lists[c].len());
            lists[c].push(*entry);
        }
        let before = self.pieces.len();
        // 生き残ったエントリの相方はすべて生き残っている
        for list in lists.iter_mut() {
            for entry in list.iter_mut() {
                entry.counterpart = entry
                    .counterpart
                    .and_then(|c| remap[c.index()].map(PieceId::new));
            }
        }
        self.pieces = interleave(lists);
        for sq in self.squares().collect::<Vec<_>>() {
            self.board[sq.index()] = super::Cell::EMPTY;
        }
        for i in 0..self.pieces.len() {
            let pos = self.pieces[i].pos;
            if !pos.is_none() {
                self.board[pos.index()] = super::Cell::from_piece(PieceId::new(i));
            }
        }
        log::debug!("compact: {before} -> {} entries", self.pieces.len());
    }
}
