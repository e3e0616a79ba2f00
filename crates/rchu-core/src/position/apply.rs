//! 指し手の適用と巻き戻し
//!
//! `make_move` は次の順で局面を更新する。
//!
//! 1. 移動元から駒を取り除く
//! 2. 成りフラグから移動後の駒（エントリ）を決める
//! 3. 多段手の途中の駒を取る
//! 4. 移動先の駒を取る
//! 5. 感染成り
//! 6. 移動先に置く。火鬼なら、敵の火鬼の隣に降りたときは自滅し、そうでなければ周囲の敵駒を焼く
//! 7. 不可逆手カウンタ・不成マーカー・獅子の取り返し制限を更新する
//!
//! `unmake_move` はこれを厳密に逆順で戻す。生成器が出した手以外を渡すのは呼び出し側の誤り。

use smallvec::SmallVec;

use crate::piece::class;
use crate::types::{Color, Direction, Move, RAYS, Square};

use super::{PieceId, Position};

/// 1 手分の巻き戻し情報
#[derive(Debug, Clone)]
pub struct UndoRecord {
    mv: Move,
    mover: Option<PieceId>,
    /// 移動先に置いたエントリ（成り・感染成りで `mover` と異なる）
    result: Option<PieceId>,
    /// 火鬼が自滅して盤に残らなかった
    suicide: bool,
    /// 移動先で取った駒
    captured: Option<PieceId>,
    /// 取り除いた駒と元のマス（取り除いた順）
    victims: SmallVec<[(PieceId, Square); RAYS + 3]>,
    hash: [u32; 2],
    eval_delta: i32,
    promo_delta: i32,
    fullness: i32,
    rev_count: u32,
    deferred: [Square; Color::NUM],
    counterstrike: bool,
}

impl UndoRecord {
    #[inline]
    pub fn captured(&self) -> Option<PieceId> {
        self.captured
    }

    /// 取られた・焼かれた駒（自滅した火鬼を含む）
    pub fn victims(&self) -> impl Iterator<Item = (PieceId, Square)> + '_ {
        self.victims.iter().copied()
    }
}

impl Position {
    /// 指し手を適用する
    pub fn make_move(&mut self, mv: Move) -> UndoRecord {
        let us = self.side_to_move;
        let them = !us;
        let mut undo = UndoRecord {
            mv,
            mover: None,
            result: None,
            suicide: false,
            captured: None,
            victims: SmallVec::new(),
            hash: self.hash,
            eval_delta: self.eval_delta,
            promo_delta: self.promo_delta,
            fullness: self.fullness,
            rev_count: self.rev_count,
            deferred: self.deferred,
            counterstrike: self.counterstrike,
        };

        if mv.is_null() {
            self.rev_count += 1;
            self.deferred[us.index()] = Square::NONE;
            self.counterstrike = false;
            self.side_to_move = them;
            return undo;
        }

        let Some(mover) = self.piece_at(mv.from()) else {
            debug_assert!(false, "no piece on {:?}", mv.from());
            self.side_to_move = them;
            return undo;
        };
        debug_assert_eq!(mover.color(), us);
        let mover_desc = self.desc(mover);
        undo.mover = Some(mover);
        self.remove(mover);

        let mut result = match (mv.is_promotion(), self.pieces[mover.index()].counterpart) {
            (true, Some(promoted)) => promoted,
            _ => mover,
        };

        for leg in mv.legs() {
            if let Some(victim) = self.piece_at(leg) {
                debug_assert_eq!(victim.color(), them);
                self.remove(victim);
                undo.victims.push((victim, leg));
            }
        }
        if let Some(victim) = self.piece_at(mv.to()) {
            self.remove(victim);
            undo.victims.push((victim, mv.to()));
            undo.captured = Some(victim);
        }

        let mut lion_taken = false;
        let mut contagion = None;
        for &(victim, _) in undo.victims.iter() {
            let desc = self.desc(victim);
            lion_taken |= desc.has(class::LION);
            if desc.has(class::CONTAGIOUS)
                && !self.desc(result).has(class::ROYAL)
                && desc.rank > self.desc(result).rank
                && contagion.is_none_or(|k: usize| desc.rank > self.variant.desc(k).rank)
            {
                contagion = Some(self.pieces[victim.index()].kind as usize);
            }
        }
        if let Some(kind) = contagion {
            match self.free_spare(us, kind) {
                Some(spare) => result = spare,
                None => debug_assert!(false, "no spare entry for contagion"),
            }
        }

        self.place(result, mv.to());
        undo.result = Some(result);

        if self.desc(result).has(class::FIRE_DEMON) {
            if self.burn[them.index()][mv.to().index()] != 0 {
                self.remove(result);
                undo.suicide = true;
                undo.victims.push((result, mv.to()));
            } else {
                for dir in Direction::ALL {
                    let sq = mv.to() + dir.offset();
                    if let Some(victim) = self.piece_at(sq)
                        && victim.color() == them
                    {
                        self.remove(victim);
                        undo.victims.push((victim, sq));
                    }
                }
            }
        }

        let irreversible = !undo.victims.is_empty()
            || result != mover
            || mover_desc.has(class::IRREVERSIBLE);
        self.rev_count = if irreversible { 0 } else { self.rev_count + 1 };
        self.deferred[us.index()] = if mv.is_deferral() { mv.to() } else { Square::NONE };
        self.counterstrike =
            self.variant.lion_trading && lion_taken && !mover_desc.has(class::LION);
        self.side_to_move = them;

        #[cfg(feature = "debug-validate")]
        debug_assert_eq!(self.verify(), Ok(()));
        undo
    }

    /// `make_move` を取り消す
    pub fn unmake_move(&mut self, undo: &UndoRecord) {
        self.side_to_move = !self.side_to_move;
        if let Some(mover) = undo.mover {
            if let (Some(result), false) = (undo.result, undo.suicide) {
                self.remove(result);
            }
            for &(victim, sq) in undo.victims.iter().rev() {
                if undo.suicide && Some(victim) == undo.result {
                    // 自滅した火鬼は盤に戻さない
                    continue;
                }
                self.place(victim, sq);
            }
            self.place(mover, undo.mv.from());
        }

        debug_assert_eq!(self.hash, undo.hash, "hash drift on unmake");
        debug_assert_eq!(self.eval_delta, undo.eval_delta);
        self.hash = undo.hash;
        self.eval_delta = undo.eval_delta;
        self.promo_delta = undo.promo_delta;
        self.fullness = undo.fullness;
        self.rev_count = undo.rev_count;
        self.deferred = undo.deferred;
        self.counterstrike = undo.counterstrike;
    }

    /// 感染成りに使える予備エントリ
    fn free_spare(&self, color: Color, kind: usize) -> Option<PieceId> {
        (color.index()..self.pieces.len())
            .step_by(2)
            .map(PieceId::new)
            .find(|&id| {
                let e = &self.pieces[id.index()];
                e.spare && e.is_absent() && e.kind as usize == kind
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::CHU;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank)
    }

    #[test]
    fn test_pawn_push_round_trip() {
        let mut pos = Position::start(&CHU).unwrap();
        let before = pos.clone();
        let undo = pos.make_move(Move::normal(sq(4, 3), sq(4, 4)));
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.rev_count(), 0);
        assert!(pos.verify().is_ok());
        pos.unmake_move(&undo);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_igui_keeps_mover_in_place() {
        let mut pos =
            Position::setup(&CHU, "k11/12/12/12/12/12/12/5p6/5N6/12/12/K11 b").unwrap();
        let before = pos.clone();
        let lion = sq(5, 3);
        let mv = Move::with_leg(lion, sq(5, 4), lion);
        let undo = pos.make_move(mv);
        assert!(pos.is_empty(sq(5, 4)));
        assert!(pos.piece_at(lion).is_some());
        assert_eq!(undo.victims().count(), 1);
        assert!(undo.captured().is_none());
        assert!(pos.verify().is_ok());
        pos.unmake_move(&undo);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_promotion_swaps_entry() {
        let mut pos =
            Position::setup(&CHU, "k11/12/12/12/12/12/12/12/5P6/12/12/K11 b").unwrap();
        let before = pos.clone();
        let mut mv = Move::normal(sq(5, 3), sq(5, 4));
        // 敵陣外なので成りではないが、エントリの入れ替え自体は確認できる
        mv = mv.promoting();
        let undo = pos.make_move(mv);
        let id = pos.piece_at(sq(5, 4)).unwrap();
        assert!(pos.piece(id).promoted);
        assert!(pos.promo_delta() < before.promo_delta());
        pos.unmake_move(&undo);
        assert_eq!(pos, before);
    }
}
