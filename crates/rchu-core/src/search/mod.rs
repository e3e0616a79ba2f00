//! 探索
//!
//! 固定窓の alpha-beta を反復深化で回す。王手の概念はなく、相手の最後の王将を取れる局面を
//! 即座に勝ち（`mate_in`）として返す。
//!
//! - 指し手は全手数で共有する 1 本のスタックに積み、各ノードは自分の区間だけを使う
//! - 利きマップは手数ごとに 1 枚（`attacks[ply]`）。子ノードの分は親が手を指した直後に作る
//! - 静的評価との比較で alpha/beta を 1 だけ手番側に寄せ、同じ評価なら早く得をする手を選ぶ
//! - 深さが尽きたら取る手だけを読む（静止探索）
//! - 同じ読み筋（と対局の履歴）に既に現れた局面に戻る手は選ばない

mod limits;

pub use limits::{SearchInfo, SearchLimits, SearchResult};

use std::time::Instant;

use crate::attack::AttackMap;
use crate::eval::Evaluator;
use crate::movegen::{
    generate_captures, generate_null, generate_quiets, is_counterstrike, is_distant_lion_capture,
};
use crate::position::Position;
use crate::types::{MAX_PLY, Move, Value};

/// 反復ごとの進捗を受け取るコールバック
pub type InfoCallback = Box<dyn FnMut(&SearchInfo<'_>) + Send>;

/// 探索器
///
/// 探索中に使う作業領域をすべて持つ。局面は呼び出しごとに借りる。
pub struct Searcher {
    evaluator: Evaluator,
    /// [手数] その手数の局面の利きマップ
    attacks: Vec<AttackMap>,
    /// 全手数で共有する指し手スタック
    moves: Vec<Move>,
    /// 対局の履歴と現在の読み筋の局面ハッシュ（根から順）
    keys: Vec<u64>,
    /// [手数] 三角形の PV バッファ
    pv: Vec<[Move; MAX_PLY + 1]>,
    pv_len: [usize; MAX_PLY + 1],
    nodes: u64,
    info: Option<InfoCallback>,
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher").field("nodes", &self.nodes).finish()
    }
}

impl Searcher {
    /// `pos` と同じ盤の形・初期の駒の量を前提にした探索器
    pub fn new(pos: &Position) -> Self {
        Searcher {
            evaluator: Evaluator::new(pos),
            attacks: (0..MAX_PLY + 2).map(|_| AttackMap::new()).collect(),
            moves: Vec::with_capacity(64 * MAX_PLY),
            keys: Vec::with_capacity(1024),
            pv: vec![[Move::NULL; MAX_PLY + 1]; MAX_PLY + 1],
            pv_len: [0; MAX_PLY + 1],
            nodes: 0,
            info: None,
        }
    }

    /// 反復ごとの進捗コールバックを設定する
    pub fn set_info_callback(&mut self, callback: InfoCallback) {
        self.info = Some(callback);
    }

    /// 設定済みのコールバックを取り外す
    pub fn take_info_callback(&mut self) -> Option<InfoCallback> {
        self.info.take()
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// 反復深化で最善手を探す
    pub fn search(&mut self, pos: &mut Position, limits: &SearchLimits) -> SearchResult {
        self.search_with_history(pos, limits, &[])
    }

    /// 対局の履歴（根より前の局面のハッシュ、古い順）を与えて探索する
    ///
    /// 履歴中の局面に戻る手も繰り返しとして選ばない。
    pub fn search_with_history(
        &mut self,
        pos: &mut Position,
        limits: &SearchLimits,
        history: &[u64],
    ) -> SearchResult {
        let start = Instant::now();
        self.nodes = 0;
        self.moves.clear();
        self.keys.clear();
        self.keys.extend_from_slice(history);
        self.keys.push(pos.hash());
        self.attacks[0].compute(pos);

        let mut result = SearchResult {
            best_move: None,
            score: self.evaluator.evaluate(pos, &self.attacks[0]),
            depth: 0,
            pv: Vec::new(),
            nodes: 0,
            elapsed: start.elapsed(),
        };

        for depth in 1..=limits.max_depth() {
            let score = self.search_node(pos, 0, depth as i32, -Value::INFINITE, Value::INFINITE);
            let pv = self.pv[0][..self.pv_len[0]].to_vec();
            result = SearchResult {
                best_move: pv.first().copied(),
                score,
                depth,
                pv,
                nodes: self.nodes,
                elapsed: start.elapsed(),
            };
            log::debug!(
                "depth {} score {} nodes {} time {:?} pv {:?}",
                depth,
                score,
                self.nodes,
                result.elapsed,
                result.pv
            );
            if let Some(callback) = self.info.as_mut() {
                callback(&SearchInfo {
                    depth,
                    score,
                    nodes: self.nodes,
                    elapsed: result.elapsed,
                    pv: &result.pv,
                });
            }

            if score.is_mate_score() {
                break;
            }
            if limits.time.is_some_and(|budget| start.elapsed() >= budget) {
                break;
            }
        }
        debug_assert_eq!(self.keys.len(), history.len() + 1);
        result
    }

    // =========================================================================
    // ノード
    // =========================================================================

    fn search_node(
        &mut self,
        pos: &mut Position,
        ply: usize,
        depth: i32,
        mut alpha: Value,
        mut beta: Value,
    ) -> Value {
        self.nodes += 1;
        self.pv_len[ply] = ply;
        let us = pos.side_to_move();
        let them = !us;

        // 王将を失っている、または相手の最後の王将を取れる
        if pos.royal_count(us) == 0 {
            return Value::mated_in(ply as i32);
        }
        if ply > 0 && self.can_capture_last_royal(pos, ply) {
            return Value::mate_in(ply as i32);
        }

        let cur_eval = self.evaluator.evaluate(pos, &self.attacks[ply]);
        if ply >= MAX_PLY {
            return cur_eval;
        }
        if alpha < cur_eval {
            alpha = alpha.nudge(false);
        }
        if beta <= cur_eval {
            beta = beta.nudge(false);
        }

        // 静止探索ではその場の評価を下限にする
        let quiescent = depth <= 0;
        let mut best = if quiescent { cur_eval } else { -Value::INFINITE };
        if quiescent {
            if best >= beta {
                return best;
            }
            if best > alpha {
                alpha = best;
            }
        }

        let frame = self.moves.len();
        generate_captures(pos, &self.attacks[ply], &mut self.moves);
        if !quiescent {
            generate_quiets(pos, &mut self.moves);
            generate_null(pos, &mut self.moves);
        }
        let end = self.moves.len();

        let mut repeated = false;
        for i in frame..end {
            let mv = self.moves[i];
            if is_counterstrike(pos, mv) {
                continue;
            }
            let distant = is_distant_lion_capture(pos, mv);
            let undo = pos.make_move(mv);
            if self.is_repetition(pos) {
                pos.unmake_move(&undo);
                repeated = true;
                continue;
            }
            self.attacks[ply + 1].compute(pos);
            // 守られた獅子を離れて取った（取り返される）
            if distant && self.attacks[ply + 1].is_attacked(mv.to(), them) {
                pos.unmake_move(&undo);
                continue;
            }

            self.keys.push(pos.hash());
            let score = -self.search_node(pos, ply + 1, depth - 1, -beta, -alpha);
            self.keys.pop();
            pos.unmake_move(&undo);

            if score > best {
                best = score;
                if score > alpha {
                    alpha = score;
                    self.update_pv(ply, mv);
                }
                if score >= beta {
                    break;
                }
            }
        }
        self.moves.truncate(frame);

        if best == -Value::INFINITE {
            return if repeated { Value::DRAW } else { Value::mated_in(ply as i32) };
        }
        if best < cur_eval {
            best = best.nudge(true);
        }
        best
    }

    /// 手番側が相手の最後の王将を取れるか（火鬼の焼きは数えない）
    fn can_capture_last_royal(&self, pos: &Position, ply: usize) -> bool {
        let us = pos.side_to_move();
        let them = !us;
        match pos.royal_count(them) {
            0 => true,
            1 => pos.royals(them).any(|sq| self.attacks[ply].is_attacked(sq, us)),
            _ => false,
        }
    }

    /// 直前の手で、同じ手番の既出局面に戻ったか（最後の不可逆手より後だけを見る）
    fn is_repetition(&self, pos: &Position) -> bool {
        let n = self.keys.len();
        let reach = (pos.rev_count() as usize).min(n);
        let hash = pos.hash();
        (2..=reach).step_by(2).any(|back| self.keys[n - back] == hash)
    }

    fn update_pv(&mut self, ply: usize, mv: Move) {
        let child_len = self.pv_len[ply + 1].max(ply + 1);
        let (head, tail) = self.pv.split_at_mut(ply + 1);
        let row = &mut head[ply];
        row[ply] = mv;
        row[ply + 1..child_len].copy_from_slice(&tail[0][ply + 1..child_len]);
        self.pv_len[ply] = child_len;
    }
}

/// 一度だけ探索する
pub fn search(pos: &mut Position, limits: &SearchLimits) -> SearchResult {
    Searcher::new(pos).search(pos, limits)
}
