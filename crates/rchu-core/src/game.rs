//! 対局
//!
//! 局面と指し手の履歴を持ち、表記での着手・合法手の問い合わせ・探索・待ったを提供する。
//! 待ったは初期局面から履歴を指し直して行う。

use crate::attack::AttackMap;
use crate::error::{IllegalMove, SetupError};
use crate::movegen::{check_move, destinations, generate_all, legal_moves};
use crate::notation::{MoveText, find_move, read_move};
use crate::piece::Variant;
use crate::position::Position;
use crate::search::{InfoCallback, SearchLimits, SearchResult, Searcher};
use crate::types::{Color, Move, Square};

/// 同一局面がこの回数現れる手は指せない
const REPETITION_LIMIT: usize = 4;

/// 対局
pub struct Game {
    initial: Position,
    position: Position,
    moves: Vec<Move>,
    /// [手数] 各局面のハッシュ（初期局面から現在まで）
    keys: Vec<u64>,
    searcher: Searcher,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("position", &self.position)
            .field("moves", &self.moves.len())
            .finish()
    }
}

impl Game {
    /// 変則の初期配置から始める
    pub fn new(variant: &'static Variant) -> Result<Game, SetupError> {
        Ok(Game::from_position(Position::start(variant)?))
    }

    pub fn from_position(position: Position) -> Game {
        Game {
            searcher: Searcher::new(&position),
            keys: vec![position.hash()],
            initial: position.clone(),
            position,
            moves: Vec::new(),
        }
    }

    /// 配置表記から局面を設定し直す（履歴は消える）
    pub fn setup(&mut self, variant: &'static Variant, notation: &str) -> Result<Color, SetupError> {
        let position = Position::setup(variant, notation)?;
        let info = self.searcher.take_info_callback();
        *self = Game::from_position(position);
        if let Some(callback) = info {
            self.searcher.set_info_callback(callback);
        }
        Ok(self.side_to_move())
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn variant(&self) -> &'static Variant {
        self.position.variant()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// これまでに指された手
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn set_info_callback(&mut self, callback: InfoCallback) {
        self.searcher.set_info_callback(callback);
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        legal_moves(&mut self.position)
    }

    /// `from` の駒の合法な移動先
    pub fn legal_destinations(&mut self, from: Square) -> Vec<Square> {
        destinations(&mut self.position, from)
    }

    /// 表記に一致する合法手
    pub fn parse_move(&mut self, text: &str) -> Option<Move> {
        let read = read_move(text).ok()?;
        find_move(&read, &self.legal_moves())
    }

    /// 表記で手を指す。成功すれば次の手番を返す
    pub fn make_move(&mut self, text: &str) -> Result<Color, IllegalMove> {
        let read = read_move(text)?;
        let legal = self.legal_moves();
        match find_move(&read, &legal) {
            Some(mv) => self.commit(mv),
            None => {
                let reason = self.explain(&read);
                log::warn!("rejected {text}: {reason}");
                Err(reason)
            }
        }
    }

    /// 生成済みの手を指す（探索結果など）
    pub fn play(&mut self, mv: Move) -> Result<Color, IllegalMove> {
        if !self.legal_moves().contains(&mv) {
            return Err(IllegalMove::NotGenerated);
        }
        self.commit(mv)
    }

    fn commit(&mut self, mv: Move) -> Result<Color, IllegalMove> {
        let undo = self.position.make_move(mv);
        if self.occurrences(self.position.hash(), self.keys.len()) + 1 >= REPETITION_LIMIT {
            self.position.unmake_move(&undo);
            return Err(IllegalMove::Repetition);
        }
        self.moves.push(mv);
        self.keys.push(self.position.hash());
        Ok(self.side_to_move())
    }

    /// 手数 `at` の局面と同じ手番で、それより前に `hash` が現れた回数
    fn occurrences(&self, hash: u64, at: usize) -> usize {
        self.keys[..at]
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .filter(|&&k| k == hash)
            .count()
    }

    /// 現在の局面がこれまでに現れた回数（現在を含む）
    pub fn repetition_count(&self) -> usize {
        let at = self.keys.len() - 1;
        self.occurrences(self.position.hash(), at) + 1
    }

    /// 合法手と一致しなかった理由
    fn explain(&mut self, read: &MoveText) -> IllegalMove {
        let attacks = AttackMap::from_position(&self.position);
        let mut pseudo = Vec::new();
        generate_all(&self.position, &attacks, &mut pseudo);
        let mut after = AttackMap::new();
        if let Some(mv) = find_move(read, &pseudo)
            && let Err(reason) = check_move(&mut self.position, mv, &mut after)
        {
            return reason;
        }
        let must_promote = !read.promote
            && pseudo
                .iter()
                .any(|m| m.same_path(read.path) && m.is_promotion());
        if must_promote {
            IllegalMove::MustPromote
        } else {
            IllegalMove::NotGenerated
        }
    }

    /// 最善手を探す（詰め直した局面で探索する）
    pub fn search_best_move(&mut self, limits: &SearchLimits) -> SearchResult {
        self.position.compact();
        let history = &self.keys[..self.keys.len() - 1];
        let result = self.searcher.search_with_history(&mut self.position, limits, history);
        log::info!(
            "best {:?} score {} depth {} nodes {}",
            result.best_move.map(crate::notation::format_move),
            result.score,
            result.depth,
            result.nodes
        );
        result
    }

    /// `n` 手戻す（初期局面から指し直す）。実際に戻した手数を返す
    pub fn takeback(&mut self, n: usize) -> usize {
        let n = n.min(self.moves.len());
        let keep = self.moves.len() - n;
        let replay: Vec<Move> = self.moves[..keep].to_vec();
        self.position = self.initial.clone();
        self.moves.clear();
        self.keys.truncate(1);
        for mv in replay {
            self.position.make_move(mv);
            self.moves.push(mv);
            self.keys.push(self.position.hash());
        }
        log::info!("took back {n} move(s), {} remain", self.moves.len());
        n
    }

    /// 勝者（手番側が王将を失ったか、指せる手がない）
    pub fn winner(&mut self) -> Option<Color> {
        let us = self.side_to_move();
        if self.position.royal_count(us) == 0 || self.legal_moves().is_empty() {
            Some(!us)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::CHU;

    fn setup_game(notation: &str) -> Game {
        let mut game = Game::new(&CHU).unwrap();
        game.setup(&CHU, notation).unwrap();
        game
    }

    #[test]
    fn test_make_move_and_takeback() {
        let mut game = Game::new(&CHU).unwrap();
        let start = game.position().clone();
        assert_eq!(game.make_move("e4e5"), Ok(Color::White));
        assert_eq!(game.make_move("h9h8"), Ok(Color::Black));
        assert_eq!(game.moves().len(), 2);
        assert_eq!(game.takeback(1), 1);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.takeback(5), 1);
        assert_eq!(game.position(), &start);
    }

    #[test]
    fn test_rejection_reasons() {
        let mut game = Game::new(&CHU).unwrap();
        assert!(matches!(game.make_move("e4"), Err(IllegalMove::Notation(_))));
        assert_eq!(game.make_move("e4e6"), Err(IllegalMove::NotGenerated));

        // 最奥段への歩は成るしかない
        let mut game = setup_game("k11/4P7/12/12/12/12/12/12/12/12/12/K11 b");
        assert_eq!(game.make_move("e11e12"), Err(IllegalMove::MustPromote));
        assert_eq!(game.make_move("e11e12+"), Ok(Color::White));

        // 玉を取られる所へは行けない
        let mut game = setup_game("kr10/12/12/12/12/12/12/12/12/12/12/K11 b");
        assert_eq!(game.make_move("a1b1"), Err(IllegalMove::RoyalExposed));
        assert_eq!(game.legal_destinations(Square::new(0, 0)), vec![Square::new(0, 1)]);
    }

    #[test]
    fn test_fourfold_repetition_is_rejected() {
        let mut game = setup_game("k11/12/12/12/12/12/5G6/12/12/12/12/K11 b");
        let cycle = ["a1a2", "a12a11", "a2a1", "a11a12"];
        for _ in 0..2 {
            for mv in cycle {
                game.make_move(mv).unwrap();
            }
        }
        assert_eq!(game.repetition_count(), 3);
        for mv in &cycle[..3] {
            game.make_move(mv).unwrap();
        }
        assert_eq!(game.make_move("a11a12"), Err(IllegalMove::Repetition));
        assert_eq!(game.make_move("a11b11"), Ok(Color::Black));
    }

    #[test]
    fn test_search_best_move_is_playable() {
        let mut game = setup_game("1k10/12/12/12/12/12/12/12/12/12/1R10/K11 b");
        let result = game.search_best_move(&SearchLimits::depth(2));
        let mv = result.best_move.unwrap();
        assert_eq!(game.play(mv), Ok(Color::White));
        assert_eq!(game.winner(), Some(Color::Black));
    }
}
