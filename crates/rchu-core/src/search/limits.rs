//! 探索の制限と結果

use std::time::Duration;

use crate::types::{MAX_PLY, Move, Value};

/// 探索の制限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// 反復深化の最大深さ
    pub depth: u32,
    /// 目安の思考時間（反復の区切りでだけ確認する）
    pub time: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            depth: 6,
            time: None,
        }
    }
}

impl SearchLimits {
    /// 深さだけを指定
    pub fn depth(depth: u32) -> Self {
        Self {
            depth,
            time: None,
        }
    }

    /// 時間を指定（深さは上限まで）
    pub fn time(time: Duration) -> Self {
        Self {
            depth: MAX_PLY as u32 - 1,
            time: Some(time),
        }
    }

    /// 実際に使う最大深さ
    pub(super) fn max_depth(&self) -> u32 {
        self.depth.clamp(1, MAX_PLY as u32 - 1)
    }
}

/// 探索結果（最後に完了した反復のもの）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Value,
    pub depth: u32,
    pub pv: Vec<Move>,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// 反復ごとの進捗
#[derive(Debug, Clone, Copy)]
pub struct SearchInfo<'a> {
    pub depth: u32,
    pub score: Value,
    pub nodes: u64,
    pub elapsed: Duration,
    pub pv: &'a [Move],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_depth_is_clamped() {
        assert_eq!(SearchLimits::depth(0).max_depth(), 1);
        assert_eq!(SearchLimits::depth(1000).max_depth(), MAX_PLY as u32 - 1);
        assert_eq!(SearchLimits::time(Duration::from_millis(10)).time, Some(Duration::from_millis(10)));
    }
}
