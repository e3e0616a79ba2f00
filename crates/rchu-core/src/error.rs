//! エラー型
//!
//! 局面設定・表記解析・指し手の受理でそれぞれ失敗の種類を分ける。
//! 探索や指し手適用の内部整合性違反はエラーではなく `debug_assert!` で扱う。

/// 配置表記からの局面設定の失敗
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// 駒表記が駒テーブルにない
    #[error("unknown piece code '{0}'")]
    UnknownPiece(String),

    /// 段の記述が盤の大きさと合わない
    #[error("rank {rank}: {reason}")]
    MalformedRank { rank: usize, reason: String },

    /// 段数が盤の大きさと合わない
    #[error("expected {expected} ranks, got {actual}")]
    RankCount { expected: usize, actual: usize },

    /// 手番の記述が不正
    #[error("invalid side to move: {0}")]
    SideToMove(String),

    /// 王が一枚もない
    #[error("{0} has no royal piece")]
    MissingRoyal(crate::types::Color),

    /// 駒リストや火鬼の管理上限を超えた
    #[error("too many pieces: {0}")]
    Overflow(&'static str),
}

/// マス・指し手表記の解析失敗
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square: {0}")]
    Square(String),

    #[error("invalid move: {0}")]
    Move(String),
}

/// 受理できない指し手
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// 同一局面の 4 回目の出現
    #[error("repetition")]
    Repetition,

    /// 獅子を獅子以外で取られた直後に、獅子以外で獅子を取り返した
    #[error("Lion counterstrike")]
    Counterstrike,

    /// 離れた獅子を、取り返される位置で橋なしに取った
    #[error("protected Lion")]
    ProtectedLion,

    /// 自玉を取られる形にした
    #[error("royal left capturable")]
    RoyalExposed,

    /// 成るべき駒を成らずに動かした
    #[error("must promote")]
    MustPromote,

    /// 生成された手のいずれとも一致しない
    #[error("not a legal move")]
    NotGenerated,
}

/// エンジン設定の変更の失敗
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option: {0}")]
    Unknown(String),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: String, value: String },
}
