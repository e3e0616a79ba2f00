//! # rchu-core
//!
//! 中将棋・大将棋など大盤の将棋変則のエンジンコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Direction, Move, Value）
//! - `piece`: 駒定義と変則（中将棋・大将棋）
//! - `position`: 局面表現、配置表記、make_move/unmake_move
//! - `attack`: 利きマップ
//! - `movegen`: 指し手生成と合法性判定
//! - `eval`: 静的評価
//! - `search`: 反復深化 alpha-beta 探索
//! - `notation`: マス・指し手の表記
//! - `game`: 対局（履歴・待った・千日手）
//! - `options`: エンジン設定
//!

// 基本型
pub mod error;
pub mod types;

// 駒と盤面
pub mod piece;
pub mod position;

// 利きと指し手生成
pub mod attack;
pub mod movegen;

// 評価と探索
pub mod eval;
pub mod search;

// 対局インターフェース
pub mod game;
pub mod notation;
pub mod options;

pub use error::{IllegalMove, NotationError, OptionError, SetupError};
pub use game::Game;
pub use options::EngineOptions;
pub use piece::{CHU, DAI, Variant};
pub use position::Position;
pub use search::{SearchLimits, SearchResult, Searcher};
pub use types::{Color, Move, Square, Value};
