//! エンジン設定
//!
//! 設定ファイル（TOML）・コマンドライン・プロトコルの `option` コマンドのいずれからも
//! 同じ構造体を更新する。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OptionError;
use crate::piece::Variant;
use crate::search::SearchLimits;

/// エンジン設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// 変則名（`chu` / `dai`）
    pub variant: String,
    /// 反復深化の最大深さ
    pub max_depth: u32,
    /// 1 手あたりの目安の思考時間（ミリ秒）
    pub time_ms: u64,
    /// 探索の進捗を出力するか
    pub post: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            variant: "chu".to_string(),
            max_depth: 20,
            time_ms: 5_000,
            post: false,
        }
    }
}

impl EngineOptions {
    /// 設定名と値の文字列から 1 項目を更新する
    pub fn apply(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        let invalid = || OptionError::Invalid {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "variant" => {
                let variant = Variant::by_name(value).ok_or_else(invalid)?;
                self.variant = variant.name.to_string();
            }
            "max_depth" | "depth" => self.max_depth = value.parse().map_err(|_| invalid())?,
            "time_ms" => self.time_ms = value.parse().map_err(|_| invalid())?,
            "post" => {
                self.post = match value {
                    "1" | "true" | "on" => true,
                    "0" | "false" | "off" => false,
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(OptionError::Unknown(name.to_string())),
        }
        Ok(())
    }

    /// 探索の制限
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            depth: self.max_depth,
            time: (self.time_ms > 0).then(|| Duration::from_millis(self.time_ms)),
        }
    }
}
