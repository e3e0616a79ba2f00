//! 設定ファイルとコマンドライン引数の統合

use std::path::Path;

use anyhow::{Context, Result};
use rchu_core::{EngineOptions, Variant};

/// コマンドラインで上書きする項目
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub variant: Option<String>,
    pub depth: Option<u32>,
    pub time_ms: Option<u64>,
}

/// TOML の設定ファイル（省略時は既定値）を読み、コマンドラインの値で上書きする
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<EngineOptions> {
    let mut options = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&text).with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => EngineOptions::default(),
    };

    if let Some(variant) = &overrides.variant {
        options.variant = variant.clone();
    }
    if let Some(depth) = overrides.depth {
        options.max_depth = depth;
    }
    if let Some(time_ms) = overrides.time_ms {
        options.time_ms = time_ms;
    }

    let variant = Variant::by_name(&options.variant)
        .with_context(|| format!("unknown variant: {}", options.variant))?;
    options.variant = variant.name.to_string();
    log::debug!("engine options: {options:?}");
    Ok(options)
}

fn parse(text: &str) -> Result<EngineOptions> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_file() {
        let options = parse("variant = \"dai\"\nmax_depth = 4\n").unwrap();
        assert_eq!(options.variant, "dai");
        assert_eq!(options.max_depth, 4);
        assert_eq!(options.time_ms, EngineOptions::default().time_ms);
        assert!(parse("max_depth = \"deep\"").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            variant: Some("DAI".to_string()),
            depth: Some(3),
            time_ms: None,
        };
        let options = load(None, &overrides).unwrap();
        assert_eq!(options.variant, "dai");
        assert_eq!(options.max_depth, 3);

        let overrides = Overrides {
            variant: Some("tenjiku".to_string()),
            ..Overrides::default()
        };
        assert!(load(None, &overrides).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load(Some(Path::new("/nonexistent/rchu.toml")), &Overrides::default());
        assert!(err.unwrap_err().to_string().contains("failed to read config file"));
    }
}
