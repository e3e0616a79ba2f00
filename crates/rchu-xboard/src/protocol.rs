//! XBoard プロトコルのコマンド処理
//!
//! 1 行ずつ受け取って対局を進め、応答を `out` に書く。探索は同期的に行い、
//! 進捗（`post` 時）は探索が終わってからまとめて出力する。

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rchu_core::notation::{format_move, parse_square, read_move};
use rchu_core::search::SearchInfo;
use rchu_core::{Color, EngineOptions, Game, Square, Value, Variant};

/// 探索の進捗の受け渡し
type ProgressSink = Arc<Mutex<Vec<String>>>;

pub struct Driver<W: Write> {
    out: W,
    game: Game,
    options: EngineOptions,
    /// エンジンが受け持つ手番（`force` 中は `None`）
    engine: Option<Color>,
    progress: ProgressSink,
}

impl<W: Write> Driver<W> {
    pub fn new(options: EngineOptions, out: W) -> Result<Self> {
        let variant = lookup_variant(&options.variant)?;
        let progress: ProgressSink = Arc::default();
        let mut game = Game::new(variant).context("failed to set up the start position")?;
        game.set_info_callback(progress_callback(progress.clone()));
        Ok(Self {
            out,
            game,
            options,
            engine: Some(Color::White),
            progress,
        })
    }

    /// 1 行のコマンドを処理する。`quit` なら `false` を返す
    pub fn handle(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        let (cmd, args) = match line.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (line, ""),
        };
        debug!("<< {line}");

        match cmd {
            "" => {}
            "quit" => return Ok(false),
            "protover" => self.send_features()?,
            "ping" => self.send(&format!("pong {args}"))?,
            "new" => {
                let variant = lookup_variant(&self.options.variant)?;
                self.reset(variant)?;
            }
            "variant" => match Variant::by_name(args) {
                Some(variant) => {
                    self.options.variant = variant.name.to_string();
                    self.reset(variant)?;
                }
                None => self.send(&format!("Error (unsupported variant): {args}"))?,
            },
            "setboard" => self.set_board(args)?,
            "force" => self.engine = None,
            "go" => {
                self.engine = Some(self.game.side_to_move());
                self.think()?;
            }
            "usermove" => self.user_move(args)?,
            "undo" => {
                self.game.takeback(1);
            }
            "remove" => {
                self.game.takeback(2);
            }
            "sd" => match args.parse() {
                Ok(depth) => self.options.max_depth = depth,
                Err(_) => self.send(&format!("Error (bad depth): {args}"))?,
            },
            "st" => match args.parse::<u64>() {
                Ok(seconds) => self.options.time_ms = seconds.saturating_mul(1000),
                Err(_) => self.send(&format!("Error (bad time): {args}"))?,
            },
            "post" => self.options.post = true,
            "nopost" => self.options.post = false,
            "option" => self.set_option(args)?,
            "lift" => self.lift(args)?,
            "put" | "hover" => self.send_highlight(&[])?,
            "xboard" | "accepted" | "rejected" | "random" | "hard" | "easy" | "computer"
            | "level" | "time" | "otim" | "result" | "name" | "rating" | "." => {
                info!("Ignoring command: {cmd}");
            }
            _ if read_move(line).is_ok() => self.user_move(line)?,
            _ => self.send(&format!("Error (unknown command): {line}"))?,
        }
        Ok(true)
    }

    fn send(&mut self, line: &str) -> Result<()> {
        debug!(">> {line}");
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    fn send_features(&mut self) -> Result<()> {
        let variants: Vec<&str> = Variant::builtin().iter().map(|v| v.name).collect();
        self.send(&format!(
            "feature myname=\"rchu {}\" variants=\"{}\" setboard=1 usermove=1 ping=1 \
             sigint=0 sigterm=0 colors=0 highlight=1",
            env!("CARGO_PKG_VERSION"),
            variants.join(",")
        ))?;
        self.send(&format!(
            "feature option=\"Max Depth -spin {} 1 63\"",
            self.options.max_depth
        ))?;
        self.send(&format!(
            "feature option=\"Time Ms -spin {} 0 3600000\"",
            self.options.time_ms
        ))?;
        self.send("feature done=1")
    }

    fn reset(&mut self, variant: &'static Variant) -> Result<()> {
        self.game
            .setup(variant, variant.start)
            .context("failed to set up the start position")?;
        self.engine = Some(Color::White);
        info!("new {} game", variant.name);
        Ok(())
    }

    fn set_board(&mut self, notation: &str) -> Result<()> {
        let variant = self.game.variant();
        if let Err(e) = self.game.setup(variant, notation) {
            warn!("setboard failed: {e}");
            self.send(&format!("tellusererror Illegal position: {e}"))?;
        }
        Ok(())
    }

    fn set_option(&mut self, args: &str) -> Result<()> {
        let Some((name, value)) = args.split_once('=') else {
            return self.send(&format!("Error (bad option): {args}"));
        };
        if let Err(e) = self.options.apply(name.trim(), value.trim()) {
            self.send(&format!("Error ({e}): {args}"))?;
        }
        Ok(())
    }

    fn user_move(&mut self, text: &str) -> Result<()> {
        match self.game.make_move(text) {
            Ok(side) => {
                if !self.report_result()? && self.engine == Some(side) {
                    self.think()?;
                }
            }
            Err(reason) => self.send(&format!("Illegal move ({reason}): {text}"))?,
        }
        Ok(())
    }

    /// 探索して指す
    fn think(&mut self) -> Result<()> {
        if self.report_result()? {
            return Ok(());
        }
        let result = self.game.search_best_move(&self.options.limits());
        let lines = self
            .progress
            .lock()
            .map(|mut lines| std::mem::take(&mut *lines))
            .unwrap_or_default();
        if self.options.post {
            for line in lines {
                self.send(&line)?;
            }
        }

        let Some(mv) = result.best_move else {
            return self.send("resign");
        };
        if let Err(e) = self.game.play(mv) {
            warn!("search returned an unplayable move {}: {e}", format_move(mv));
            return self.send("resign");
        }
        self.send(&format!("move {}", format_move(mv)))?;
        self.report_result()?;
        Ok(())
    }

    /// 決着していれば結果を送って `true` を返す
    fn report_result(&mut self) -> Result<bool> {
        match self.game.winner() {
            Some(Color::Black) => self.send("1-0 {Black wins}")?,
            Some(Color::White) => self.send("0-1 {White wins}")?,
            None => return Ok(false),
        }
        Ok(true)
    }

    /// 駒を持ち上げたときに移動先を色付けする
    fn lift(&mut self, args: &str) -> Result<()> {
        match parse_square(args) {
            Ok(sq) => {
                let targets = self.game.legal_destinations(sq);
                self.send_highlight(&targets)
            }
            Err(e) => self.send(&format!("Error ({e}): lift {args}")),
        }
    }

    /// 移動先を `Y`、駒取りを `R` にした盤面図を送る
    fn send_highlight(&mut self, targets: &[Square]) -> Result<()> {
        let pos = self.game.position();
        let us = pos.side_to_move();
        let mut ranks = Vec::with_capacity(pos.ranks() as usize);
        for rank in (0..pos.ranks()).rev() {
            let mut text = String::new();
            let mut empty = 0;
            for file in 0..pos.files() {
                let sq = Square::new(file, rank);
                if !targets.contains(&sq) {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    text.push_str(&empty.to_string());
                    empty = 0;
                }
                let capture = pos.piece_at(sq).is_some_and(|id| id.color() != us);
                text.push(if capture { 'R' } else { 'Y' });
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            ranks.push(text);
        }
        self.send(&format!("highlight {}", ranks.join("/")))
    }
}

fn lookup_variant(name: &str) -> Result<&'static Variant> {
    Variant::by_name(name).with_context(|| format!("unknown variant: {name}"))
}

fn progress_callback(sink: ProgressSink) -> Box<dyn FnMut(&SearchInfo<'_>) + Send> {
    Box::new(move |info: &SearchInfo<'_>| {
        let pv: Vec<String> = info.pv.iter().map(|&mv| format_move(mv)).collect();
        let line = format!(
            "{} {} {} {} {}",
            info.depth,
            xboard_score(info.score),
            info.elapsed.as_millis() / 10,
            info.nodes,
            pv.join(" ")
        );
        if let Ok(mut lines) = sink.lock() {
            lines.push(line);
        }
    })
}

/// 詰みは XBoard の慣例どおり 100000 + 手数で表す
fn xboard_score(score: Value) -> i32 {
    if !score.is_mate_score() {
        return score.raw();
    }
    let plies = Value::MATE.raw() - score.raw().abs();
    let moves = (plies + 1) / 2;
    if score.is_win() { 100_000 + moves } else { -100_000 - moves }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver<Vec<u8>> {
        Driver::new(EngineOptions::default(), Vec::new()).unwrap()
    }

    fn run(driver: &mut Driver<Vec<u8>>, commands: &[&str]) -> Vec<String> {
        for command in commands {
            assert!(driver.handle(command).unwrap());
        }
        let text = String::from_utf8(std::mem::take(&mut driver.out)).unwrap();
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_protover_and_ping() {
        let mut driver = driver();
        let lines = run(&mut driver, &["xboard", "protover 2", "ping 7"]);
        assert!(lines[0].contains("variants=\"chu,dai\""));
        assert!(lines[0].contains("highlight=1"));
        assert_eq!(lines[lines.len() - 2], "feature done=1");
        assert_eq!(lines.last().unwrap(), "pong 7");
        assert!(!driver.handle("quit").unwrap());
    }

    #[test]
    fn test_force_mode_moves_and_undo() {
        let mut driver = driver();
        let lines = run(&mut driver, &["new", "force", "usermove e4e5", "h9h8", "e4e6"]);
        assert_eq!(lines, vec!["Illegal move (not a legal move): e4e6"]);
        assert_eq!(driver.game.moves().len(), 2);
        run(&mut driver, &["remove"]);
        assert!(driver.game.moves().is_empty());
        run(&mut driver, &["e4e5", "undo"]);
        assert_eq!(driver.game.side_to_move(), Color::Black);
    }

    #[test]
    fn test_go_captures_the_king() {
        let mut driver = driver();
        let lines = run(
            &mut driver,
            &[
                "force",
                "setboard 1k10/12/12/12/12/12/12/12/12/12/1R10/K11 b",
                "sd 2",
                "post",
                "go",
            ],
        );
        let played: Vec<&String> = lines.iter().filter(|l| l.starts_with("move ")).collect();
        assert_eq!(played.len(), 1);
        assert!(played[0].starts_with("move b2b12"));
        assert_eq!(lines.last().unwrap(), "1-0 {Black wins}");
        assert!(lines[0].starts_with("1 100001 "));
    }

    #[test]
    fn test_engine_replies_after_user_move() {
        let mut driver = driver();
        let lines = run(&mut driver, &["new", "sd 1", "st 0", "e4e5"]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("move "));
        assert_eq!(driver.game.moves().len(), 2);
    }

    #[test]
    fn test_lift_highlights_destinations() {
        let mut driver = driver();
        let lines = run(
            &mut driver,
            &["setboard kr10/12/12/12/12/12/12/12/12/12/12/K11 b", "lift a1", "put a2"],
        );
        let empty_ranks = vec!["12"; 10].join("/");
        assert_eq!(lines[0], format!("highlight {empty_ranks}/Y11/12"));
        assert_eq!(lines[1], format!("highlight {empty_ranks}/12/12"));
    }

    #[test]
    fn test_options_and_errors() {
        let mut driver = driver();
        let lines = run(
            &mut driver,
            &["option Max Depth=3", "option Hash=16", "variant tenjiku", "frobnicate"],
        );
        assert_eq!(driver.options.max_depth, 3);
        assert_eq!(lines[0], "Error (unknown option: Hash): Hash=16");
        assert_eq!(lines[1], "Error (unsupported variant): tenjiku");
        assert_eq!(lines[2], "Error (unknown command): frobnicate");
        run(&mut driver, &["variant dai"]);
        assert_eq!(driver.game.variant().name, "dai");
    }

    #[test]
    fn test_search_time_limits() {
        let mut driver = driver();
        run(&mut driver, &["st 5"]);
        assert_eq!(driver.options.time_ms, 5_000);
        run(&mut driver, &["st 18446744073709551615"]);
        assert_eq!(driver.options.time_ms, u64::MAX);
        let lines = run(&mut driver, &["st 99999999999999999999"]);
        assert_eq!(lines, ["Error (bad time): 99999999999999999999"]);
        assert_eq!(driver.options.time_ms, u64::MAX);
    }
}
