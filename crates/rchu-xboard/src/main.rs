// XBoard (WinBoard) adapter

mod config;
mod protocol;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use protocol::Driver;

#[derive(Parser, Debug)]
#[command(name = "rchu", author, version, about = "Chu Shogi engine speaking the XBoard protocol", long_about = None)]
struct Args {
    /// Variant to start with (chu, dai)
    #[arg(long)]
    variant: Option<String>,

    /// Maximum search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Thinking time per move in milliseconds (0 = depth only)
    #[arg(long)]
    time_ms: Option<u64>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level written to stderr (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr);
    if let Some(level) = args.log_level {
        builder.filter_level(level);
    }
    builder.init();

    // stdout にはプロトコルの応答以外を書かない
    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let overrides = config::Overrides {
        variant: args.variant.clone(),
        depth: args.depth,
        time_ms: args.time_ms,
    };
    let options = config::load(args.config.as_deref(), &overrides)?;
    log::info!("rchu starting with variant {}", options.variant);

    let stdout = io::stdout();
    let mut driver = Driver::new(options, stdout.lock())?;
    for line in io::stdin().lock().lines() {
        if !driver.handle(&line?)? {
            break;
        }
    }
    Ok(())
}
