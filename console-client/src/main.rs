mod config;
mod console_ui;

use clap::Parser;
use std::path::PathBuf;
use tictactoe_engine::{Mark, log, logger};

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Path to the YAML config; defaults to a file next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mark to play this session (X or O), overriding the config.
    #[arg(long, value_parser = parse_mark)]
    human_mark: Option<Mark>,

    /// Write the effective settings back to the config file.
    #[arg(long)]
    save_config: bool,

    /// Let the engine play both sides once and exit.
    #[arg(long)]
    self_play: bool,
}

fn parse_mark(value: &str) -> Result<Mark, String> {
    match value {
        "X" | "x" => Ok(Mark::X),
        "O" | "o" => Ok(Mark::O),
        other => Err(format!("expected X or O, got {}", other)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let stdout = std::io::stdout();
    let mut output = stdout.lock();

    if args.self_play {
        console_ui::self_play(&mut output)?;
        return Ok(());
    }

    let config_manager = config::get_config_manager(args.config);
    let mut config = config_manager.get_config()?;
    if let Some(mark) = args.human_mark {
        config.human_mark = mark;
    }
    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Config saved");
    }

    log!("Starting console game, human plays {}", config.human_mark);
    let scoreboard = console_ui::run(&config, std::io::stdin().lock(), &mut output)?;
    log!("Session ended: {:?}", scoreboard);

    Ok(())
}
