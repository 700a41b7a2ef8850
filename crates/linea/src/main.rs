mod config;
mod session;
mod term;

use anyhow::Result;
use crossterm::{cursor, execute, terminal::disable_raw_mode};
use log::LevelFilter;
use std::io;

use session::{ReadOutcome, Session};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger with debug fallback for development
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Warn);
        logger.filter_module("linea", LevelFilter::Info);
    }
    logger.init();

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut session = match Session::new().await {
        Ok(session) => {
            log::info!("Session initialized successfully");
            session
        }
        Err(e) => {
            eprintln!("failed to initialize session: {}", e);
            if let Some(source) = e.source() {
                eprintln!("caused by: {}", source);
            }
            return Err(e);
        }
    };

    loop {
        match session.read_line() {
            Ok(ReadOutcome::Line(line)) => {
                if line.trim() == "exit" {
                    break;
                }
                println!("{}", line);
            }
            Ok(ReadOutcome::Interrupted) => continue,
            Ok(ReadOutcome::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                restore_terminal()?;
                eprintln!("input error: {}", err);
                if let Some(source) = err.source() {
                    eprintln!("caused by: {}", source);
                }
                log::error!("Session error: {}", err);
                return Err(err);
            }
        }
    }

    log::info!("Session ended successfully");
    Ok(())
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    // Attempt to show cursor, but don't fail if it errors
    let _ = execute!(stdout, cursor::Show);
    Ok(())
}
