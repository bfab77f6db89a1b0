//! order-board - 售后订单终端看板
//!
//! Run: cargo run -p board-tui -- --seed 42

mod app;
mod config;
mod logger;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Context;
use board_core::announcement::Marquee;
use board_core::mock::generate_mock_orders;
use board_core::BoardStore;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::App;
use crate::config::{Cli, Config};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().with_cli(&cli);

    logger::init_logger_with_file(Some(&config.log_level), Some(&config.log_dir));

    tracing::info!("🦀 Order board starting...");
    tracing::info!(
        orders = config.order_count,
        page_size = config.page_size,
        seed = ?config.seed,
        "Configuration loaded"
    );

    let orders = generate_mock_orders(config.order_count, config.seed);
    let store = BoardStore::new(orders)
        .context("Mock orders contain duplicate ids")?
        .with_page_size(config.page_size);

    if cli.dump_json {
        let json = serde_json::to_string_pretty(&store.view())?;
        println!("{}", json);
        return Ok(());
    }

    let mut app = App::new(store, Marquee::new(&config.announcements));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app::run(&mut terminal, &mut app, Duration::from_millis(config.tick_ms));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Board loop failed: {}", err);
        return Err(err.into());
    }

    Ok(())
}
