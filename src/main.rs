mod app;
mod app_error;
mod components;
mod config;
mod event;
mod handler;
mod logging;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::config::{AppConfig, DemoConfig, LogConfig, TableConfig, ThemeConfig};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// Searchable, editable table demo.
#[derive(Parser, Debug)]
#[command(name = "searchable-table", version, about)]
struct Cli {
    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of demo items to seed
    #[arg(long)]
    items: Option<usize>,

    /// Leave edit mode after each rename
    #[arg(long)]
    stop_edit_after_rename: bool,

    /// Delete rows without asking
    #[arg(long)]
    no_confirm_delete: bool,

    /// Color scheme: dark, light or custom
    #[arg(long)]
    theme: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// CLI flags as a partial config; unset flags stay `None`.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            table: TableConfig {
                stop_edit_after_rename: self.stop_edit_after_rename.then_some(true),
                confirm_delete: self.no_confirm_delete.then_some(false),
                ..Default::default()
            },
            demo: DemoConfig {
                item_count: self.items,
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
            log: LogConfig {
                file: self.log_file.clone(),
                filter: None,
            },
        }
    }
}

#[tokio::main]
async fn main() -> app_error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    let date_format = config.date_format()?;

    logging::init(config.log_file(), config.log_filter())?;
    info!(items = config.item_count(), "starting");

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(&config, date_format);
    let mut events = EventHandler::new(Duration::from_millis(250));

    let mut dirty = true;
    loop {
        let reloaded = app.table.take_redraw();
        if dirty || reloaded {
            tui.terminal_mut().draw(|frame| {
                ui::render(&mut app, frame);
            })?;
        }

        dirty = match events.next().await? {
            Event::Key(key) => {
                handler::handle_key_event(&mut app, key);
                true
            }
            Event::Resize(_, _) => true,
            Event::Tick => app.clear_expired_status(),
        };

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    info!("exiting");
    Ok(())
}
