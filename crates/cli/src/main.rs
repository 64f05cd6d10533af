//! `stockbook`: interactive point-of-sale and inventory bookkeeping.

mod input;
mod menu;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stockbook_infra::{Bookkeeper, StaffStore, StorageConfig};

use crate::input::{Prompter, Stop};
use crate::menu::App;

#[derive(Debug, Parser)]
#[command(name = "stockbook", version, about = "Point-of-sale and inventory bookkeeping")]
struct Cli {
    /// Directory for state, invoices and reports.
    #[arg(long, env = stockbook_infra::config::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    stockbook_observability::init();
    let cli = Cli::parse();

    let config = match cli.data_dir {
        Some(dir) => StorageConfig::new(dir),
        None => StorageConfig::from_env(),
    };

    let books = Bookkeeper::open(&config).with_context(|| {
        format!("failed to open ledger in {}", config.data_dir().display())
    })?;
    let staff = StaffStore::open(&config).context("failed to load employee roster")?;
    let mut app = App { books, staff };

    let prompt = Prompter::start()?;
    match menu::run(&mut app, &prompt) {
        Ok(()) => println!("Goodbye."),
        Err(Stop::Interrupted) => println!("\nInterrupted; saving and exiting."),
        Err(Stop::EndOfInput) => tracing::info!("input closed"),
    }

    app.books.save().context("failed to save ledger")?;
    Ok(())
}
