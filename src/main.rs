//! Boutique point-of-sale simulator

use std::{io, path::PathBuf};

use anyhow::Result;
use boutique::{
    checkout::Checkout,
    fixtures::Shop,
    logging::{LogFormat, init_subscriber},
    session::Session,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "boutique", about = "Second hand shop point-of-sale simulator", long_about = None)]
struct Cli {
    /// YAML shop fixture to open; the built-in boutique is used when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Cashier working the register
    #[arg(long, default_value = "Emma")]
    worker: String,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_subscriber(&cli.log_level, cli.log_format)?;

    let shop = match cli.catalog.as_deref() {
        Some(path) => Shop::load(path)?,
        None => Shop::boutique()?,
    };

    let mut session = Session::new(shop, Checkout::new(cli.worker))?;

    session.run(&mut io::stdin().lock(), &mut io::stdout().lock())?;

    Ok(())
}
