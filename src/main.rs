#![deny(warnings)]

use clap::Parser;
use color_eyre::eyre::Result;

use oceanconf::{
    app::App,
    catalog::Catalog,
    cli::Cli,
    config::Config,
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = Cli::parse();

    let config = Config::new()?;
    let catalog = Catalog::load(&args.catalog)?;

    let mut app = App::new(config, catalog, args.tick_rate, args.frame_rate)?;
    app.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
