use anyhow::Result;
use clap::Parser;
use imagefx::{cli::Cli, config::Config, db, logic};

#[tokio::main]
async fn main() -> Result<()> {
    imagefx::init_logger();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    config.create_dirs()?;

    let db = db::init(&config).await?;
    let result = logic::run(cli.command, &config, &db).await;
    db.close().await;

    result
}
