pub mod cli;
pub mod db;
pub mod ingest;
pub mod reader;
pub mod row;
pub mod sink;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{LevelFilter, debug};

use crate::{
    cli::Cli,
    db::Database,
    sink::{DatabaseSink, DryRunSink},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("user_upload", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub async fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if cli.create_table {
        let mut db = connect(&cli).await?;
        db.recreate_users_table().await?;
        println!("Table created.");
        return Ok(());
    }

    if let Some(path) = cli.file.clone() {
        if cli.dry_run {
            // A dry run never opens a connection, so it needs no credentials.
            let lines = reader::load_lines(&path)?;
            let mut sink = DryRunSink;
            ingest::process_lines(&path, &lines, &mut sink, true).await;
        } else {
            let mut db = connect(&cli).await?;
            db.recreate_users_table().await?;
            println!("Table created.");
            let lines = reader::load_lines(&path)?;
            let mut sink = DatabaseSink::new(&mut db);
            ingest::process_lines(&path, &lines, &mut sink, false).await;
        }
        return Ok(());
    }

    println!("Error: please specify either the --file or --create_table option.\n");
    Cli::command().print_help()?;
    println!();
    Ok(())
}

async fn connect(cli: &Cli) -> Result<Database> {
    let creds = cli.credentials()?;
    debug!("connecting to MySQL at '{}' as '{}'", creds.host, creds.user);
    let mut db = Database::connect(&creds).await?;
    db.ensure_database().await?;
    println!("Connected to MySQL database successfully.");
    Ok(db)
}
