use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};

/// Connection settings for the MySQL server, collected from `-u`, `-p`, `-h`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub host: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Parser)]
#[command(
    name = "user-upload",
    version,
    about = "Validate a CSV of user records and load them into MySQL",
    long_about = None,
    disable_help_flag = true,
    after_help = "Examples:\n  \
        user-upload --help\n  \
        user-upload --create_table -u user -p password -h localhost\n  \
        user-upload --file users.csv -u user -p password -h localhost --dry_run"
)]
pub struct Cli {
    /// CSV file to process
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Drop and recreate the users table, then exit (no other action taken)
    #[arg(long = "create_table")]
    pub create_table: bool,

    /// Validate and report without writing to the database
    #[arg(long = "dry_run")]
    pub dry_run: bool,

    /// MySQL username
    #[arg(short = 'u', value_name = "USERNAME")]
    pub user: Option<String>,

    /// MySQL password
    #[arg(short = 'p', value_name = "PASSWORD")]
    pub password: Option<String>,

    /// MySQL host
    #[arg(short = 'h', value_name = "HOST")]
    pub host: Option<String>,

    /// Print this help message
    #[arg(long, action = ArgAction::HelpLong)]
    help: Option<bool>,
}

impl Cli {
    /// Returns the full credential triple, failing when any part is absent.
    /// Empty values count as missing; blank MySQL passwords are refused.
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.host, &self.user, &self.password) {
            (Some(host), Some(user), Some(password))
                if !host.is_empty() && !user.is_empty() && !password.is_empty() =>
            {
                Ok(Credentials {
                    host: host.clone(),
                    user: user.clone(),
                    password: password.clone(),
                })
            }
            _ => bail!("missing a host (-h), username (-u), or password (-p)"),
        }
    }
}
