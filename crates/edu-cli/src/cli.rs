use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "edu")]
#[command(about = "Session and tenant tooling for the school platform")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (defaults to api.base_url from config)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Page host used for tenant resolution, e.g. acme.school.example
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
