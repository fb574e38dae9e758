use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "novaportal",
    about = "Nova Portal video conferencing lobby",
    version,
    arg_required_else_help = false
)]
pub struct Cli {
    /// Path to a TOML config file (./novaportal.toml is picked up when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Prefill the display-name field
    #[arg(long)]
    pub name: Option<String>,

    /// Prefill the room-name field
    #[arg(long)]
    pub room: Option<String>,

    /// Start with end-to-end encryption enabled
    #[arg(long)]
    pub e2ee: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build and print a room navigation target without opening the lobby
    Join {
        /// Display name to join with
        #[arg(long)]
        name: String,

        /// Room name (a fresh room id is generated when omitted)
        #[arg(long)]
        room: Option<String>,

        /// Enable end-to-end encryption
        #[arg(long)]
        e2ee: bool,
    },
}
