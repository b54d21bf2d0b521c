use clap::{Parser, Subcommand};

pub mod list;
pub mod run;

#[derive(Parser)]
#[command(
    name = "hookfire",
    version,
    about = "Fire lifecycle-event hooks from a static configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fire an event, running every hook bound to it
    Run(run::RunArgs),
    /// List configured events and their hooks
    List(list::ListArgs),
}
