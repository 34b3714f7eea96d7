#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod export;
mod info;
mod prelude;
mod tumblr;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Export every post of a Tumblr blog into a Ghost import file"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(
        long,
        env = "TUMBLR2GHOST_VERBOSE",
        global = true,
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Fetch all posts and write a Ghost import JSON document
    Export(crate::export::ExportOptions),

    /// Show the blog metadata reported by the Tumblr API
    Info(crate::info::InfoOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Export(options) => crate::export::run(options, app.global).await,
        SubCommands::Info(options) => crate::info::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
