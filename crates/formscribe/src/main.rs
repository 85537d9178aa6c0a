use crate::prelude::*;
use clap::Parser;

mod error;
mod input;
mod mcp;
mod mindmap;
mod pdf;
mod prelude;
mod render;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn PDF questionnaires and mindmap outlines into form definitions"
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
    #[clap(long, env = "FORMSCRIBE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Largest input accepted, in bytes.
    #[clap(
        long,
        env = "FORMSCRIBE_MAX_BYTES",
        global = true,
        default_value_t = input::DEFAULT_MAX_BYTES
    )]
    max_bytes: u64,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Extract questions from a PDF (or a form-feed separated text dump)
    PDF(crate::pdf::App),

    /// Build a form from indented mindmap notation
    Mindmap(crate::mindmap::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::PDF(sub_app) => crate::pdf::run(sub_app, app.global).await,
        SubCommands::Mindmap(sub_app) => crate::mindmap::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
