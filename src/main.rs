use clap::Parser;

mod cli;
mod config;
mod error;
mod executor;
mod filter;
mod library;
mod media;
mod pipeline;
mod runtime;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    runtime::run(cli)
}
