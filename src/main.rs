//! BeatScope CLI entry point

use std::process::ExitCode;

use clap::Parser;

use beat_scope::cli::{
    app::{run_analyze, run_config, run_record, run_serve},
    args::{Cli, Commands},
};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            files,
            remote,
            json,
        } => run_analyze(files, remote, json).await,
        Commands::Record { remote, save, json } => run_record(remote, save, json).await,
        Commands::Serve { listen } => run_serve(listen).await,
        Commands::Config { action } => run_config(action).await,
    }
}
