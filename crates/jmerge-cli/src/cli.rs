use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ChangeFormat;

#[derive(Parser)]
#[command(
    name = "jmerge",
    about = "Merge JSON documents under a conflict policy and report every change",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with output defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge SRC into DST and write the result
    Merge(MergeArgs),
    /// Merge SRC into DST and print only the change log
    Changes(ChangesArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// Destination document (`-` for stdin)
    pub dst: String,
    /// Source document (`-` for stdin)
    pub src: String,
    /// Write the merged document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub pretty: bool,
    /// How to report the change log on stderr
    #[arg(long)]
    pub changes: Option<ChangeFormat>,
}

#[derive(Args)]
pub struct ChangesArgs {
    pub dst: String,
    pub src: String,
    #[arg(long)]
    pub format: Option<ChangeFormat>,
}
