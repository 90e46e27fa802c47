use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "htmlfill")]
#[command(about = "Fill HTML form templates with defaults and error messages")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    Fill(FillArgs),
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub(crate) struct FillArgs {
    #[arg(long = "template")]
    pub(crate) template: String,
    #[arg(long = "defaults")]
    pub(crate) defaults: Option<String>,
    #[arg(long = "errors")]
    pub(crate) errors: Option<String>,
    #[arg(long = "strict")]
    pub(crate) strict: bool,
    #[arg(long = "radio-checked")]
    pub(crate) radio_checked: bool,
    #[arg(long = "out")]
    pub(crate) out: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(long = "cases-dir")]
    pub(crate) cases_dir: String,
}
