use std::ffi::OsString;

use clap::Parser;
use hf_core::HtmlFillError;

mod check;
mod cli_args;
mod error_map;
mod fill;
mod logging;

pub(crate) use cli_args::{CheckArgs, Cli, Command, FillArgs};
pub(crate) use error_map::{
    emit_error, json_string, map_cli_cases_scan, map_cli_input_read, map_cli_output_write,
};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    logging::init_tracing();
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, HtmlFillError> {
    match cli.command {
        Command::Fill(args) => fill::run_fill(args),
        Command::Check(args) => check::run_check(args),
    }
}
