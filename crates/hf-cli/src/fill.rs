use std::fs;
use std::io::{self, Write};
use std::path::Path;

use hf_api::{fill_html_file, parse_errors_json, parse_values_json, FillOptions, ValueMapping};
use hf_core::HtmlFillError;

use crate::{map_cli_input_read, map_cli_output_write, FillArgs};

pub(crate) fn run_fill(args: FillArgs) -> Result<i32, HtmlFillError> {
    let defaults = match &args.defaults {
        Some(path) => parse_values_json(&read_input(path)?)?,
        None => ValueMapping::new(),
    };
    let errors = args
        .errors
        .as_deref()
        .map(|path| read_input(path).and_then(|raw| parse_errors_json(&raw)))
        .transpose()?;

    let options = FillOptions {
        defaults,
        errors,
        use_all_keys: args.strict,
        error_formatters: None,
        radio_uses_checked: args.radio_checked,
    }
    .with_builtin_formatters();
    let output = fill_html_file(options, Path::new(&args.template))?;

    match args.out {
        Some(out) => {
            write_output(Path::new(&out), &output)?;
            println!("RESULT:OK");
            println!("OUT:{}", out);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(map_cli_output_write)?;
        }
    }
    Ok(0)
}

fn read_input(path: &str) -> Result<String, HtmlFillError> {
    fs::read_to_string(path).map_err(map_cli_input_read)
}

fn write_output(path: &Path, output: &str) -> Result<(), HtmlFillError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(map_cli_output_write)?;
    }
    fs::write(path, output).map_err(map_cli_output_write)
}
