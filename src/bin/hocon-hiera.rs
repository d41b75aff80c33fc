//! `hocon-hiera`: print the config a hiera root resolves to for a set of
//! facts.
//!
//! ```sh
//! hocon-hiera --root conf --fact hostname=web1 --fact env=prod
//! hocon-hiera --root conf --fact env=prod --json
//! ```

use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};

use hocon_keystore::cli::init_tracing;
use hocon_keystore::types::exit_code;
use hocon_keystore::{Hiera, HieraArgs, HoconError, RenderOptions};

fn main() -> ExitCode {
    init_tracing();

    let args = match HieraArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_code::SUCCESS,
                _ => exit_code::OPTIONS_ERROR,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match run(args) {
        Ok(text) => {
            print!("{text}");
            ExitCode::from(exit_code::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::from(exit_code::UNHANDLED_EXCEPTION)
        }
    }
}

fn run(args: HieraArgs) -> Result<String, HoconError> {
    let config = Hiera::new(&args.root).config_from_facts(args.facts)?;
    Ok(config.render(RenderOptions::for_output(args.json)))
}
