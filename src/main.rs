//! `hocon-keystore`: edit a key store and redact or reveal HOCON configs.
//!
//! ```sh
//! hocon-keystore --keystore secrets.jceks --password pw --create put db.password=hunter2
//! hocon-keystore --keystore secrets.jceks --password pw redact application.conf
//! hocon-keystore --keystore secrets.jceks --password pw --replace-config reveal application.conf
//! ```
//!
//! Exit codes: 0 on success, 3 for bad options or an unknown command, 4 for
//! a wrong number of arguments or any failure while running the command.

use std::error::Error;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};

use hocon_keystore::cli::init_tracing;
use hocon_keystore::types::{exit_code, exit_code_for};
use hocon_keystore::{HoconError, KeystoreArgs, KeystoreTool, ToolSettings};

fn main() -> ExitCode {
    init_tracing();

    let args = match KeystoreArgs::try_parse() {
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
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            report(&e);
            if e.is_usage_error() {
                let _ = KeystoreArgs::command().print_help();
            }
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn run(args: KeystoreArgs) -> Result<(), HoconError> {
    let request = args.into_request()?;
    let settings = ToolSettings::load()?;
    KeystoreTool::new(request.options, settings).handle_and_print(&request.action)
}

// ---------------------------------------------------------------------------
// Error reporting
// ---------------------------------------------------------------------------

fn report(err: &HoconError) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
