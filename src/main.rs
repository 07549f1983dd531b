use phantom_cli::launch::{FAILURE_EXIT_CODE, launch};
use phantom_cli::runtime::RealRuntime;
use std::ffi::OsString;
use std::process::exit;

/// phantom-cli - Phantom CLI launcher
///
/// Forwards every argument, unchanged, to the phantom binary installed by
/// `phantom-install install` and exits with its exit code. The launcher has no
/// flags of its own. Set PHANTOM_ROOT to use a package root other than ~/.phantom.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Skip argv[0], which is us
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let code = match launch(&RealRuntime, &args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            FAILURE_EXIT_CODE
        }
    };

    exit(code);
}
