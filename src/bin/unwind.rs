/// Unwind CLI
///
/// Inspects the resolved configuration and probes the frame ledger and
/// backtrace rendering without a full language runtime.

use unwind_core::cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
