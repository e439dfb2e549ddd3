use calc_cli::{build_cli, logging, run, Invocation};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    let invocation = match Invocation::from_matches(&matches) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };

    logging::init(invocation.verbose, invocation.log_format);
    tracing::debug!(command = ?invocation.command, "starting");

    match run(&invocation).await {
        Ok(output) => {
            print!("{}", output.text);
            if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
