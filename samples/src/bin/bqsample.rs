use std::io::Write;
use std::process::ExitCode;

use bqsample_cli::cli;
use bqsample_cli::commands::{dispatch, Session};
use bqsample_cli::error::Error;
use bqsample_cli::setup;

#[tokio::main]
async fn main() -> ExitCode {
    let invocation = match cli::parse_from(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(Error::HelpDisplayed(text)) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprint!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };
    setup::init_tracing(invocation.global.api_log);

    let client = match setup::create_client(&invocation.global).await {
        Ok(client) => client,
        Err(e) => {
            let e = Error::from(e);
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };
    let session = Session::new(&client, setup::poll_setting(&invocation.global)).with_cancel(setup::cancel_on_ctrl_c());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = dispatch(&session, &invocation.command, &mut out).await;
    let _ = out.flush();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
