use std::io::Write;

use clap::Parser;

use bqsample_cli::cli::GlobalArgs;
use bqsample_cli::commands::{getting_started, Session};
use bqsample_cli::setup;

const DEFAULT_QUERY: &str = "SELECT TOP(word, 50), COUNT(*) FROM publicdata:samples.shakespeare";

/// Lists the public datasets, runs a query job and prints its rows.
#[derive(Parser, Debug)]
#[command(name = "bqsample-getting-started", version)]
struct Args {
    #[command(flatten)]
    global: GlobalArgs,

    /// Project billed for the query job
    #[arg(long = "projectId", env = "BQSAMPLE_PROJECT_ID")]
    project_id: String,

    #[arg(long = "query", default_value = DEFAULT_QUERY)]
    query: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup::init_tracing(args.global.api_log);

    let client = setup::create_client(&args.global).await?;
    let session = Session::new(&client, setup::poll_setting(&args.global)).with_cancel(setup::cancel_on_ctrl_c());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    getting_started(&session, &args.project_id, &args.query, &mut out).await?;
    out.flush()?;
    Ok(())
}
