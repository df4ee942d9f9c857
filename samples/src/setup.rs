use std::time::Duration;

use tracing_subscriber::filter::EnvFilter;

use bqsample_auth::credential_store::FileCredentialStore;
use bqsample_auth::flow::ConsolePrompt;
use bqsample_auth::Config;
use bqsample_bigquery::client::{Client, ClientConfig};
use bqsample_bigquery::http::bigquery_client::SCOPES;
use bqsample_gax::cancel::CancellationToken;
use bqsample_gax::poll::PollSetting;

use crate::cli::GlobalArgs;

/// Logs to stderr, filtered by `RUST_LOG` (`warn` when unset).
/// `--apiLog` turns on the raw response bodies logged by the transport.
pub fn init_tracing(api_log: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if api_log {
        if let Ok(directive) = "bqsample_bigquery=info".parse() {
            filter = filter.add_directive(directive);
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds the authorized client once. Prompts for an authorization code when no stored
/// credential covers the BigQuery scope.
pub async fn create_client(global: &GlobalArgs) -> Result<Client, bqsample_auth::error::Error> {
    let credentials_file = match &global.credentials_file {
        Some(path) => path.clone(),
        None => FileCredentialStore::default_path()?,
    };
    let config = Config {
        scopes: &SCOPES,
        client_secrets_file: &global.client_secrets_file,
        credentials_file: &credentials_file,
    };
    let config = ClientConfig::new_with_auth(config, &ConsolePrompt)
        .await?
        .with_endpoint(global.alt_server.as_str())
        .with_debug(global.api_log);
    Ok(Client::new(config))
}

pub fn poll_setting(global: &GlobalArgs) -> PollSetting {
    let setting = PollSetting::default().with_interval(Duration::from_secs(global.poll_interval));
    match global.max_wait {
        Some(seconds) => setting.with_timeout(Duration::from_secs(seconds)),
        None => setting,
    }
}

/// Returns a token cancelled on Ctrl-C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            token.cancel();
        }
    });
    cancel
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::cli::parse_from;
    use crate::setup::poll_setting;

    #[test]
    fn test_poll_setting() {
        let invocation = parse_from(["bqsample", "lsp"]).unwrap();
        let setting = poll_setting(&invocation.global);
        assert_eq!(setting.interval, Duration::from_secs(5));
        assert!(setting.delay_first);
        assert_eq!(setting.timeout, None);

        let invocation = parse_from(["bqsample", "--pollInterval=2", "--maxWait=60", "lsp"]).unwrap();
        let setting = poll_setting(&invocation.global);
        assert_eq!(setting.interval, Duration::from_secs(2));
        assert_eq!(setting.timeout, Some(Duration::from_secs(60)));
    }
}
