use std::path::Path;

use bqsample_auth::credential_store::{FileCredentialStore, StoredCredential};
use bqsample_auth::flow::CodePrompt;
use bqsample_auth::token_source::TokenSource;
use bqsample_auth::*;

const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/bigquery"];

#[ctor::ctor]
fn init() {
    let _ = tracing_subscriber::fmt::try_init();
}

struct UnreachablePrompt;

#[async_trait::async_trait]
impl CodePrompt for UnreachablePrompt {
    async fn authorization_code(&self, authorization_url: &str) -> Result<String, error::Error> {
        panic!("unexpected authorization prompt for {authorization_url}")
    }
}

fn write_secrets(dir: &Path, client_id: &str) -> std::path::PathBuf {
    let path = dir.join("client_secrets.json");
    let json = format!(r#"{{"installed": {{"client_id": "{client_id}", "client_secret": "secret"}}}}"#);
    std::fs::write(&path, json).unwrap();
    path
}

#[tokio::test]
async fn test_create_token_source_from_store() -> Result<(), error::Error> {
    let dir = tempfile::tempdir()?;
    let secrets = write_secrets(dir.path(), "1234.apps.googleusercontent.com");
    let credentials = dir.path().join("token.json");
    FileCredentialStore::new(credentials.clone())
        .save(&StoredCredential {
            access_token: "stored-access".to_string(),
            refresh_token: Some("stored-refresh".to_string()),
            expiry: Some(time::OffsetDateTime::now_utc() + time::Duration::hours(1)),
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
        })
        .await?;

    let config = Config {
        scopes: &SCOPES,
        client_secrets_file: &secrets,
        credentials_file: &credentials,
    };
    let ts = create_token_source(config, &UnreachablePrompt).await?;
    let token = ts.token().await?;
    assert_eq!("Bearer stored-access", token.value());
    Ok(())
}

#[tokio::test]
async fn test_create_token_source_with_placeholder_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let secrets = write_secrets(dir.path(), "Enter Client ID");
    let credentials = dir.path().join("token.json");
    let config = Config {
        scopes: &SCOPES,
        client_secrets_file: &secrets,
        credentials_file: &credentials,
    };
    let result = create_token_source(config, &UnreachablePrompt).await;
    assert!(matches!(result, Err(error::Error::PlaceholderClientSecrets(_))));
}
