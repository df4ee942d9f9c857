use std::io::{BufRead, Write};

use async_trait::async_trait;

use crate::client_secrets::ClientDetails;
use crate::credential_store::StoredCredential;
use crate::error::Error;
use crate::token_source::{default_http_client, request_token};

/// Redirect target that makes the authorization server display the code to the user.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Asks the user to visit the authorization page and returns the code they paste back.
#[async_trait]
pub trait CodePrompt: Send + Sync {
    async fn authorization_code(&self, authorization_url: &str) -> Result<String, Error>;
}

/// Prompts on stderr and reads the code from stdin.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

#[async_trait]
impl CodePrompt for ConsolePrompt {
    async fn authorization_code(&self, authorization_url: &str) -> Result<String, Error> {
        prompt_blocking(authorization_url, |url| {
            let stdin = std::io::stdin();
            let stderr = std::io::stderr();
            read_code(url, &mut stdin.lock(), &mut stderr.lock())
        })
        .await
    }
}

/// Runs a console interaction on the blocking pool so the runtime keeps driving other tasks.
async fn prompt_blocking<F>(authorization_url: &str, interact: F) -> Result<String, Error>
where
    F: FnOnce(&str) -> Result<String, Error> + Send + 'static,
{
    let url = authorization_url.to_string();
    tokio::task::spawn_blocking(move || interact(&url)).await?
}

fn read_code(authorization_url: &str, input: &mut dyn BufRead, output: &mut dyn Write) -> Result<String, Error> {
    writeln!(output, "Please open the following address in your browser:")?;
    writeln!(output, "  {authorization_url}")?;
    write!(output, "Please enter the authorization code: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let code = line.trim();
    if code.is_empty() {
        return Err(Error::EmptyAuthorizationCode);
    }
    Ok(code.to_string())
}

/// OAuth2 authorization code flow for installed applications.
#[derive(Debug)]
pub struct InstalledAppFlow {
    details: ClientDetails,
    scopes: Vec<String>,
    client: reqwest::Client,
}

#[derive(serde::Serialize)]
struct ExchangeBody<'a> {
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'a str,
}

impl InstalledAppFlow {
    pub fn new(details: ClientDetails, scopes: Vec<String>) -> Result<Self, Error> {
        Ok(Self {
            details,
            scopes,
            client: default_http_client()?,
        })
    }

    pub fn redirect_uri(&self) -> &str {
        self.details
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI)
    }

    pub fn authorization_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline",
            self.details.auth_uri(),
            urlencoding::encode(&self.details.client_id),
            urlencoding::encode(self.redirect_uri()),
            urlencoding::encode(&self.scopes.join(" ")),
        )
    }

    /// Runs the whole flow and returns the credential to persist.
    pub async fn authorize(&self, prompt: &dyn CodePrompt) -> Result<StoredCredential, Error> {
        let code = prompt.authorization_code(&self.authorization_url()).await?;
        self.exchange(&code).await
    }

    pub async fn exchange(&self, code: &str) -> Result<StoredCredential, Error> {
        let data = ExchangeBody {
            code,
            client_id: &self.details.client_id,
            client_secret: &self.details.client_secret,
            redirect_uri: self.redirect_uri(),
            grant_type: "authorization_code",
        };
        let it = request_token(&self.client, self.details.token_uri(), &data).await?;
        let token = it.to_token(time::OffsetDateTime::now_utc());
        tracing::debug!("authorization code exchanged : expiry={:?}", token.expiry);
        let scopes = match &it.scope {
            Some(granted) => granted.split_whitespace().map(str::to_string).collect(),
            None => self.scopes.clone(),
        };
        Ok(StoredCredential {
            access_token: token.access_token,
            refresh_token: it.refresh_token,
            expiry: token.expiry,
            scopes,
        })
    }
}
