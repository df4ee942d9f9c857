use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};

use bqsample_bigquery::client::DEFAULT_ENDPOINT;

use crate::error::Error;
use crate::validate;

#[derive(Parser, Debug)]
#[command(
    name = "bqsample",
    version,
    about = "Demonstrates BigQuery API calls from the command line",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags shared by every command. They may appear before or after the command name.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Where the OAuth2 credential is kept between runs [default: ~/.bqsample.token]
    #[arg(long = "credentialsFile", env = "BQSAMPLE_CREDENTIALS_FILE", global = true)]
    pub credentials_file: Option<PathBuf>,

    /// Client id and secret downloaded from the API console
    #[arg(
        long = "clientSecretsFile",
        env = "BQSAMPLE_CLIENT_SECRETS_FILE",
        default_value = "client_secrets.json",
        global = true
    )]
    pub client_secrets_file: PathBuf,

    /// Alternate API endpoint
    #[arg(long = "altServer", env = "BQSAMPLE_ALT_SERVER", default_value = DEFAULT_ENDPOINT, global = true)]
    pub alt_server: String,

    /// Seconds between two job status checks
    #[arg(long = "pollInterval", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..), global = true)]
    pub poll_interval: u64,

    /// Give up waiting on a job after this many seconds
    #[arg(long = "maxWait", global = true)]
    pub max_wait: Option<u64>,

    /// Log raw API responses
    #[arg(long = "apiLog", global = true)]
    pub api_log: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List projects
    Lsp,
    /// List datasets
    Lsd(ListDatasetsArgs),
    /// List tables
    Lst(ListTablesArgs),
    /// Create a new table and populate it with data from a CSV file on Google Storage
    Load(LoadArgs),
    /// Queries a table (async)
    Query(QueryArgs),
    /// Queries a table (sync)
    Squery(QueryArgs),
    /// Print the schema and the first rows of a table
    Head(HeadArgs),
    /// Wait for an existing job to finish
    Wait(WaitArgs),
    /// Print usage
    Help,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListDatasetsArgs {
    #[arg(long = "projectId")]
    pub project_id: String,

    #[arg(long = "maxResults", default_value_t = 2)]
    pub max_results: i64,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListTablesArgs {
    #[arg(long = "projectId")]
    pub project_id: String,

    #[arg(long = "datasetId")]
    pub dataset_id: String,

    #[arg(long = "maxResults", default_value_t = 2)]
    pub max_results: i64,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LoadArgs {
    #[arg(long = "projectId")]
    pub project_id: String,

    #[arg(long = "datasetId")]
    pub dataset_id: String,

    #[arg(long = "tableId")]
    pub table_id: String,

    #[arg(long = "csvFile", value_parser = validate::gcs_uri)]
    pub csv_file: String,

    /// JSON array of field definitions
    #[arg(long = "schemaFile", value_parser = validate::existing_file)]
    pub schema_file: PathBuf,

    #[arg(long = "skipLeadingRows", value_parser = validate::positive_integer)]
    pub skip_leading_rows: Option<i64>,

    #[arg(long = "maxBadRecords", default_value = "100", value_parser = validate::positive_integer)]
    pub max_bad_records: i64,

    /// 'UTF-8' or 'ISO-8859-1'
    #[arg(long = "encoding", value_parser = validate::encoding)]
    pub encoding: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct QueryArgs {
    #[arg(long = "projectId")]
    pub project_id: String,

    #[arg(long = "datasetId")]
    pub dataset_id: String,

    #[arg(long = "query")]
    pub query: String,

    /// Rows per page
    #[arg(long = "maxResults", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_results: u32,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HeadArgs {
    #[arg(long = "projectId")]
    pub project_id: String,

    #[arg(long = "datasetId")]
    pub dataset_id: String,

    #[arg(long = "tableId")]
    pub table_id: String,

    #[arg(long = "maxRows", default_value_t = 100)]
    pub max_rows: u64,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WaitArgs {
    #[arg(long = "projectId")]
    pub project_id: String,

    #[arg(long = "jobId")]
    pub job_id: String,

    #[arg(long = "location")]
    pub location: Option<String>,

    /// Give up after this many seconds
    #[arg(long = "seconds")]
    pub seconds: Option<u64>,
}

/// A parsed command line with exactly one command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub global: GlobalArgs,
    pub command: Command,
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Parses the command line. A missing command and `help` are reported as [`Error::Usage`]
/// so that the caller prints the usage and exits before authorizing.
pub fn parse_from<I, T>(args: I) -> Result<Invocation, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Error::HelpDisplayed(e.render().to_string()),
        _ => Error::Usage(e.render().to_string()),
    })?;
    match cli.command {
        None | Some(Command::Help) => Err(Error::Usage(usage())),
        Some(command) => Ok(Invocation {
            global: cli.global,
            command,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use clap::CommandFactory;

    use crate::cli::{parse_from, Cli, Command, ListDatasetsArgs, QueryArgs};
    use crate::error::Error;

    #[test]
    fn test_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unrecognized_command() {
        let err = parse_from(["bqsample", "frobnicate"]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_no_command() {
        let err = parse_from(["bqsample"]).unwrap_err();
        match &err {
            Error::Usage(text) => assert!(text.contains("squery")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_help_command() {
        let err = parse_from(["bqsample", "help"]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_help_flag() {
        let err = parse_from(["bqsample", "--help"]).unwrap_err();
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_missing_required_flag() {
        let err = parse_from(["bqsample", "lst", "--projectId=p"]).unwrap_err();
        match err {
            Error::Usage(text) => assert!(text.contains("--datasetId")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let invocation = parse_from(["bqsample", "lsd", "--projectId=my-project"]).unwrap();
        assert_eq!(
            invocation.command,
            Command::Lsd(ListDatasetsArgs {
                project_id: "my-project".to_string(),
                max_results: 2,
            })
        );
        assert_eq!(invocation.global.poll_interval, 5);
        assert_eq!(invocation.global.max_wait, None);
        assert_eq!(invocation.global.client_secrets_file, PathBuf::from("client_secrets.json"));
    }

    #[test]
    fn test_global_flags_after_command() {
        let invocation = parse_from([
            "bqsample",
            "squery",
            "--projectId",
            "my-project",
            "--datasetId",
            "samples",
            "--query",
            "SELECT 1",
            "--pollInterval=1",
            "--maxWait=30",
            "--apiLog",
        ])
        .unwrap();
        assert_eq!(
            invocation.command,
            Command::Squery(QueryArgs {
                project_id: "my-project".to_string(),
                dataset_id: "samples".to_string(),
                query: "SELECT 1".to_string(),
                max_results: 10,
            })
        );
        assert_eq!(invocation.global.poll_interval, 1);
        assert_eq!(invocation.global.max_wait, Some(30));
        assert!(invocation.global.api_log);
    }

    #[test]
    fn test_load_validation() {
        let mut schema = tempfile::NamedTempFile::new().unwrap();
        writeln!(schema, r#"[{{"name": "word", "type": "STRING"}}]"#).unwrap();
        let schema_path = schema.path().to_str().unwrap().to_string();

        let base = ["bqsample", "load", "--projectId=p", "--datasetId=d", "--tableId=t"];
        let ok = parse_from(
            base.iter()
                .map(|s| s.to_string())
                .chain(["--csvFile=gs://bucket/words.csv".to_string(), format!("--schemaFile={schema_path}")]),
        )
        .unwrap();
        match ok.command {
            Command::Load(args) => {
                assert_eq!(args.max_bad_records, 100);
                assert_eq!(args.skip_leading_rows, None);
            }
            other => panic!("unexpected {:?}", other),
        }

        let not_gcs = parse_from(
            base.iter()
                .map(|s| s.to_string())
                .chain(["--csvFile=/tmp/words.csv".to_string(), format!("--schemaFile={schema_path}")]),
        )
        .unwrap_err();
        match not_gcs {
            Error::Usage(text) => assert!(text.contains("gs://")),
            other => panic!("unexpected {:?}", other),
        }

        let no_schema = parse_from(base.iter().map(|s| s.to_string()).chain([
            "--csvFile=gs://bucket/words.csv".to_string(),
            "--schemaFile=/definitely/not/here.json".to_string(),
        ]))
        .unwrap_err();
        assert!(matches!(no_schema, Error::Usage(_)));

        let negative = parse_from(base.iter().map(|s| s.to_string()).chain([
            "--csvFile=gs://bucket/words.csv".to_string(),
            format!("--schemaFile={schema_path}"),
            "--maxBadRecords=-1".to_string(),
        ]))
        .unwrap_err();
        assert_eq!(negative.exit_code(), 1);
    }
}
