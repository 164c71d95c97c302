//! Command line access to a configured search engine.
//!
//! Connection settings come from the environment (and `.env`), exactly as
//! for `create_search_client`.

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info};

use search_client::{
    create_search_client_with_options, ClientError, ClientOptions, SearchEngineClient,
};

#[derive(Parser)]
#[command(name = "search-client")]
#[command(about = "Query Elasticsearch or OpenSearch using environment configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine kind (elasticsearch|opensearch)
    #[arg(long, default_value = "opensearch", global = true)]
    engine: String,

    /// Warn when TLS certificate verification is disabled
    #[arg(long, global = true)]
    warn_insecure: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print cluster information
    Info,
    /// Check cluster health
    Health,
    /// Send a request through the generic REST client
    Request {
        /// HTTP method
        method: String,
        /// Path relative to the cluster base URL
        path: String,
        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// JSON request body
        #[arg(long, value_parser = parse_json)]
        body: Option<Value>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON body: {}", e))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let options = if cli.warn_insecure {
        ClientOptions::warn_insecure()
    } else {
        ClientOptions::default()
    };
    let client = create_search_client_with_options(&cli.engine, options)?;

    let output = match cli.command {
        Commands::Info => client.client().info().await?,
        Commands::Health => {
            let healthy = client.client().health_check().await?;
            info!(engine = %client.engine(), healthy, "Health check complete");
            Value::Bool(healthy)
        }
        Commands::Request {
            method,
            path,
            params,
            body,
        } => {
            let params = (!params.is_empty()).then_some(params.as_slice());
            client
                .rest()?
                .request(&method, &path, params, body.as_ref())
                .await?
                .into_json()
        }
    };

    match output {
        Value::String(text) => println!("{}", text),
        other => println!(
            "{}",
            serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string())
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("refresh=true"),
            Ok(("refresh".to_string(), "true".to_string()))
        );
        assert_eq!(
            parse_param("q=a=b"),
            Ok(("q".to_string(), "a=b".to_string()))
        );
        assert!(parse_param("refresh").is_err());
    }

    #[test]
    fn test_parse_request_command() {
        let cli = Cli::try_parse_from([
            "search-client",
            "--engine",
            "elasticsearch",
            "request",
            "get",
            "/_cat/indices",
            "--param",
            "format=json",
            "--body",
            r#"{"size": 1}"#,
        ])
        .unwrap();

        assert_eq!(cli.engine, "elasticsearch");
        match cli.command {
            Commands::Request {
                method,
                path,
                params,
                body,
            } => {
                assert_eq!(method, "get");
                assert_eq!(path, "/_cat/indices");
                assert_eq!(params, vec![("format".to_string(), "json".to_string())]);
                assert_eq!(body, Some(serde_json::json!({"size": 1})));
            }
            _ => panic!("expected request command"),
        }
    }

    #[test]
    fn test_invalid_body_rejected() {
        assert!(Cli::try_parse_from(["search-client", "request", "post", "/x", "--body", "{"])
            .is_err());
    }
}
