use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Smoke-test client for the CORS proxy", long_about = None)]
struct Cli {
    /// Base URL of a running proxy.
    #[arg(short, long, default_value = "http://127.0.0.1:7861")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the liveness endpoint
    Health,
    /// Forward an envelope through the proxy
    Send {
        /// Upstream URL the proxy should POST to
        #[arg(short, long, default_value = "https://httpbin.org/post")]
        target: String,

        /// JSON payload (any shape)
        #[arg(short, long, default_value = r#"{"hello":"world"}"#)]
        data: String,

        /// Extra upstream header as Name:Value (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected Name:Value, got '{raw}'"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{base}/health")).send().await?;
            print_response(res).await?;
        }
        Commands::Send {
            target,
            data,
            headers,
        } => {
            let data: Value = serde_json::from_str(&data)?;
            let headers: BTreeMap<String, String> = headers.into_iter().collect();
            let envelope = json!({
                "url": target,
                "data": data,
                "headers": headers,
            });

            let res = client
                .post(format!("{base}/proxy"))
                .json(&envelope)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Authorization: Bearer x").unwrap(),
            ("Authorization".to_string(), "Bearer x".to_string())
        );
        assert!(parse_header("no-colon").is_err());
    }
}
