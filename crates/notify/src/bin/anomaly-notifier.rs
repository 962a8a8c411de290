//! anomaly-notifier — Lambda function forwarding Cost Anomaly Detection
//! alerts from SNS to a Slack incoming webhook.
//!
//! Without arguments it runs under the Lambda runtime. With `--event` it
//! replays one captured event document locally and prints the result.

use std::io::Read;

use clap::Parser;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing::info;

use cost_anomaly_notify::config::{env_opt, load_dotenv};
use cost_anomaly_notify::pipeline::handle;
use cost_anomaly_notify::InvocationStatus;

// ── CLI ─────────────────────────────────────────────────────────────

/// Cost anomaly notifier — SNS to Slack.
#[derive(Parser, Debug)]
#[command(name = "anomaly-notifier", version, about)]
struct Cli {
    /// Process a single event JSON file (`-` for stdin) instead of
    /// starting the Lambda runtime.
    #[arg(long)]
    event: Option<String>,
}

// ── Handler ─────────────────────────────────────────────────────────

async fn function_handler(event: LambdaEvent<Value>) -> Result<InvocationStatus, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "invocation started");
    Ok(handle(payload, env_opt).await?)
}

fn read_event(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&text)?)
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match cli.event {
        Some(source) => {
            load_dotenv();
            let payload = read_event(&source)?;
            let status = handle(payload, env_opt).await?;
            println!("{}", serde_json::to_string(&status)?);
        }
        None => {
            info!("anomaly-notifier starting under Lambda runtime");
            lambda_runtime::run(service_fn(function_handler))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}
