use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT,
};
use reqwest::{Client, Url};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod ramp;
mod report;

use ramp::Ramp;
use report::{Outcome, Summary};

/// Ramp authenticated GET requests against the greeting endpoint and check the success rate.
///
/// - The request rate grows linearly from `--start-rate` to `--end-rate` over `--duration`
/// - Every request carries `Authorization: Bearer <TOKEN>`
/// - Exits non-zero unless the share of 2xx responses is above `--min-success-percent`
#[derive(Parser)]
#[command(name = "hello-load", version, about)]
struct Args {
    /// Base URL of the service (e.g. http://localhost:8080)
    #[arg(long, env = "URL")]
    url: String,

    /// Access token sent as the bearer credential
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: String,

    /// Request path appended to the base URL
    #[arg(long, default_value = "/hello")]
    path: String,

    /// Requests per second at the beginning of the run
    #[arg(long, default_value_t = 10)]
    start_rate: u32,

    /// Requests per second at the end of the run
    #[arg(long, default_value_t = 200)]
    end_rate: u32,

    /// Run length in seconds
    #[arg(long, default_value_t = 120)]
    duration: u32,

    /// Required share of successful requests, in percent (strictly greater than)
    #[arg(long, default_value_t = 90.0)]
    min_success_percent: f64,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let ramp = Ramp::new(args.start_rate, args.end_rate, args.duration)?;
    let target = target_url(&args.url, &args.path)?;
    let client = build_client(&args.token, Duration::from_millis(args.timeout_ms))?;

    tracing::info!(
        %target,
        start_rate = args.start_rate,
        end_rate = args.end_rate,
        duration_secs = ramp.duration_secs(),
        planned = ramp.total_requests(),
        "starting load run"
    );

    let summary = run(&client, &target, ramp).await?;

    println!("{summary}");

    if !summary.passes(args.min_success_percent) {
        bail!(
            "success rate {:.2}% is not above the required {:.2}%",
            summary.success_percent(),
            args.min_success_percent
        );
    }
    Ok(())
}

fn target_url(base: &str, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).with_context(|| format!("invalid target url: {joined}"))
}

/// Client with the bearer credential and browser-like headers set on every request.
fn build_client(token: &str, timeout: Duration) -> Result<Client> {
    let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
        .context("token is not a valid header value")?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:109.0) Gecko/20100101 Firefox/119.0",
        ),
    );

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}

async fn run(client: &Client, target: &Url, ramp: Ramp) -> Result<Summary> {
    let mut tasks = JoinSet::new();
    let begin = Instant::now();

    // Requests of one second are spread evenly across it
    for (second, rate) in ramp.rates().enumerate() {
        let second_start = begin + Duration::from_secs(second as u64);
        tracing::debug!(second, rate, in_flight = tasks.len(), "ramp step");

        for i in 0..rate {
            tokio::time::sleep_until(second_start + Duration::from_secs(1) * i / rate).await;

            let client = client.clone();
            let target = target.clone();
            tasks.spawn(async move { send(&client, target).await });
        }
    }

    let mut summary = Summary::default();
    while let Some(joined) = tasks.join_next().await {
        let (outcome, latency) = joined.context("request task panicked")?;
        summary.record(outcome, latency);
    }

    tracing::info!(
        sent = summary.sent(),
        elapsed_ms = begin.elapsed().as_millis() as u64,
        "load run finished"
    );
    Ok(summary)
}

async fn send(client: &Client, target: Url) -> (Outcome, Duration) {
    let started = Instant::now();

    let outcome = match client.get(target).send().await {
        Ok(response) => {
            let status = response.status();
            // Read the body so latency covers the full response
            match response.bytes().await {
                Ok(_) if status.is_success() => Outcome::Success,
                Ok(_) => Outcome::HttpFailure(status.as_u16()),
                Err(err) => {
                    tracing::debug!(error = %err, "failed to read response body");
                    Outcome::TransportError
                }
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "request failed");
            Outcome::TransportError
        }
    };

    (outcome, started.elapsed())
}
