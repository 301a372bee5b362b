/*
 * Responsibility
 * - tokio runtime startup
 * - app::run() call only (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hello_jwt::app::run().await
}
