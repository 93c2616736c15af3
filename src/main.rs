/*
 * Responsibility
 * - start the tokio runtime
 * - call app::run() (no logic here)
 */
use anyhow::Result;

use yoga_booking_api::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
