//! Mission Control service entry point.
//!
//! Loads configuration, opens the database and starts the HTTP server.

use mission_control::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
