#![forbid(unsafe_code)]

use bb_server::{ServerConfig, init_tracing, start_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::load()?;
    start_server(config).await
}
