#![forbid(unsafe_code)]

use bb_client::shell::Shell;
use bb_client::{ApiClient, api_base_from_env, init_tracing};
use std::io;

fn main() -> io::Result<()> {
    init_tracing();
    let base = api_base_from_env();
    tracing::info!(api = %base, "starting board client");

    let stdin = io::stdin();
    let mut shell = Shell::new(ApiClient::new(&base), stdin.lock(), io::stdout());
    shell.run()
}
