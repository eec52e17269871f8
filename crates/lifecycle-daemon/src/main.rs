//! Account lifecycle daemon entry point
//!
//! Run with:
//! ```bash
//! cargo run -p lifecycle-daemon
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

#[tokio::main]
async fn main() {
    if let Err(e) = lifecycle_daemon::run().await {
        eprintln!("Fatal: {e:#}");
        std::process::exit(1);
    }
}
