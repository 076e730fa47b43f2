//! xenship - Xenoptics logistics shipment tracker
//!
//! Terminal front end for shipment requests, behind a signed-in session.
//!
//! # Examples
//!
//! ```bash
//! # Sign in with a password account
//! xenship login --username bob --password '...'
//!
//! # Sign in with a Microsoft work account
//! xenship login-microsoft
//!
//! # Second page of shipments, 20 per page
//! xenship shipments --page 2 --rows-per-page 20
//! ```

use ship_cli::{App, Cli};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let app = match App::start(&cli).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match app.run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            if e.is_transient() {
                eprintln!("This may be temporary; try the command again.");
            }
            ExitCode::FAILURE
        }
    }
}
