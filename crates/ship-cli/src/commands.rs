use ship_client::DEFAULT_ROWS_PER_PAGE;

use std::convert::Infallible;

use clap::Subcommand;
use secrecy::SecretString;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with username and password
    Login {
        #[arg(long, short)]
        username: String,

        #[arg(long, short, value_parser = parse_secret)]
        password: SecretString,
    },

    /// Sign in with a Microsoft work account (device code)
    LoginMicrosoft,

    /// Sign out and forget the saved session
    Logout,

    /// Show which screen the current session resolves to
    Status,

    /// List shipment requests (requires sign-in)
    Shipments {
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page: 5, 10, 20 or 50
        #[arg(long, default_value_t = DEFAULT_ROWS_PER_PAGE)]
        rows_per_page: usize,

        /// Print the page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::from(value))
}
