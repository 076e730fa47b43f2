//! Wires configuration, collaborators and the session manager for one invocation.

use crate::logger::{self, LogSink};
use crate::output::{identity_json, page_json, print_json, render_table, route_json};
use crate::{Cli, CliError, CliResult, Commands};

use ship_client::{
    AccountCache, CredentialClient, DeviceCodePrompt, DeviceCodeProvider, Paginator, PromptFn,
    ROWS_PER_PAGE_OPTIONS, ShipmentClient,
};
use ship_config::Config;
use ship_session::route_guard::{self, Route};
use ship_session::{DomainAllowList, FileSessionStore, SessionManager};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use log::{debug, info, warn};
use serde_json::json;

/// Provider account cache, kept next to the session record.
pub const PROVIDER_ACCOUNT_FILE: &str = "provider_account.json";

pub struct App {
    manager: SessionManager,
    shipments: ShipmentClient,
    pretty: bool,
}

impl App {
    /// Load configuration, start logging, and restore the saved session.
    pub async fn start(cli: &Cli) -> CliResult<Self> {
        let config_dir = match &cli.config_dir {
            Some(dir) => dir.clone(),
            None => Config::config_dir()?,
        };

        let config = Config::load_from(&config_dir)?;
        config.validate()?;

        let log_file = config.logging.file.as_ref().map(|file| config_dir.join(file));
        logger::initialize(
            config.logging.level,
            LogSink::new(log_file, config.logging.colored),
        )?;

        debug!("xenship v{}", env!("CARGO_PKG_VERSION"));
        config.log_summary();

        let manager = build_session_manager(&config, &config_dir)?;
        let shipments = ShipmentClient::from_config(&config.api)?;

        let mut app = Self {
            manager,
            shipments,
            pretty: cli.pretty,
        };
        app.watch_session();
        app.manager.initialize().await;

        Ok(app)
    }

    pub async fn run(mut self, command: Commands) -> CliResult<()> {
        match command {
            Commands::Login { username, password } => {
                let identity = self.manager.login_with_password(&username, &password).await?;
                self.print_signed_in(&identity)
            }
            Commands::LoginMicrosoft => {
                let identity = self.manager.login_with_federated_provider().await?;
                self.print_signed_in(&identity)
            }
            Commands::Logout => {
                self.manager.logout().await;
                print_json(&json!({ "status": "signed_out" }), self.pretty)
            }
            Commands::Status => {
                let state = self.manager.state();
                print_json(&route_json(&route_guard::resolve(&state)), self.pretty)
            }
            Commands::Shipments {
                page,
                rows_per_page,
                json,
            } => self.show_shipments(page, rows_per_page, json).await,
        }
    }

    fn print_signed_in(&self, identity: &ship_session::Identity) -> CliResult<()> {
        print_json(
            &json!({ "status": "signed_in", "identity": identity_json(identity) }),
            self.pretty,
        )
    }

    async fn show_shipments(&self, page: usize, rows_per_page: usize, as_json: bool) -> CliResult<()> {
        let state = self.manager.state();
        let identity = match route_guard::resolve(&state) {
            Route::Content(identity) => identity,
            route => {
                print_json(&route_json(&route), self.pretty)?;
                eprintln!("Sign in first: xenship login --username <name> --password <password>");
                eprintln!("           or: xenship login-microsoft");
                return Err(CliError::NotSignedIn);
            }
        };

        let shipments = self.shipments.list_shipments(Some(&identity.credential)).await?;

        let mut paginator = Paginator::new(shipments.len());
        if !paginator.set_rows_per_page(rows_per_page) {
            return Err(CliError::InvalidArgument {
                message: format!(
                    "rows per page must be one of {ROWS_PER_PAGE_OPTIONS:?}, got {rows_per_page}"
                ),
            });
        }
        if page != 1 && !paginator.go_to(page) {
            warn!(
                "Page {page} is out of range (1..={}); showing page {}",
                paginator.total_pages(),
                paginator.current_page()
            );
        }

        if as_json {
            print_json(&page_json(&shipments, &paginator)?, self.pretty)
        } else {
            print!("{}", render_table(&shipments, &paginator));
            Ok(())
        }
    }

    /// Log every session transition until the manager is dropped.
    fn watch_session(&self) {
        let mut rx = self.manager.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                debug!(
                    "Session state -> {:?} (error: {})",
                    state.phase(),
                    state.error.as_deref().unwrap_or("none")
                );
            }
        });
    }
}

pub fn build_session_manager(config: &Config, config_dir: &Path) -> CliResult<SessionManager> {
    let session_dir = config.session_dir(config_dir);
    let timeout = Duration::from_secs(config.api.timeout_secs);

    let validator = Arc::new(CredentialClient::from_config(&config.auth, timeout)?);
    let provider = Arc::new(DeviceCodeProvider::new(
        &config.identity_provider,
        AccountCache::new(session_dir.join(PROVIDER_ACCOUNT_FILE)),
        timeout,
        terminal_prompt(),
    )?);
    let store = Arc::new(FileSessionStore::new(
        &session_dir,
        &config.session.storage_key,
    ));
    let allow_list = DomainAllowList::new(&config.identity_provider.allowed_domains);

    let mut manager = SessionManager::new(validator, provider, store, allow_list);
    let max_age_hours = config.session.password_session_max_age_hours;
    if let Some(max_age) = password_session_max_age(max_age_hours) {
        info!("Password sessions expire after {max_age_hours}h");
        manager = manager.with_password_session_max_age(max_age);
    }

    Ok(manager)
}

/// `None` for 0 (never expire) or an unrepresentable number of hours.
pub fn password_session_max_age(hours: u64) -> Option<TimeDelta> {
    if hours == 0 {
        return None;
    }
    TimeDelta::try_hours(i64::try_from(hours).ok()?)
}

fn terminal_prompt() -> PromptFn {
    Arc::new(|prompt: &DeviceCodePrompt| {
        eprintln!("{}", prompt.message);
        eprintln!("Waiting for sign-in (code expires in {}s)...", prompt.expires_in.as_secs());
    })
}
