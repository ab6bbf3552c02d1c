use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client::api::HttpMailApi;
use client::config::ClientConfig;
use client::controller::Controller;
use client::render;
use client::storage::FileTokenStore;
use shared::models::EmailFilter;

#[derive(Parser)]
#[command(name = "ccl")]
#[command(about = "Terminal client for the CCL email service")]
#[command(
    long_about = "Log in to the CCL email service, browse and search synced email,\n\
    review the tasks extracted from this week's mail, and trigger a mailbox sync.\n\n\
    The session token is kept in a local file between runs."
)]
struct Cli {
    /// Base URL of the email service.
    ///
    /// Defaults to API_URL from the environment, then http://localhost:8000.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// File the session token is stored in.
    #[arg(long, value_name = "PATH")]
    token_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange a username and password for a session token
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// List emails, optionally filtered
    ///
    /// Dates are inclusive calendar days (YYYY-MM-DD) and are sent to the
    /// service as midnight UTC.
    Emails {
        /// Text to match against subject, sender and body.
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
        start_date: Option<NaiveDate>,

        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
        end_date: Option<NaiveDate>,
    },

    /// Show one email in full
    Show {
        /// Email id, as shown in brackets by `emails`.
        id: i64,
    },

    /// Show the tasks extracted from this week's email
    Tasks,

    /// Ask the service to pull new mail, then list the inbox
    Sync,

    /// Stay running: sync every 10 minutes and refresh tasks every hour
    ///
    /// Prints a status line on every change. Stop with Ctrl-C.
    Watch,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("{}: {}", raw, e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(token_file) = cli.token_file {
        config.token_file = token_file.into();
    }

    let api = Arc::new(HttpMailApi::new(config.api_url.clone()));
    let store = Arc::new(FileTokenStore::new(config.token_file.clone()));
    let mut controller =
        Controller::new(api, store, config.intervals()).context("Failed to load session")?;

    match cli.command {
        Commands::Login { username, password } => {
            if let Err(e) = controller.login(&username, &password).await {
                tracing::debug!("Login error: {}", e);
                let message = controller.state().read(|s| s.login_error.clone());
                bail!(message.unwrap_or_else(|| e.to_string()));
            }
            controller.deactivate();
            let state = controller.state().snapshot();
            println!("Logged in.");
            println!("{}", render::summary(&state));
        }
        Commands::Logout => {
            controller.logout()?;
            println!("Logged out.");
        }
        Commands::Emails {
            search,
            start_date,
            end_date,
        } => {
            require_session(&controller)?;
            controller.set_filter(EmailFilter {
                search_term: search,
                start_date,
                end_date,
            });
            // A failed fetch is rendered from state like any other.
            let _ = controller.orchestrator().fetch_emails().await;
            print!("{}", render::inbox(&controller.state().snapshot()));
        }
        Commands::Show { id } => {
            require_session(&controller)?;
            controller.orchestrator().fetch_emails().await?;
            if !controller.select_email(id) {
                bail!("No email with id {}", id);
            }
            let state = controller.state().snapshot();
            if let Some(email) = &state.emails.selected {
                print!("{}", render::email_detail(email));
            }
        }
        Commands::Tasks => {
            require_session(&controller)?;
            let _ = controller.orchestrator().fetch_tasks().await;
            print!("{}", render::task_panel(&controller.state().snapshot().tasks));
        }
        Commands::Sync => {
            require_session(&controller)?;
            let _ = controller.orchestrator().sync_emails().await;
            print!("{}", render::inbox(&controller.state().snapshot()));
        }
        Commands::Watch => {
            require_session(&controller)?;
            watch(&mut controller).await;
        }
    }

    Ok(())
}

fn require_session(controller: &Controller) -> anyhow::Result<()> {
    if !controller.state().snapshot().is_authenticated() {
        bail!("Not logged in. Run `ccl login` first.");
    }
    Ok(())
}

async fn watch(controller: &mut Controller) {
    let mut changes = controller.state().subscribe();
    controller.activate().await;

    let state = controller.state().snapshot();
    print!("{}", render::task_panel(&state.tasks));
    println!("{}", render::summary(&state));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = controller.state().snapshot();
                println!("{}", render::summary(&state));
            }
        }
    }

    controller.deactivate();
}
