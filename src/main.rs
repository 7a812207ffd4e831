//! Nova Desk - A multi-window desktop with a live-preview web editor
//!
//! Run with `nova-desk` or `nova-desk --help` for usage.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nova_desk::{
    tui::App, AccountName, AccountStore, Config, DesktopSession, JsonAccountStore,
    APP_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "A multi-window terminal desktop with a live-preview web editor")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Account credentials; missing values are prompted for
#[derive(clap::Args, Default)]
struct Credentials {
    /// Account name
    #[arg(short, long)]
    user: Option<String>,

    /// Account password
    #[arg(short, long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and start the desktop (default)
    Tui {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Create an account seeded with the starter files
    Register {
        /// Account name
        name: String,

        /// Account password
        password: String,
    },

    /// List the saved files of an account
    Files {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Print the composed preview document of an account
    Compose {
        #[command(flatten)]
        credentials: Credentials,

        /// Wrap the document in a sandboxed iframe element
        #[arg(long)]
        iframe: bool,
    },

    /// Show configuration
    Config {
        /// Initialize config file with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(debug: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        // Use info level for our crate, warn for dependencies
        EnvFilter::new("info")
            .add_directive("tokio=warn".parse()?)
            .add_directive("figment=warn".parse()?)
    };

    if let Some(path) = log_file {
        // Log to file when running TUI (so logs don't interfere with display)
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

/// Read one line from stdin after a prompt
fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Resolve credentials, prompting for whatever was not given
fn resolve_credentials(credentials: Credentials) -> Result<(AccountName, String)> {
    let user = match credentials.user {
        Some(user) => user,
        None => prompt("Account")?,
    };
    let password = match credentials.password {
        Some(password) => password,
        None => prompt("Password")?,
    };

    Ok((AccountName::parse(&user)?, password))
}

fn sign_in(
    config: &Config,
    credentials: Credentials,
) -> Result<DesktopSession<JsonAccountStore>> {
    let (account, password) = resolve_credentials(credentials)?;
    let store = JsonAccountStore::open(config.store_file_path()?)?;
    Ok(DesktopSession::login(store, account, &password, config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load configuration
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let debug = cli.debug || config.debug;

    // Ensure required directories exist
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    match cli.command.unwrap_or(Commands::Tui {
        credentials: Credentials::default(),
    }) {
        Commands::Tui { credentials } => {
            // Sign in on the plain terminal before the desktop takes over
            let session = sign_in(&config, credentials)?;

            setup_logging(debug, Some(config.log_file_path()?))?;
            info!("Starting Nova Desk v{} for {}", VERSION, session.account());

            let mut app = App::new(config, session);
            let result = app.run().await;

            let session = app.into_session();
            let unsaved = session.workspace.is_dirty();
            session.logout();

            result?;
            if unsaved {
                println!("Signed out with unsaved changes discarded.");
            }
        }

        Commands::Register { name, password } => {
            setup_logging(debug, None)?;

            let account = AccountName::parse(&name)?;
            let mut store = JsonAccountStore::open(config.store_file_path()?)?;
            store.register(&account, &password)?;

            println!("Account '{}' created with the starter files.", account);
            println!("Sign in with: nova-desk tui -u {}", account);
        }

        Commands::Files { credentials } => {
            setup_logging(debug, None)?;

            let session = sign_in(&config, credentials)?;
            let files = session.workspace.files();

            println!("Files for {}:", session.account());
            println!();

            if files.is_empty() {
                println!("  (no files)");
            }
            for file in files {
                println!(
                    "  {:>2}  {:<24} {:>6} bytes  [{}]",
                    file.kind.marker(),
                    file.name,
                    file.content.len(),
                    file.id
                );
            }
        }

        Commands::Compose {
            credentials,
            iframe,
        } => {
            setup_logging(debug, None)?;

            let mut session = sign_in(&config, credentials)?;
            let document = session.preview();

            if iframe {
                println!("{}", document.iframe());
            } else {
                println!("{}", document.html);
            }
        }

        Commands::Config { init } => {
            setup_logging(debug, None)?;

            if init {
                config.save()?;
                println!(
                    "Configuration initialized at {:?}",
                    Config::config_file_path()?
                );
            } else {
                println!("Configuration:");
                println!("{}", toml::to_string_pretty(&config)?);
                println!("\nConfig file: {:?}", Config::config_file_path()?);
                println!("Data dir: {:?}", Config::data_dir()?);
                println!("Account store: {:?}", config.store_file_path()?);
            }
        }
    }

    Ok(())
}
