//! # Vriksha CLI (`vriksha`)
//!
//! ## Usage
//!
//! ```bash
//! vriksha --config ./config/vriksha.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `vriksha init` | Create the SQLite database and seed the demo account |
//! | `vriksha serve` | Start the HTTP server |
//! | `vriksha chat "<message>"` | Ask the plant assistant once |
//! | `vriksha catalog` | List the plants on sale |
//! | `vriksha account <action>` | Sign in, sign up, sign out, or show the current user |
//!
//! `chat` and `catalog` run without a config file; every other command
//! needs one.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vriksha::assistant::Assistant;
use vriksha::auth::AuthService;
use vriksha::config::{self, Config};
use vriksha::providers::image::encode_file;
use vriksha::session_store::FileSessionStore;
use vriksha::sqlite_users::SqliteUserRepository;
use vriksha::{db, logging, migrate, server};
use vriksha_core::cart::format_price;
use vriksha_core::catalog;

/// Vriksha storefront: plant-care assistant, catalog, and demo accounts.
#[derive(Parser)]
#[command(name = "vriksha", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/vriksha.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema and seed the demo account.
    ///
    /// Idempotent; safe to run repeatedly.
    Init,

    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Ask the assistant a single question and print the reply.
    Chat {
        /// The question. May be empty when `--image` is given.
        #[arg(default_value = "")]
        message: String,

        /// Attach a plant photo (png, jpeg, gif, webp).
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List the plant catalog.
    Catalog,

    /// Manage the signed-in account.
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Sign in with e-mail and password.
    SignIn {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an e-mail account and sign in.
    SignUp {
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Forget the signed-in user.
    SignOut,
    /// Show the signed-in user.
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.command {
        Commands::Chat { .. } | Commands::Catalog => {
            config::load_config(&cli.config).unwrap_or_else(|_| Config::minimal())
        }
        _ => config::load_config(&cli.config)?,
    };
    logging::init(&cfg.logging)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Chat { message, image } => {
            run_chat(&cfg, &message, image).await?;
        }
        Commands::Catalog => {
            for p in catalog::products() {
                println!(
                    "{:>2}  {:<20} ${:>7}  {:<9} {}",
                    p.id,
                    p.name,
                    format_price(p.price),
                    p.care_level,
                    p.light_requirement
                );
            }
        }
        Commands::Account { action } => {
            run_account(&cfg, action).await?;
        }
    }

    Ok(())
}

async fn run_chat(cfg: &Config, message: &str, image: Option<PathBuf>) -> Result<()> {
    let image = image.as_deref().map(encode_file).transpose()?;
    if message.trim().is_empty() && image.is_none() {
        anyhow::bail!("provide a message or --image");
    }

    let assistant = Assistant::from_config(&cfg.assistant)?;
    let reply = assistant.resolve(message, image.as_deref()).await;

    println!("{}", reply.message);
    println!();
    println!("model: {}  status: {}", reply.model, reply.status().as_str());
    Ok(())
}

async fn run_account(cfg: &Config, action: AccountAction) -> Result<()> {
    let pool = db::connect(cfg).await?;
    migrate::migrate_pool(&pool).await?;
    let auth = AuthService::new(
        SqliteUserRepository::new(pool),
        FileSessionStore::new(&cfg.auth.session_path),
        &cfg.auth,
    );

    match action {
        AccountAction::SignIn { email, password } => {
            let user = auth.sign_in(&email, &password).await?;
            println!("Signed in as {} <{}>", user.name, user.email);
        }
        AccountAction::SignUp {
            email,
            password,
            name,
        } => {
            let user = auth.sign_up(&email, &password, &name).await?;
            println!("Created account {} <{}>", user.name, user.email);
        }
        AccountAction::SignOut => {
            auth.sign_out()?;
            println!("Signed out.");
        }
        AccountAction::Whoami => match auth.current_user()? {
            Some(user) => println!(
                "{} <{}> ({}, since {})",
                user.name,
                user.email,
                user.provider.as_str(),
                user.created_at.format("%Y-%m-%d")
            ),
            None => println!("Not signed in."),
        },
    }

    Ok(())
}
