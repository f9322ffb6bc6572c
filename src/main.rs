//! # FreeSaurus CLI (`fsr`)
//!
//! Terminal client for the FreeSaurus thesaurus. Lookups are offline-first:
//! every fetched word record is cached in a local SQLite database, cached
//! records are served without touching the network, and `--refresh` forces
//! a fresh fetch. Recent searches and favorites are purely local.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fsr init` | Create the local database and run schema migrations |
//! | `fsr lookup <word>` | Full word detail (definitions, relations, examples) |
//! | `fsr search "<query>"` | Search the thesaurus |
//! | `fsr define <word>` | Definitions only |
//! | `fsr examples <word>` | Usage examples only |
//! | `fsr relations <word> <kind>` | One relation list (synonyms, antonyms, ...) |
//! | `fsr fav add/rm/check/list` | Manage the local favorites set |
//! | `fsr recent list/clear` | Inspect or clear recent searches |
//! | `fsr account login/register/logout/whoami` | Account management |
//!
//! ## Examples
//!
//! ```bash
//! # Look a word up (cached for offline use)
//! fsr lookup serendipity
//!
//! # Later, with no network
//! fsr lookup serendipity --offline
//!
//! # Search by prefix, nouns only
//! fsr search "luck" --pos noun
//!
//! # Favorites
//! fsr fav add serendipity
//! fsr fav list
//! ```

mod account;
mod api;
mod config;
mod favorites;
mod lookup;
mod models;
mod recent;
mod search;
mod session;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::store::UserDataStore;

/// FreeSaurus CLI, an offline-first thesaurus client.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; when the file is absent, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "fsr",
    about = "FreeSaurus — an offline-first thesaurus client",
    version,
    long_about = "FreeSaurus looks up words against the FreeSaurus HTTP API and keeps a local \
    SQLite store of cached word records, recent searches, and favorites, so lookups keep working \
    when the network does not."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/freesaurus.toml`. Missing file means defaults.
    #[arg(long, global = true, default_value = "./config/freesaurus.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the local database.
    ///
    /// Creates the SQLite file and the three user-data collections
    /// (word cache, recent searches, favorites). Idempotent.
    Init,

    /// Look up a word's full record: definitions, parts of speech, all five
    /// relation lists, and usage examples.
    ///
    /// The fetched record is cached locally and the search is recorded in
    /// recents. When the API is unreachable the cached copy is shown instead.
    Lookup {
        /// The word to look up.
        word: String,

        /// Serve from the local cache only; never touch the network.
        #[arg(long)]
        offline: bool,

        /// Bypass the local cache and fetch a fresh copy from the API.
        #[arg(long, conflicts_with = "offline")]
        refresh: bool,
    },

    /// Show only a word's definitions.
    Define {
        /// The word to define.
        word: String,
    },

    /// Show only a word's usage examples.
    Examples {
        /// The word to show examples for.
        word: String,
    },

    /// Show one relation list for a word.
    Relations {
        /// The word to query.
        word: String,

        /// Relation kind: synonyms, antonyms, broader, narrower, or related.
        kind: String,
    },

    /// Search the thesaurus.
    Search {
        /// The search query (prefix match unless --exact).
        query: String,

        /// Restrict hits to one part of speech (e.g. `noun`, `verb`).
        #[arg(long)]
        pos: Option<String>,

        /// Match the query as a whole word.
        #[arg(long)]
        exact: bool,

        /// Result offset for paging.
        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Maximum number of results to return.
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Manage the local favorites set.
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Inspect or clear recent searches.
    Recent {
        #[command(subcommand)]
        action: RecentAction,
    },

    /// Account management against the FreeSaurus backend.
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

/// Favorites subcommands.
#[derive(Subcommand)]
enum FavAction {
    /// Add a word to favorites. Idempotent.
    Add { word: String },
    /// Remove a word from favorites. Safe if it was never added.
    Rm { word: String },
    /// Check whether a word is favorited.
    Check { word: String },
    /// List all favorited words.
    List,
}

/// Recent-search subcommands.
#[derive(Subcommand)]
enum RecentAction {
    /// List recent searches, most recent first (at most 20).
    List,
    /// Delete all recent searches.
    Clear,
}

/// Account subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create an account and log in.
    Register {
        name: String,
        email: String,
        /// Password; prompted on stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in with an existing account.
    Login {
        email: String,
        /// Password; prompted on stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Discard the stored session.
    Logout,
    /// Show the logged-in account, if any.
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fsr=warn,freesaurus=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let store = UserDataStore::new(&cfg.db.path);
            store.init().await?;
            println!("Database initialized successfully.");
        }
        Commands::Lookup { word, offline, refresh } => {
            lookup::run_lookup(&cfg, &word, offline, refresh).await?;
        }
        Commands::Define { word } => {
            lookup::run_define(&cfg, &word).await?;
        }
        Commands::Examples { word } => {
            lookup::run_examples(&cfg, &word).await?;
        }
        Commands::Relations { word, kind } => {
            lookup::run_relations(&cfg, &word, &kind).await?;
        }
        Commands::Search {
            query,
            pos,
            exact,
            offset,
            limit,
        } => {
            search::run_search(&cfg, &query, pos, exact, offset, limit).await?;
        }
        Commands::Fav { action } => match action {
            FavAction::Add { word } => favorites::run_fav_add(&cfg, &word).await?,
            FavAction::Rm { word } => favorites::run_fav_remove(&cfg, &word).await?,
            FavAction::Check { word } => favorites::run_fav_check(&cfg, &word).await?,
            FavAction::List => favorites::run_fav_list(&cfg).await?,
        },
        Commands::Recent { action } => match action {
            RecentAction::List => recent::run_recent_list(&cfg).await?,
            RecentAction::Clear => recent::run_recent_clear(&cfg).await?,
        },
        Commands::Account { action } => match action {
            AccountAction::Register {
                name,
                email,
                password,
            } => account::run_register(&cfg, &name, &email, password).await?,
            AccountAction::Login { email, password } => {
                account::run_login(&cfg, &email, password).await?
            }
            AccountAction::Logout => account::run_logout(&cfg)?,
            AccountAction::Whoami => account::run_whoami(&cfg)?,
        },
    }

    Ok(())
}
