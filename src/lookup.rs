//! Word detail lookup, offline-first.
//!
//! A cached record is served without touching the network; `--refresh`
//! forces a fetch. Fetched records are cached locally and every lookup is
//! recorded as a recent search. When a fetch fails the cached copy is
//! served instead. Store failures are logged and never fail the lookup;
//! they only cost offline availability.

use anyhow::{bail, Result};
use tracing::warn;

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{RelationType, Word};
use crate::session;
use crate::store::UserDataStore;

pub async fn run_lookup(config: &Config, word: &str, offline: bool, refresh: bool) -> Result<()> {
    let store = UserDataStore::new(&config.db.path);

    if offline {
        let record = match store.cached_word(word).await {
            Ok(Some(record)) => record,
            Ok(None) => bail!("'{}' is not in the offline cache.", word),
            Err(e) => bail!("Offline cache unavailable: {}", e),
        };
        record_search(&store, word).await;
        print_word(&record);
        return Ok(());
    }

    if !refresh {
        match store.cached_word(word).await {
            Ok(Some(record)) => {
                record_search(&store, word).await;
                print_word(&record);
                return Ok(());
            }
            Ok(None) => {}
            Err(e) => warn!(%word, "offline cache unavailable: {e}"),
        }
    }

    let token = match session::load_session(&config.session_path()) {
        Ok(session) => session.map(|s| s.token),
        Err(e) => {
            warn!("ignoring unreadable session file: {e:#}");
            None
        }
    };
    let client = ApiClient::new(config, token)?;

    match client.all_relations(word).await {
        Ok(record) => {
            if let Err(e) = store.cache_word(&record).await {
                warn!(%word, "failed to cache word record: {e}");
            }
            record_search(&store, word).await;
            print_word(&record);
            Ok(())
        }
        Err(fetch_err) => {
            // Cache miss or store failure: surface the original fetch error,
            // the cache was only ever a fallback.
            match store.cached_word(word).await {
                Ok(Some(record)) => {
                    eprintln!("API request failed; showing cached copy.");
                    record_search(&store, word).await;
                    print_word(&record);
                    Ok(())
                }
                Ok(None) => Err(fetch_err),
                Err(store_err) => {
                    warn!(%word, "offline cache unavailable: {store_err}");
                    Err(fetch_err)
                }
            }
        }
    }
}

/// Show a single relation list for a word, straight from the API.
pub async fn run_relations(config: &Config, word: &str, kind: &str) -> Result<()> {
    let relation = match RelationType::parse(kind) {
        Some(relation) => relation,
        None => bail!(
            "Unknown relation kind: {}. Use synonyms, antonyms, broader, narrower, or related.",
            kind
        ),
    };

    let client = ApiClient::new(config, None)?;
    let terms = client.related_words(word, relation).await?;

    if terms.is_empty() {
        println!("No {} found for '{}'.", relation.label().to_lowercase(), word);
        return Ok(());
    }

    println!("{} of '{}':", relation.label(), word);
    for term in &terms {
        println!("  {}", term);
    }
    Ok(())
}

/// Show only a word's definitions.
pub async fn run_define(config: &Config, word: &str) -> Result<()> {
    let client = ApiClient::new(config, None)?;
    let definitions = client.definitions(word).await?;

    if definitions.is_empty() {
        println!("No definitions found for '{}'.", word);
        return Ok(());
    }

    for (i, definition) in definitions.iter().enumerate() {
        println!("{}. {}", i + 1, definition);
    }
    Ok(())
}

/// Show only a word's usage examples.
pub async fn run_examples(config: &Config, word: &str) -> Result<()> {
    let client = ApiClient::new(config, None)?;
    let examples = client.examples(word).await?;

    if examples.is_empty() {
        println!("No examples found for '{}'.", word);
        return Ok(());
    }

    for example in &examples {
        println!("- {}", example);
    }
    Ok(())
}

/// Append to recent searches; a failure here is never fatal.
async fn record_search(store: &UserDataStore, word: &str) {
    if let Err(e) = store.add_recent_search(word).await {
        warn!(%word, "failed to record recent search: {e}");
    }
}

fn print_word(record: &Word) {
    println!("{}", record.word);
    if !record.pos.is_empty() {
        println!("  ({})", record.pos.join(", "));
    }

    if !record.definitions.is_empty() {
        println!();
        for (i, definition) in record.definitions.iter().enumerate() {
            println!("  {}. {}", i + 1, definition);
        }
    }

    for relation in RelationType::all() {
        let terms = relation.terms_of(record);
        if !terms.is_empty() {
            println!();
            println!("  {}: {}", relation.label(), terms.join(", "));
        }
    }

    if !record.examples.is_empty() {
        println!();
        println!("  Examples:");
        for example in &record.examples {
            println!("    - {}", example);
        }
    }
}
