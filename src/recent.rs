//! Recent-search commands over the local user-data store.

use anyhow::Result;

use crate::config::Config;
use crate::store::UserDataStore;

pub async fn run_recent_list(config: &Config) -> Result<()> {
    let store = UserDataStore::new(&config.db.path);
    let recents = store.recent_searches().await?;

    if recents.is_empty() {
        println!("No recent searches.");
        return Ok(());
    }

    for word in &recents {
        println!("{}", word);
    }
    Ok(())
}

pub async fn run_recent_clear(config: &Config) -> Result<()> {
    let store = UserDataStore::new(&config.db.path);
    store.clear_recent_searches().await?;
    println!("Recent searches cleared.");
    Ok(())
}
