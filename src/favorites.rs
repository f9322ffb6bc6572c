//! Favorites commands. Purely local: the favorite set lives in the
//! user-data store and never touches the network.

use anyhow::Result;

use crate::config::Config;
use crate::store::UserDataStore;

pub async fn run_fav_add(config: &Config, word: &str) -> Result<()> {
    let store = UserDataStore::new(&config.db.path);
    store.add_favorite(word).await?;
    println!("Added '{}' to favorites.", word);
    Ok(())
}

pub async fn run_fav_remove(config: &Config, word: &str) -> Result<()> {
    let store = UserDataStore::new(&config.db.path);
    store.remove_favorite(word).await?;
    println!("Removed '{}' from favorites.", word);
    Ok(())
}

pub async fn run_fav_check(config: &Config, word: &str) -> Result<()> {
    let store = UserDataStore::new(&config.db.path);
    if store.is_favorite(word).await? {
        println!("'{}' is a favorite.", word);
    } else {
        println!("'{}' is not a favorite.", word);
    }
    Ok(())
}

pub async fn run_fav_list(config: &Config) -> Result<()> {
    let store = UserDataStore::new(&config.db.path);
    let favorites = store.favorites().await?;

    if favorites.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }

    for word in &favorites {
        println!("{}", word);
    }
    Ok(())
}
