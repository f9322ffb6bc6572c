//! Integration tests for the local user-data store.
//!
//! Each test constructs its own store against a temp directory, so tests are
//! fully isolated and can run in parallel.

use tempfile::TempDir;

use freesaurus::models::Word;
use freesaurus::store::{StorageError, UserDataStore, RECENT_SEARCHES_CAP, SCHEMA_VERSION};

fn temp_store() -> (TempDir, UserDataStore) {
    let tmp = TempDir::new().unwrap();
    let store = UserDataStore::new(tmp.path().join("user-data.sqlite"));
    (tmp, store)
}

fn sample_word(text: &str) -> Word {
    Word {
        id: format!("id-{text}"),
        word: text.to_string(),
        definitions: vec![format!("definition of {text}")],
        pos: vec!["noun".to_string()],
        synonyms: vec!["kin".to_string()],
        antonyms: vec![],
        broader_terms: vec![],
        narrower_terms: vec![],
        related_terms: vec![],
        examples: vec![format!("an example using {text}")],
    }
}

// -- word cache --------------------------------------------------------------

#[tokio::test]
async fn cached_word_round_trips() {
    let (_tmp, store) = temp_store();
    let word = sample_word("serendipity");
    store.cache_word(&word).await.unwrap();

    let cached = store.cached_word("serendipity").await.unwrap().unwrap();
    assert_eq!(cached, word);
}

#[tokio::test]
async fn cache_miss_is_none_not_error() {
    let (_tmp, store) = temp_store();
    assert!(store.cached_word("nonexistent").await.unwrap().is_none());
}

#[tokio::test]
async fn caching_twice_keeps_only_the_second_payload() {
    let (_tmp, store) = temp_store();

    let mut first = sample_word("happy");
    first.definitions = vec!["payload one".to_string()];
    store.cache_word(&first).await.unwrap();

    let mut second = sample_word("happy");
    second.definitions = vec!["payload two".to_string()];
    store.cache_word(&second).await.unwrap();

    let cached = store.cached_word("happy").await.unwrap().unwrap();
    assert_eq!(cached.definitions, vec!["payload two".to_string()]);
}

#[tokio::test]
async fn word_keys_are_case_sensitive() {
    let (_tmp, store) = temp_store();
    store.cache_word(&sample_word("Polish")).await.unwrap();

    assert!(store.cached_word("Polish").await.unwrap().is_some());
    assert!(store.cached_word("polish").await.unwrap().is_none());
}

#[tokio::test]
async fn empty_word_text_is_rejected() {
    let (_tmp, store) = temp_store();
    let mut word = sample_word("x");
    word.word = String::new();

    let err = store.cache_word(&word).await.unwrap_err();
    assert!(matches!(err, StorageError::EmptyKey));
}

// -- favorites ---------------------------------------------------------------

#[tokio::test]
async fn favorite_add_is_idempotent() {
    let (_tmp, store) = temp_store();

    store.add_favorite("joy").await.unwrap();
    assert!(store.is_favorite("joy").await.unwrap());

    store.add_favorite("joy").await.unwrap();
    assert!(store.is_favorite("joy").await.unwrap());
    assert_eq!(store.favorites().await.unwrap(), vec!["joy".to_string()]);
}

#[tokio::test]
async fn removing_an_absent_favorite_is_ok() {
    let (_tmp, store) = temp_store();
    store.remove_favorite("never-added").await.unwrap();
    assert!(!store.is_favorite("never-added").await.unwrap());
}

#[tokio::test]
async fn favorites_lists_all_members() {
    let (_tmp, store) = temp_store();
    for word in ["alpha", "beta", "gamma"] {
        store.add_favorite(word).await.unwrap();
    }
    store.remove_favorite("beta").await.unwrap();

    let mut favorites = store.favorites().await.unwrap();
    favorites.sort();
    assert_eq!(favorites, vec!["alpha".to_string(), "gamma".to_string()]);
}

// -- recent searches ---------------------------------------------------------

#[tokio::test]
async fn recent_searches_are_most_recent_first() {
    let (_tmp, store) = temp_store();
    for word in ["a", "b", "c"] {
        store.add_recent_search(word).await.unwrap();
    }

    assert_eq!(
        store.recent_searches().await.unwrap(),
        vec!["c".to_string(), "b".to_string(), "a".to_string()]
    );
}

#[tokio::test]
async fn re_searching_a_word_moves_it_to_front_without_duplicating() {
    let (_tmp, store) = temp_store();
    for word in ["a", "b", "c", "a"] {
        store.add_recent_search(word).await.unwrap();
    }

    assert_eq!(
        store.recent_searches().await.unwrap(),
        vec!["a".to_string(), "c".to_string(), "b".to_string()]
    );
}

#[tokio::test]
async fn recent_searches_are_capped_at_twenty() {
    let (_tmp, store) = temp_store();
    for i in 1..=25 {
        store.add_recent_search(&format!("w{i}")).await.unwrap();
    }

    let recents = store.recent_searches().await.unwrap();
    assert!(recents.len() <= RECENT_SEARCHES_CAP);
    assert_eq!(recents[0], "w25");
    // The oldest entries are the ones that were pruned.
    assert!(!recents.contains(&"w1".to_string()));
}

#[tokio::test]
async fn clear_empties_recent_searches() {
    let (_tmp, store) = temp_store();
    for word in ["a", "b", "c"] {
        store.add_recent_search(word).await.unwrap();
    }

    store.clear_recent_searches().await.unwrap();
    assert!(store.recent_searches().await.unwrap().is_empty());
}

#[tokio::test]
async fn clearing_an_empty_collection_is_ok() {
    let (_tmp, store) = temp_store();
    store.clear_recent_searches().await.unwrap();
    assert!(store.recent_searches().await.unwrap().is_empty());
}

// -- collections are independent --------------------------------------------

#[tokio::test]
async fn clearing_recents_leaves_favorites_and_cache_alone() {
    let (_tmp, store) = temp_store();
    store.cache_word(&sample_word("kept")).await.unwrap();
    store.add_favorite("kept").await.unwrap();
    store.add_recent_search("kept").await.unwrap();

    store.clear_recent_searches().await.unwrap();

    assert!(store.cached_word("kept").await.unwrap().is_some());
    assert!(store.is_favorite("kept").await.unwrap());
}

// -- schema lifecycle --------------------------------------------------------

#[tokio::test]
async fn init_is_idempotent() {
    let (_tmp, store) = temp_store();
    store.init().await.unwrap();
    store.init().await.unwrap();

    // Data written after the first init must survive the second.
    store.add_favorite("sturdy").await.unwrap();
    store.init().await.unwrap();
    assert!(store.is_favorite("sturdy").await.unwrap());
}

#[tokio::test]
async fn data_survives_across_store_handles() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("user-data.sqlite");

    {
        let store = UserDataStore::new(&path);
        store.add_favorite("persistent").await.unwrap();
    }

    let reopened = UserDataStore::new(&path);
    assert!(reopened.is_favorite("persistent").await.unwrap());
}

#[tokio::test]
async fn newer_schema_version_is_a_version_conflict() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("user-data.sqlite");

    // Simulate a database created by a newer build.
    {
        use sqlx::sqlite::SqliteConnectOptions;
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .unwrap()
            .create_if_missing(true);
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION + 1))
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    }

    let store = UserDataStore::new(&path);
    let err = store.is_favorite("anything").await.unwrap_err();
    assert!(matches!(err, StorageError::VersionConflict { .. }));
}
