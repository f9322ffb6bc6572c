//! # FreeSaurus
//!
//! An offline-first thesaurus client. Word lookups and searches go to the
//! FreeSaurus HTTP API; everything the user accumulates locally (cached word
//! records, recent searches, favorites) lives in a per-profile SQLite
//! database that survives restarts and works with no network at all.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐      ┌───────────────┐
//! │  CLI (fsr) │─────▶│  API client    │──▶  FreeSaurus HTTP API
//! │  commands  │      └───────────────┘
//! │            │      ┌───────────────┐
//! │            │─────▶│ UserDataStore │──▶  SQLite (word cache,
//! └────────────┘      └───────────────┘      recents, favorites)
//! ```
//!
//! The store is the load-bearing piece: versioned schema, one scoped
//! connection and transaction per operation, and a typed error taxonomy so
//! callers can degrade gracefully when local storage misbehaves.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`store`] | Local user-data store (word cache, recents, favorites) |
//! | [`api`] | HTTP client for the thesaurus and auth endpoints |
//! | [`models`] | Shared data types |
//! | [`config`] | TOML configuration |
//! | [`session`] | Persisted auth token + profile |
//! | [`lookup`] | Offline-first word detail command |
//! | [`search`] | Remote search command |
//! | [`favorites`] | Favorites commands |
//! | [`recent`] | Recent-search commands |
//! | [`account`] | Register/login/logout/whoami commands |

pub mod account;
pub mod api;
pub mod config;
pub mod favorites;
pub mod lookup;
pub mod models;
pub mod recent;
pub mod search;
pub mod session;
pub mod store;
