//! Account commands: register, login, logout, whoami.
//!
//! Tokens live in the session file next to the database. Auth only gates
//! account features on the backend; lookups and search work logged out.

use std::io::Write;

use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::{self, Session};

pub async fn run_register(
    config: &Config,
    name: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let client = ApiClient::new(config, None)?;
    let auth = client.register(name, email, &password).await?;

    session::save_session(
        &config.session_path(),
        &Session {
            token: auth.token,
            user: auth.user.clone(),
        },
    )?;
    println!("Registered and logged in as {} <{}>.", auth.user.name, auth.user.email);
    Ok(())
}

pub async fn run_login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let client = ApiClient::new(config, None)?;
    let auth = client.login(email, &password).await?;

    session::save_session(
        &config.session_path(),
        &Session {
            token: auth.token,
            user: auth.user.clone(),
        },
    )?;
    println!("Logged in as {} <{}>.", auth.user.name, auth.user.email);
    Ok(())
}

pub fn run_logout(config: &Config) -> Result<()> {
    session::clear_session(&config.session_path())?;
    println!("Logged out.");
    Ok(())
}

pub fn run_whoami(config: &Config) -> Result<()> {
    match session::load_session(&config.session_path())? {
        Some(session) => {
            println!("{} <{}>", session.user.name, session.user.email);
        }
        None => {
            println!("Not logged in.");
        }
    }
    Ok(())
}

/// Use the `--password` flag if given, otherwise prompt on stdin.
fn resolve_password(flag: Option<String>) -> Result<String> {
    if let Some(password) = flag {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
