// src/pipeline/login.rs

//! Session setup.

use crate::error::Result;
use crate::models::{Config, Credentials};
use crate::services::SessionAuthenticator;
use crate::session::{AuthenticatedSession, Session};

/// Open a session and log in.
pub async fn login(config: &Config, credentials: &Credentials) -> Result<AuthenticatedSession> {
    log::info!("Logging in as {}...", credentials.username);
    let session = Session::new(config)?;
    let session = SessionAuthenticator::new(&config.endpoints)
        .authenticate(session, credentials)
        .await?;
    log::info!("Logged in");
    Ok(session)
}
