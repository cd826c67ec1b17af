// src/session.rs

//! Portal sessions.
//!
//! A [`Session`] owns the cookie-carrying HTTP client for one run. It becomes an
//! [`AuthenticatedSession`] only through
//! [`SessionAuthenticator::authenticate`](crate::services::SessionAuthenticator::authenticate),
//! and every data endpoint takes the authenticated form.

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::http::{create_client, ensure_success};

/// Unauthenticated transport handle.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    root: Url,
}

impl Session {
    /// Build a fresh session with an empty cookie jar.
    pub fn new(config: &Config) -> Result<Self> {
        let root = Url::parse(&config.portal.root_url).map_err(|e| {
            AppError::config(format!(
                "portal.root_url '{}' is invalid: {e}",
                config.portal.root_url
            ))
        })?;
        Ok(Self {
            client: create_client(&config.portal)?,
            root,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Resolve an endpoint path, or an absolute `Location`, against the portal root.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.root
            .join(path)
            .map_err(|e| AppError::parse(format!("cannot build URL from '{path}': {e}")))
    }
}

/// Session whose cookie jar holds a validated portal login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    inner: Session,
}

impl AuthenticatedSession {
    pub(crate) fn new(inner: Session) -> Self {
        Self { inner }
    }

    pub fn session(&self) -> &Session {
        &self.inner
    }

    /// POST a JSON body and return the raw response, whatever its status.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.inner.url(path)?;
        log::debug!("POST {}", url);
        Ok(self.inner.client.post(url).json(body).send().await?)
    }

    /// POST a JSON body to a page method and return the response text.
    ///
    /// Any non-2xx status is a fetch error.
    pub async fn post_page_method<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let response = ensure_success(self.post_json(path, body).await?, path)?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_paths_and_absolute_locations() {
        let mut config = Config::default();
        config.portal.root_url = "http://portal.example".to_string();
        let session = Session::new(&config).unwrap();

        assert_eq!(
            session.url("/Login.aspx").unwrap().as_str(),
            "http://portal.example/Login.aspx"
        );
        assert_eq!(
            session.url("http://other.example/Home.aspx").unwrap().as_str(),
            "http://other.example/Home.aspx"
        );
    }

    #[test]
    fn invalid_root_is_a_config_error() {
        let mut config = Config::default();
        config.portal.root_url = "::nope".to_string();
        let err = Session::new(&config).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
