// src/services/auth.rs

//! Login against the portal's ASP.NET WebForms login page.
//!
//! The login form is a postback: the page has to be fetched first so that its
//! hidden `__VIEWSTATE`, `__VIEWSTATEGENERATOR` and `__EVENTVALIDATION` fields
//! can be replayed alongside the credentials.

use reqwest::StatusCode;
use reqwest::header::LOCATION;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Credentials, EndpointConfig};
use crate::session::{AuthenticatedSession, Session};
use crate::utils::http::fetch_page;

const VIEW_STATE: &str = "__VIEWSTATE";
const VIEW_STATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";
const EVENT_VALIDATION: &str = "__EVENTVALIDATION";

/// Hidden postback fields scraped from the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostbackTokens {
    pub view_state: String,
    pub view_state_generator: String,
    pub event_validation: String,
}

impl PostbackTokens {
    /// Extract the three hidden fields from the login page markup.
    pub fn extract(document: &Html) -> Result<Self> {
        Ok(Self {
            view_state: hidden_value(document, VIEW_STATE)?,
            view_state_generator: hidden_value(document, VIEW_STATE_GENERATOR)?,
            event_validation: hidden_value(document, EVENT_VALIDATION)?,
        })
    }

    /// Login form body: tokens, credentials and the constants the page posts.
    fn login_form<'a>(&'a self, credentials: &'a Credentials) -> [(&'static str, &'a str); 9] {
        [
            ("__EVENTTARGET", ""),
            ("__EVENTARGUMENT", ""),
            (VIEW_STATE, &self.view_state),
            (VIEW_STATE_GENERATOR, &self.view_state_generator),
            (EVENT_VALIDATION, &self.event_validation),
            ("TxtEmail", &credentials.username),
            ("txtPass", &credentials.password),
            ("Button1", "Login"),
            ("txtEmailId", ""),
        ]
    }
}

fn hidden_value(document: &Html, id: &str) -> Result<String> {
    let selector = Selector::parse(&format!("#{id}"))
        .map_err(|e| AppError::parse(format!("invalid selector for {id}: {e:?}")))?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(String::from)
        .ok_or_else(|| AppError::parse(format!("login page has no {id} field")))
}

/// Service that turns a fresh [`Session`] into an [`AuthenticatedSession`].
pub struct SessionAuthenticator<'a> {
    endpoints: &'a EndpointConfig,
}

impl<'a> SessionAuthenticator<'a> {
    pub fn new(endpoints: &'a EndpointConfig) -> Self {
        Self { endpoints }
    }

    /// Log in with the given credentials.
    ///
    /// The portal answers a bad login with 200 and an error script, so success
    /// is judged only by the 302 on the form POST. The redirect target has to
    /// be requested once before the session cookie is accepted elsewhere.
    pub async fn authenticate(
        &self,
        session: Session,
        credentials: &Credentials,
    ) -> Result<AuthenticatedSession> {
        let login = &self.endpoints.login;
        let login_url = session.url(login)?;

        // `Html` is not `Send`; keep it out of scope across the awaits below.
        let tokens =
            PostbackTokens::extract(&fetch_page(session.client(), login_url.clone(), login).await?)?;
        log::debug!("Scraped postback tokens from {}", login);

        let response = session
            .client()
            .post(login_url)
            .form(&tokens.login_form(credentials))
            .send()
            .await?;

        if response.status() != StatusCode::FOUND {
            return Err(AppError::auth(format!(
                "login returned {} instead of a redirect; are the credentials correct?",
                response.status()
            )));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::parse("login redirect has no Location header"))?;
        let target = session.url(location)?;

        log::debug!("Following login redirect to {}", target);
        session.client().get(target).send().await?;

        Ok(AuthenticatedSession::new(session))
    }
}
