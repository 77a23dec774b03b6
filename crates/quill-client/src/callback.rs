use reqwest::Url;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::session::SessionStore;

/// Where the callback page sends the browser once it is done.
pub const HOME_ROUTE: &str = "/";

/// Query parameter the identity redirect carries the session token in.
pub const TOKEN_PARAM: &str = "token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackOutcome {
    pub redirect_to: &'static str,
    pub stored: bool,
}

/// Handles `/auth/callback?token=…`: persists the token when present and
/// always redirects home.
pub fn complete_sign_in(url: &str, session: &SessionStore) -> Result<CallbackOutcome, ClientError> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(url)))
        .map_err(|e| ClientError::Invalid(format!("bad callback URL {url}: {e}")))?;

    let token = parsed
        .query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty());

    let Some(token) = token else {
        warn!("sign-in callback without a token, continuing signed out");
        return Ok(CallbackOutcome {
            redirect_to: HOME_ROUTE,
            stored: false,
        });
    };

    session.set_token(&token)?;
    info!("signed in via callback");

    Ok(CallbackOutcome {
        redirect_to: HOME_ROUTE,
        stored: true,
    })
}
