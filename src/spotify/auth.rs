use reqwest::blocking::Client;

use crate::{
    config,
    errors::{Credential, Error, Result},
    types::{Token, TokenResponse},
};

/// Client ID and secret of a Spotify developer app.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub secret: String,
}

impl Credentials {
    /// Builds credentials from optional values, client ID checked first.
    ///
    /// Empty strings count as missing.
    pub fn new(client_id: Option<String>, secret: Option<String>) -> Result<Self> {
        let client_id = client_id
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingCredential(Credential::ClientId))?;
        let secret = secret
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingCredential(Credential::Secret))?;
        Ok(Credentials { client_id, secret })
    }

    /// Uses the flag values when given and the environment otherwise.
    pub fn resolve(client_id: Option<String>, secret: Option<String>) -> Result<Self> {
        Self::new(
            client_id.or_else(config::spotify_client_id),
            secret.or_else(config::spotify_client_secret),
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"***")
            .finish()
    }
}

/// An authenticated connection to the Spotify Web API.
///
/// A session lives for one run. The token is never refreshed; a run finishes
/// well inside its lifetime.
pub struct Session {
    /// HTTP client shared by the token exchange and every lookup.
    pub(crate) client: Client,
    /// Bearer token sent with every Web API lookup.
    pub(crate) token: Token,
    /// Web API base URL without a trailing `/`.
    pub(crate) api_url: String,
}

impl Session {
    /// Authenticates against the configured token endpoint.
    pub fn connect(credentials: &Credentials) -> Result<Self> {
        Self::connect_to(
            credentials,
            &config::spotify_apitoken_url(),
            &config::spotify_apiurl(),
        )
    }

    /// Runs the client-credentials exchange against `token_url` and returns a
    /// session whose lookups go to `api_url`.
    pub fn connect_to(credentials: &Credentials, token_url: &str, api_url: &str) -> Result<Self> {
        Self::connect_with(Client::new(), credentials, token_url, api_url)
    }

    /// Same as [`Session::connect_to`], over a caller-built HTTP client.
    ///
    /// # Arguments
    ///
    /// * `client` - Client used for the exchange and kept for later lookups
    /// * `credentials` - Client ID and secret, sent as HTTP basic auth
    /// * `token_url` - Accounts service token endpoint
    /// * `api_url` - Web API base URL, a trailing `/` is dropped
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] when the endpoint cannot be reached, answers
    /// with a non-2xx status, or returns a body that is not a token.
    pub fn connect_with(
        client: Client,
        credentials: &Credentials,
        token_url: &str,
        api_url: &str,
    ) -> Result<Self> {
        let token: Token = client
            .post(token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.json::<TokenResponse>())
            .map_err(Error::Authentication)?
            .into();

        log::debug!("Obtained access token, expires in {}s", token.expires_in);

        Ok(Session {
            client,
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}
