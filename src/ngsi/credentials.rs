//! Broker credential resolution from multiple sources

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;

use crate::config::credentials;
use crate::error::{NgsiError, Result};

/// Authorization sent with every broker request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Auth {
    /// No Authorization header
    #[default]
    Anonymous,
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `Authorization: Basic base64(user:password)`
    Basic { user: String, password: String },
}

impl Auth {
    /// Value of the Authorization header, if any
    pub fn header_value(&self) -> Option<String> {
        match self {
            Auth::Anonymous => None,
            Auth::Bearer(token) => Some(format!("Bearer {}", token)),
            Auth::Basic { user, password } => Some(format!(
                "Basic {}",
                STANDARD.encode(format!("{}:{}", user, password))
            )),
        }
    }
}

/// Credential sources for one invocation
#[derive(Debug, Default)]
pub struct TokenResolver<'a> {
    pub cli_token: Option<&'a str>,
    pub cli_user: Option<&'a str>,
    pub cli_password: Option<&'a str>,
    pub context_token: Option<&'a str>,
    pub context_user: Option<&'a str>,
    pub context_password: Option<&'a str>,
}

impl TokenResolver<'_> {
    /// Resolve credentials with fallback:
    /// 1. CLI user/password (basic), then CLI token
    /// 2. Token from NGSI_TOKEN environment variable
    /// 3. Context user/password (basic), then context token
    /// 4. Anonymous
    pub fn resolve(&self) -> Result<Auth> {
        if let Some(user) = self.cli_user {
            return self.basic(user, self.cli_password.or(self.context_password));
        }

        if let Some(token) = self.cli_token {
            debug!("Using token from CLI argument");
            return Ok(Auth::Bearer(token.to_string()));
        }

        if let Ok(token) = std::env::var(credentials::TOKEN_ENV_VAR) {
            if !token.is_empty() {
                debug!(
                    "Using token from {} environment variable",
                    credentials::TOKEN_ENV_VAR
                );
                return Ok(Auth::Bearer(token));
            }
        }

        if let Some(user) = self.context_user {
            return self.basic(user, self.context_password);
        }

        if let Some(token) = self.context_token {
            debug!("Using token from active context");
            return Ok(Auth::Bearer(token.to_string()));
        }

        debug!("No credentials configured, sending anonymous requests");
        Ok(Auth::Anonymous)
    }

    fn basic(&self, user: &str, password: Option<&str>) -> Result<Auth> {
        let password = password.ok_or_else(|| {
            NgsiError::Credentials(format!(
                "No password found for user '{}'. Use --password or set it in the context.",
                user
            ))
        })?;
        debug!("Using basic authentication for user {}", user);
        Ok(Auth::Basic {
            user: user.to_string(),
            password: password.to_string(),
        })
    }
}
