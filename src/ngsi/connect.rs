//! Connection settings resolution and client construction

use log::debug;

use crate::cli::Cli;
use crate::config::defaults;
use crate::context::{resolve_active_context, Context};
use crate::error::Result;
use crate::ngsi::client::NgsiClient;
use crate::ngsi::credentials::{Auth, TokenResolver};
use crate::ngsi::dialect::DialectKind;

/// Fully resolved connection parameters for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub host: String,
    pub dialect: DialectKind,
    pub tenant: Option<String>,
    pub scope: Option<String>,
    pub safe_string: bool,
    pub auth: Auth,
}

impl Connection {
    /// Merge CLI flags, environment and the active context
    ///
    /// Each parameter takes the first of: CLI flag, environment variable,
    /// active context, built-in default.
    pub fn resolve(cli: &Cli, context: Option<&Context>, env_host: Option<&str>) -> Result<Self> {
        let host = cli
            .host
            .as_deref()
            .or(env_host.filter(|h| !h.is_empty()))
            .or(context.map(|c| c.host.as_str()))
            .unwrap_or(defaults::HOST)
            .to_string();

        let dialect = cli
            .ngsi_type
            .or(context.map(|c| c.ngsi_type))
            .unwrap_or_default();

        let tenant = cli
            .tenant
            .clone()
            .or_else(|| context.and_then(|c| c.tenant.clone()));
        let scope = cli
            .scope
            .clone()
            .or_else(|| context.and_then(|c| c.scope.clone()));
        let safe_string = cli
            .safe_string
            .map(|s| s.is_on())
            .or(context.map(|c| c.safe_string))
            .unwrap_or(false);

        let auth = TokenResolver {
            cli_token: cli.token.as_deref(),
            cli_user: cli.user.as_deref(),
            cli_password: cli.password.as_deref(),
            context_token: context.and_then(|c| c.token.as_deref()),
            context_user: context.and_then(|c| c.user.as_deref()),
            context_password: context.and_then(|c| c.password.as_deref()),
        }
        .resolve()?;

        debug!(
            "Connection: host={}, ngsi-type={}, tenant={:?}, scope={:?}, safe-string={}",
            host, dialect, tenant, scope, safe_string
        );

        Ok(Self {
            host,
            dialect,
            tenant,
            scope,
            safe_string,
            auth,
        })
    }

    /// Build a client for these parameters
    pub fn into_client(self) -> NgsiClient {
        let mut client = NgsiClient::new(&self.host, self.dialect, self.auth);
        client.set_tenant(self.tenant);
        client.set_scope(self.scope);
        client.set_safe_string(self.safe_string);
        client
    }
}

/// Resolve the active context and connection, then build the client
pub fn connect(cli: &Cli) -> Result<NgsiClient> {
    let context = resolve_active_context(cli.context.as_deref())?;
    let env_host = std::env::var(defaults::HOST_ENV_VAR).ok();
    let connection = Connection::resolve(cli, context.as_ref(), env_host.as_deref())?;
    Ok(connection.into_client())
}
