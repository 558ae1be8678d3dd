//! Active context resolution from multiple sources

use log::debug;

use crate::config::context as context_config;
use crate::error::{NgsiError, Result};

use super::models::Context;
use super::store::ContextStore;

/// Where the active context name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameSource {
    Flag,
    Env,
    CurrentContext,
}

/// Pick the active context name:
/// 1. --context CLI flag
/// 2. NGSICTL_CONTEXT env var
/// 3. current-context from the config file
fn active_name(
    store: &ContextStore,
    cli_context: Option<&str>,
    env_context: Option<&str>,
) -> Result<Option<(String, NameSource)>> {
    if let Some(name) = cli_context {
        return Ok(Some((name.to_string(), NameSource::Flag)));
    }
    if let Some(name) = env_context.filter(|n| !n.is_empty()) {
        return Ok(Some((name.to_string(), NameSource::Env)));
    }
    Ok(store
        .load()?
        .current_context
        .map(|name| (name, NameSource::CurrentContext)))
}

/// Resolve the active context against a specific store
///
/// A name given explicitly (flag or env var) must exist; a dangling
/// current-context is ignored.
pub fn resolve_context_in(
    store: &ContextStore,
    cli_context: Option<&str>,
    env_context: Option<&str>,
) -> Result<Option<Context>> {
    let Some((name, source)) = active_name(store, cli_context, env_context)? else {
        debug!("No active context");
        return Ok(None);
    };
    debug!("Using context '{}' from {:?}", name, source);

    match store.get(&name)? {
        Some(ctx) => {
            debug!(
                "Resolved context '{}': host={}, ngsi-type={}",
                name, ctx.host, ctx.ngsi_type
            );
            Ok(Some(ctx))
        }
        None if source == NameSource::CurrentContext => {
            debug!("current-context '{}' not found in config, ignoring", name);
            Ok(None)
        }
        None => Err(NgsiError::Config(format!(
            "Context '{}' not found. Use 'ngsictl config get-contexts' to list contexts.",
            name
        ))),
    }
}

/// Resolve the active context from the default store and environment
pub fn resolve_active_context(cli_context: Option<&str>) -> Result<Option<Context>> {
    let env_context = std::env::var(context_config::ENV_VAR).ok();
    resolve_context_in(&ContextStore::new(), cli_context, env_context.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::models::ContextConfig;
    use tempfile::TempDir;

    fn store_with(dir: &TempDir, current: Option<&str>, names: &[&str]) -> ContextStore {
        let store = ContextStore::with_path(dir.path().join("config.json"));
        let mut config = ContextConfig {
            current_context: current.map(str::to_string),
            ..Default::default()
        };
        for name in names {
            config
                .contexts
                .insert(name.to_string(), Context::new(&format!("{}:1026", name)));
        }
        store.save(&config).unwrap();
        store
    }

    #[test]
    fn test_cli_flag_wins() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some("a"), &["a", "b", "c"]);
        let ctx = resolve_context_in(&store, Some("b"), Some("c")).unwrap().unwrap();
        assert_eq!(ctx.host, "b:1026");
    }

    #[test]
    fn test_env_before_current_context() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some("a"), &["a", "c"]);
        let ctx = resolve_context_in(&store, None, Some("c")).unwrap().unwrap();
        assert_eq!(ctx.host, "c:1026");
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some("a"), &["a"]);
        let ctx = resolve_context_in(&store, None, Some("")).unwrap().unwrap();
        assert_eq!(ctx.host, "a:1026");
    }

    #[test]
    fn test_none_when_no_sources() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, None, &["a"]);
        assert!(resolve_context_in(&store, None, None).unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_context_errors() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, None, &["a"]);
        let err = resolve_context_in(&store, Some("nonexistent"), None).unwrap_err();
        assert!(err.to_string().contains("'nonexistent' not found"));
    }

    #[test]
    fn test_dangling_current_context_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, Some("gone"), &["a"]);
        assert!(resolve_context_in(&store, None, None).unwrap().is_none());
    }
}
