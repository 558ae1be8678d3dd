//! Context configuration data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ngsi::DialectKind;

/// Top-level context configuration
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ContextConfig {
    /// Name of the currently active context
    #[serde(rename = "current-context", skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    /// Map of context name to context configuration
    #[serde(default)]
    pub contexts: BTreeMap<String, Context>,
}

/// A named broker context with connection parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Context {
    /// Broker URL
    pub host: String,
    /// Broker dialect
    #[serde(rename = "ngsi-type", default)]
    pub ngsi_type: DialectKind,
    /// Bearer token (stored in config file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Tenant (FIWARE-Service / NGSILD-Tenant)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Scope (FIWARE-ServicePath)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Basic auth user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Basic auth password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Decode forbidden characters in responses
    #[serde(rename = "safe-string", default, skip_serializing_if = "is_false")]
    pub safe_string: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Context {
    /// Context pointing at `host` with every other field unset
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_config_default() {
        let config = ContextConfig::default();
        assert!(config.current_context.is_none());
        assert!(config.contexts.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut config = ContextConfig {
            current_context: Some("orion".to_string()),
            ..Default::default()
        };
        config.contexts.insert(
            "orion".to_string(),
            Context {
                token: Some("secret-token".to_string()),
                tenant: Some("openiot".to_string()),
                scope: Some("/".to_string()),
                safe_string: true,
                ..Context::new("http://orion:1026")
            },
        );
        config.contexts.insert(
            "scorpio".to_string(),
            Context {
                ngsi_type: DialectKind::Ld,
                ..Context::new("http://scorpio:9090")
            },
        );

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: ContextConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.current_context, Some("orion".to_string()));
        assert_eq!(parsed.contexts.len(), 2);
        let orion = &parsed.contexts["orion"];
        assert_eq!(orion.host, "http://orion:1026");
        assert_eq!(orion.ngsi_type, DialectKind::V2);
        assert_eq!(orion.token, Some("secret-token".to_string()));
        assert_eq!(orion.tenant, Some("openiot".to_string()));
        assert!(orion.safe_string);
        let scorpio = &parsed.contexts["scorpio"];
        assert_eq!(scorpio.ngsi_type, DialectKind::Ld);
        assert!(scorpio.token.is_none());
        assert!(!scorpio.safe_string);
    }

    #[test]
    fn test_skip_serializing_if_none() {
        let config = ContextConfig {
            current_context: None,
            contexts: BTreeMap::new(),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("current-context"));
    }

    #[test]
    fn test_skip_serializing_optional_fields() {
        let mut config = ContextConfig::default();
        config
            .contexts
            .insert("test".to_string(), Context::new("localhost:1026"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("token"));
        assert!(!json.contains("tenant"));
        assert!(!json.contains("password"));
        assert!(!json.contains("safe-string"));
        assert!(json.contains(r#""ngsi-type":"v2""#));
    }

    #[test]
    fn test_btreemap_ordering() {
        let mut config = ContextConfig::default();
        for name in ["zebra", "alpha", "middle"] {
            config
                .contexts
                .insert(name.to_string(), Context::new("localhost"));
        }

        let keys: Vec<&String> = config.contexts.keys().collect();
        assert_eq!(keys, vec!["alpha", "middle", "zebra"]);
    }

    #[test]
    fn test_deserialize_minimal_context() {
        let json = r#"{"contexts": {"orion": {"host": "localhost:1026"}}}"#;
        let config: ContextConfig = serde_json::from_str(json).unwrap();
        let orion = &config.contexts["orion"];
        assert_eq!(orion.ngsi_type, DialectKind::V2);
        assert!(!orion.safe_string);
        assert!(orion.user.is_none());
    }

    #[test]
    fn test_deserialize_empty_json() {
        let config: ContextConfig = serde_json::from_str("{}").unwrap();
        assert!(config.current_context.is_none());
        assert!(config.contexts.is_empty());
    }
}
