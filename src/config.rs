/// Configuration constants for NGSI APIs
pub mod api {
    /// Base path for NGSIv2
    pub const V2_BASE_PATH: &str = "/v2";

    /// Base path for NGSI-LD
    pub const LD_BASE_PATH: &str = "/ngsi-ld/v1";

    /// Entities endpoint
    pub const ENTITIES: &str = "entities";

    /// NGSIv2 registrations endpoint
    pub const V2_REGISTRATIONS: &str = "registrations";

    /// NGSI-LD context source registrations endpoint
    pub const LD_REGISTRATIONS: &str = "csourceRegistrations";

    /// NGSIv2 batch query endpoint
    pub const OP_QUERY: &str = "op/query";

    /// Broker log level endpoint
    pub const ADMIN_LOG: &str = "/admin/log";

    /// Broker metrics endpoint
    pub const ADMIN_METRICS: &str = "/admin/metrics";

    /// Broker version endpoint
    pub const VERSION: &str = "/version";

    /// Fixed page size for paginated requests
    pub const PAGE_SIZE: u64 = 100;

    /// Log levels accepted by the broker admin endpoint
    pub const LOG_LEVELS: &[&str] = &["none", "fatal", "error", "warn", "info", "debug"];
}

/// HTTP header names
pub mod headers {
    /// NGSIv2 total count response header
    pub const V2_TOTAL_COUNT: &str = "Fiware-Total-Count";

    /// NGSI-LD total count response header
    pub const LD_RESULTS_COUNT: &str = "NGSILD-Results-Count";

    /// NGSIv2 tenant header
    pub const V2_SERVICE: &str = "Fiware-Service";

    /// NGSIv2 service path header
    pub const V2_SERVICE_PATH: &str = "Fiware-ServicePath";

    /// NGSI-LD tenant header
    pub const LD_TENANT: &str = "NGSILD-Tenant";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variable for the broker token
    pub const TOKEN_ENV_VAR: &str = "NGSI_TOKEN";
}

/// Configuration constants for named contexts
pub mod context {
    /// Directory under HOME holding the config file
    pub const DIR_NAME: &str = ".ngsictl";

    /// Config file name
    pub const FILE_NAME: &str = "config.json";

    /// Environment variable selecting the active context
    pub const ENV_VAR: &str = "NGSICTL_CONTEXT";
}

/// Default values for CLI
pub mod defaults {
    /// Default broker URL
    pub const HOST: &str = "http://localhost:1026";

    /// Environment variable for the broker URL
    pub const HOST_ENV_VAR: &str = "NGSI_HOST";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
