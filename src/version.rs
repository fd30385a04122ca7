// Version information for the Analyze Relay

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "analyze",
    "gemini-generate-content",
    "configurable-model",
    "configurable-prompt",
    "cors-allowlist",
    "health-check",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Analyze Relay {}", VERSION)
}

/// Get full version info
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION,
        "features": FEATURES,
    })
}
