//! Bind-address resolution for the HTTP server.

use std::env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Host and port the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindConfig {
    pub host: String,
    pub port: u16,
}

impl BindConfig {
    /// Resolve the bind address: `MCP_HOST`/`MCP_PORT` environment variables
    /// win over the positional command-line values, and both fall back to
    /// all interfaces on port 8000.
    pub fn resolve(host_arg: Option<String>, port_arg: Option<u16>) -> Self {
        let host = env::var("MCP_HOST")
            .ok()
            .filter(|h| !h.is_empty())
            .or(host_arg)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = env::var("MCP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .or(port_arg)
            .unwrap_or(DEFAULT_PORT);
        Self { host, port }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These assume MCP_HOST/MCP_PORT are unset in the test environment.

    #[test]
    fn test_defaults() {
        let config = BindConfig::resolve(None, None);
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_positional_values_apply() {
        let config = BindConfig::resolve(Some("127.0.0.1".to_string()), Some(7860));
        assert_eq!(config.addr(), "127.0.0.1:7860");
    }

    #[test]
    fn test_partial_positional_values() {
        let config = BindConfig::resolve(Some("::1".to_string()), None);
        assert_eq!(config.host, "::1");
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
