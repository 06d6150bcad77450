//! Runtime configuration for the grading server.

/// Default bind host.
const DEFAULT_HOST: &str = "127.0.0.1";
/// Default WebSocket port.
const DEFAULT_PORT: u16 = 5510;

/// Server configuration, read from `LUMEN_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// WebSocket port.
    pub port: u16,
    /// Run color conversions on the rayon pool.
    pub parallel: bool,
}

impl ServerConfig {
    /// Build from an arbitrary variable lookup. `Default` uses the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("LUMEN_HOST")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("LUMEN_PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            parallel: lookup("LUMEN_PARALLEL").is_none_or(|s| parse_flag(&s)),
        }
    }

    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5510);
        assert!(cfg.parallel);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:5510");
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("LUMEN_HOST", "0.0.0.0"),
            ("LUMEN_PORT", "9000"),
            ("LUMEN_PARALLEL", "off"),
        ]);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert!(!cfg.parallel);
    }

    #[test]
    fn test_bad_port_falls_back() {
        assert_eq!(config(&[("LUMEN_PORT", "http")]).port, 5510);
        assert!(config(&[("LUMEN_PARALLEL", "1")]).parallel);
    }
}
