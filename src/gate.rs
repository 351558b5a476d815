//! Host gating: decides whether the overlay attaches at all.
//!
//! The tool is meant for development hosts only. A host is allowed when its
//! name matches one of the exact names, starts with one of the prefixes or
//! ends with one of the suffixes.

use serde::{Deserialize, Serialize};

/// Allow-list of development host names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostGate {
    pub exact: Vec<String>,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

impl Default for HostGate {
    fn default() -> Self {
        Self {
            // The empty name covers file:// pages
            exact: vec![
                "localhost".to_string(),
                "127.0.0.1".to_string(),
                String::new(),
            ],
            prefixes: vec!["192.168.".to_string()],
            suffixes: vec![".local".to_string()],
        }
    }
}

impl HostGate {
    /// A gate that allows every host.
    pub fn allow_all() -> Self {
        Self {
            exact: Vec::new(),
            prefixes: vec![String::new()],
            suffixes: Vec::new(),
        }
    }

    pub fn is_allowed(&self, hostname: &str) -> bool {
        let allowed = self.exact.iter().any(|h| h == hostname)
            || self.prefixes.iter().any(|p| hostname.starts_with(p.as_str()))
            || self.suffixes.iter().any(|s| hostname.ends_with(s.as_str()));
        if !allowed {
            log::info!("Host '{}' is not on the allow-list, overlay disabled", hostname);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let gate = HostGate::default();
        assert!(gate.is_allowed("localhost"));
        assert!(gate.is_allowed("127.0.0.1"));
        assert!(gate.is_allowed(""));
        assert!(gate.is_allowed("192.168.1.20"));
        assert!(gate.is_allowed("my-mac.local"));
    }

    #[test]
    fn test_default_rejects_public_hosts() {
        let gate = HostGate::default();
        assert!(!gate.is_allowed("example.com"));
        assert!(!gate.is_allowed("10.0.0.1"));
        assert!(!gate.is_allowed("localhost.example.com"));
        assert!(!gate.is_allowed("local"));
    }

    #[test]
    fn test_allow_all() {
        assert!(HostGate::allow_all().is_allowed("example.com"));
    }
}
