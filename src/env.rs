//! Development context detection
//!
//! Debug features are only active when the request (server side) or page
//! (client side) is served from a development host, or when an explicit
//! override flag is set. The two sides use slightly different host rules:
//! the server sees a raw `Host` header that may carry a port and sub-parts,
//! the page sees a bare host name.

use serde::{Deserialize, Serialize};

/// Host name suffixes reserved for local development
const DEV_SUFFIXES: [&str; 2] = [".local", ".test"];

/// Host names the page side treats as loopback (empty covers `file://`)
const LOOPBACK_HOSTNAMES: [&str; 3] = ["localhost", "127.0.0.1", ""];

/// Whether a request `Host` header names a development server
///
/// True when the host contains `localhost` or `127.0.0.1`, or when the host
/// part (port stripped) ends in `.local` or `.test`.
pub fn is_dev_host(host: &str) -> bool {
    let host = host.trim().to_ascii_lowercase();
    if host.contains("localhost") || host.contains("127.0.0.1") {
        return true;
    }

    let name = strip_port(&host);
    DEV_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Whether a page host name (no port) is a local development host
pub fn is_local_hostname(hostname: &str) -> bool {
    let hostname = hostname.to_ascii_lowercase();
    LOOPBACK_HOSTNAMES.contains(&hostname.as_str())
        || DEV_SUFFIXES.iter().any(|suffix| hostname.ends_with(suffix))
}

fn strip_port(host: &str) -> &str {
    // IPv6 literals keep their colons inside brackets
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Server-side development context for one request
///
/// Carries the request host and the explicit override flag. Render helpers
/// consult it instead of reading process-global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevContext {
    /// `Host` header of the request being rendered, if any
    pub host: Option<String>,
    /// Explicit override: treat every request as development
    pub force: bool,
}

impl DevContext {
    /// Context for a request with the given `Host` header
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            force: false,
        }
    }

    /// Context that is always active regardless of host
    pub fn forced() -> Self {
        Self {
            host: None,
            force: true,
        }
    }

    /// Set the override flag
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Whether debug output should be produced
    pub fn is_dev(&self) -> bool {
        self.force || self.host.as_deref().is_some_and(is_dev_host)
    }
}
