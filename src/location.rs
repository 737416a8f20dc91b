//! Page address the inspector is attached to

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// File reported for a page whose path ends in `/`
pub const INDEX_FILE: &str = "index.php";

/// Extension appended to extension-less path segments
pub const DEFAULT_EXTENSION: &str = ".php";

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:[A-Za-z][A-Za-z0-9+.\-]*:)?(?://(?:[^@/?#]*@)?(\[[^\]]*\]|[^:/?#]*)(?::\d*)?)?([^?#]*)",
        )
        .expect("href pattern is valid")
    })
}

/// `href`, `hostname` and `pathname` of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub href: String,
    pub hostname: String,
    pub pathname: String,
}

impl PageLocation {
    /// Split an absolute or path-only href
    ///
    /// # Example
    /// ```
    /// use srcspot::location::PageLocation;
    ///
    /// let loc = PageLocation::parse("http://localhost:8080/admin/users.php?page=2");
    /// assert_eq!(loc.hostname, "localhost");
    /// assert_eq!(loc.pathname, "/admin/users.php");
    /// ```
    pub fn parse(href: &str) -> Self {
        let href = href.trim();
        let (hostname, pathname) = match href_pattern().captures(href) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase(),
                caps.get(2).map_or("", |m| m.as_str()).to_string(),
            ),
            None => (String::new(), String::new()),
        };
        let pathname = if pathname.is_empty() {
            "/".to_string()
        } else {
            pathname
        };

        Self {
            href: href.to_string(),
            hostname,
            pathname,
        }
    }

    /// Best guess at the file that rendered this page
    ///
    /// Last path segment, `index.php` for directory paths, with `.php`
    /// appended when the segment has no extension.
    pub fn inferred_file_name(&self) -> String {
        let segment = self.pathname.rsplit('/').next().unwrap_or("");
        if segment.is_empty() {
            return INDEX_FILE.to_string();
        }
        if segment.contains('.') {
            segment.to_string()
        } else {
            format!("{}{}", segment, DEFAULT_EXTENSION)
        }
    }
}
