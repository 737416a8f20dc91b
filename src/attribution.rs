//! Render-time source attribution
//!
//! Captures the call site of a render helper and formats it as a
//! `data-source="file:line"` attribute fragment for embedding in markup.
//! Call sites come from `#[track_caller]`, so every helper reports the line
//! of the template code that called it, not its own.
//!
//! # Example
//!
//! ```
//! use srcspot::attribution::Emitter;
//! use srcspot::env::DevContext;
//!
//! let emitter = Emitter::new(DevContext::for_host("localhost:8080"));
//! let html = format!("<div {}>hello</div>", emitter.dd());
//! assert!(html.starts_with("<div data-source=\""));
//!
//! let prod = Emitter::new(DevContext::for_host("example.com"));
//! assert_eq!(prod.dd(), "");
//! ```

use crate::config::Config;
use crate::env::DevContext;
use crate::error::{Error, Result};
use crate::html::escape_html;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::str::FromStr;

/// Name of the attribute carrying attribution in markup
pub const SOURCE_ATTR: &str = "data-source";

/// Script path used when none is configured
pub const DEFAULT_SCRIPT_PATH: &str = "js/srcspot.js";

/// Where a piece of markup was generated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribution {
    /// Source file, either a base name or a full path
    pub file: String,
    /// 1-based line number
    pub line: u32,
}

impl Attribution {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Capture the caller's location
    ///
    /// With `full_path` false only the file's base name is kept.
    #[track_caller]
    pub fn caller(full_path: bool) -> Self {
        Self::from_location(Location::caller(), full_path)
    }

    /// Build from a captured location
    pub fn from_location(location: &Location<'_>, full_path: bool) -> Self {
        let file = if full_path {
            location.file().to_string()
        } else {
            base_name(location.file()).to_string()
        };
        Self::new(file, location.line())
    }

    /// Escaped `file:line` value
    pub fn to_escaped(&self) -> String {
        escape_html(&self.to_string())
    }

    /// Complete `data-source="file:line"` fragment
    pub fn to_attr(&self) -> String {
        format!("{}=\"{}\"", SOURCE_ATTR, self.to_escaped())
    }
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl FromStr for Attribution {
    type Err = Error;

    /// Parse `file:line`; the last colon separates the line number
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (file, line) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidAttribution(s.to_string()))?;

        if file.is_empty() {
            return Err(Error::InvalidAttribution(s.to_string()));
        }

        let line: u32 = line.parse().map_err(|e: std::num::ParseIntError| {
            Error::InvalidLine {
                input: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        if line == 0 {
            return Err(Error::InvalidLine {
                input: s.to_string(),
                reason: "line numbers start at 1".to_string(),
            });
        }

        Ok(Self::new(file, line))
    }
}

/// Final path component, accepting both `/` and `\` separators
fn base_name(path: &str) -> &str {
    let tail = path.rsplit(['/', '\\']).next().unwrap_or(path);
    if tail.is_empty() {
        Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
    } else {
        tail
    }
}

/// Render helper bound to one request's development context
///
/// Every method returns an empty string outside a development context, so
/// templates can embed the output unconditionally.
#[derive(Debug, Clone)]
pub struct Emitter {
    context: DevContext,
    script_path: String,
    full_path: bool,
}

impl Emitter {
    /// Create an emitter with default settings
    pub fn new(context: DevContext) -> Self {
        Self {
            context,
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
            full_path: false,
        }
    }

    /// Create an emitter using configured paths and the override flag
    pub fn from_config(context: DevContext, config: &Config) -> Self {
        let force = context.force || config.force_dev;
        Self {
            context: context.with_force(force),
            script_path: config.script_path.clone(),
            full_path: config.full_path,
        }
    }

    /// The context this emitter renders for
    pub fn context(&self) -> &DevContext {
        &self.context
    }

    /// Whether helpers produce output
    pub fn is_active(&self) -> bool {
        self.context.is_dev()
    }

    /// `data-source` fragment with the caller's base file name
    #[track_caller]
    pub fn dd(&self) -> String {
        if !self.is_active() {
            return String::new();
        }
        Attribution::caller(false).to_attr()
    }

    /// `data-source` fragment, optionally with the caller's full path
    #[track_caller]
    pub fn debug_attr(&self, full_path: bool) -> String {
        if !self.is_active() {
            return String::new();
        }
        Attribution::caller(full_path).to_attr()
    }

    /// `data-source` fragment using the configured path style
    #[track_caller]
    pub fn attr(&self) -> String {
        self.debug_attr(self.full_path)
    }

    /// Escaped `file:line` value without the attribute name
    #[track_caller]
    pub fn debug_source(&self, full_path: bool) -> String {
        if !self.is_active() {
            return String::new();
        }
        Attribution::caller(full_path).to_escaped()
    }

    /// Script tag loading the inspector from the configured path
    pub fn script_tag(&self) -> String {
        self.script_tag_at(&self.script_path)
    }

    /// Script tag loading the inspector from `path`
    pub fn script_tag_at(&self, path: &str) -> String {
        if !self.is_active() {
            return String::new();
        }
        format!("<script src=\"{}\"></script>", escape_html(path))
    }

    /// Script tag for the default script location under `base`
    pub fn script_tag_absolute(&self, base: &str) -> String {
        self.script_tag_at(&format!("{}{}", base, DEFAULT_SCRIPT_PATH))
    }
}
