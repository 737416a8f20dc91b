//! srcspot - source attribution for server-rendered markup
//!
//! This library provides the render-time helpers that stamp elements with
//! the file and line that produced them (`data-source="file:line"`), and a
//! hover inspector that reads those stamps back from a page, shows them in
//! a tooltip and copies them to the clipboard.

pub mod attribution;
pub mod cli;
pub mod config;
pub mod dom;
pub mod env;
pub mod error;
pub mod html;
pub mod location;
pub mod lookup;
pub mod overlay;
pub mod scenario;

pub use error::{Error, Result};
