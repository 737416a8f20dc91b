//! Text written to the clipboard by the copy action

use super::HIGHLIGHT_CLASS;
use crate::dom::{Dom, NodeId};
use crate::location::PageLocation;
use crate::lookup::ResolvedSource;

/// Class attribute without the inspector's own highlight class
pub fn scrub_class(class_name: &str) -> String {
    class_name
        .split_whitespace()
        .filter(|c| *c != HIGHLIGHT_CLASS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Multi-line report describing `element` and where it came from
///
/// ```text
/// URL: http://localhost/index.php
/// File: page.php:7 (inherited from div.card)
/// Element: <span#title>
/// Class: headline
/// ```
pub fn copy_text(dom: &Dom, element: NodeId, location: &PageLocation, source: &ResolvedSource) -> String {
    let mut text = format!("URL: {}\n", location.href);

    match source {
        ResolvedSource::Annotated(found) if found.inherited => {
            text.push_str(&format!(
                "File: {} (inherited from {})\n",
                found.source, found.parent_identifier
            ));
        }
        ResolvedSource::Annotated(found) => {
            text.push_str(&format!("File: {}\n", found.source));
        }
        ResolvedSource::Inferred { file } => {
            text.push_str(&format!("File: {}\n", file));
        }
    }

    let id = dom
        .id_attr(element)
        .map(|id| format!("#{}", id))
        .unwrap_or_default();
    text.push_str(&format!("Element: <{}{}>\n", dom.tag_name(element), id));

    let classes = scrub_class(dom.class_name(element));
    if !classes.is_empty() {
        text.push_str(&format!("Class: {}", classes));
    }

    text
}
