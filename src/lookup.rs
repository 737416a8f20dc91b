//! Nearest-attribution lookup
//!
//! Elements without their own `data-source` inherit the attribution of the
//! closest annotated ancestor. The walk stops at the document body; when no
//! annotated element is found the caller falls back to a file name guessed
//! from the page URL, which is reported as inferred rather than known.

use crate::attribution::SOURCE_ATTR;
use crate::dom::{Dom, NodeId};
use crate::location::PageLocation;
use serde::Serialize;

/// Annotated element found by [`find_nearest_source`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceMatch {
    /// Raw `data-source` value
    pub source: String,
    /// Element carrying the attribute
    #[serde(skip)]
    pub element: NodeId,
    /// True when `element` is an ancestor of the hovered element
    pub inherited: bool,
    /// Short identifier of `element`: `tag`, `tag#id` or `tag.class`
    pub parent_identifier: String,
}

/// Attribution to display for a hovered element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedSource {
    /// Read from the element or one of its ancestors
    Annotated(SourceMatch),
    /// Guessed from the page URL
    Inferred { file: String },
}

impl ResolvedSource {
    pub fn is_inferred(&self) -> bool {
        matches!(self, ResolvedSource::Inferred { .. })
    }

    /// `file:line` for annotated sources, the guessed file otherwise
    pub fn display_source(&self) -> &str {
        match self {
            ResolvedSource::Annotated(found) => &found.source,
            ResolvedSource::Inferred { file } => file,
        }
    }
}

/// `tag`, `tag#id`, or `tag.firstClass`
pub fn element_identifier(dom: &Dom, node: NodeId) -> String {
    let mut identifier = dom.tag_name(node).to_string();
    if let Some(id) = dom.id_attr(node) {
        identifier.push('#');
        identifier.push_str(id);
    } else if let Some(first) = dom.class_list(node).first() {
        identifier.push('.');
        identifier.push_str(first);
    }
    identifier
}

/// Walk from `element` toward the body and return the first annotated element
pub fn find_nearest_source(dom: &Dom, element: NodeId) -> Option<SourceMatch> {
    let body = dom.body();
    let mut cursor = Some(element);

    while let Some(node) = cursor {
        if node == body {
            break;
        }
        if let Some(source) = dom.attr(node, SOURCE_ATTR).filter(|s| !s.is_empty()) {
            return Some(SourceMatch {
                source: source.to_string(),
                element: node,
                inherited: node != element,
                parent_identifier: element_identifier(dom, node),
            });
        }
        cursor = dom.parent(node);
    }

    None
}

/// Nearest annotation, or the URL-based guess when there is none
pub fn resolve_source(dom: &Dom, element: NodeId, location: &PageLocation) -> ResolvedSource {
    match find_nearest_source(dom, element) {
        Some(found) => ResolvedSource::Annotated(found),
        None => ResolvedSource::Inferred {
            file: location.inferred_file_name(),
        },
    }
}
