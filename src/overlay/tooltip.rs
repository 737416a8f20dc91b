//! Tooltip content and placement

use crate::config::TooltipConfig;
use crate::html::escape_html;
use crate::lookup::ResolvedSource;
use serde::{Deserialize, Serialize};

/// Visible area of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Top-left corner for a tooltip shown at pointer `(x, y)`
///
/// Offset down and right of the pointer; flipped to the left or above on
/// each axis where the assumed tooltip size would overflow the viewport.
pub fn place_tooltip(x: i32, y: i32, viewport: Viewport, config: &TooltipConfig) -> (i32, i32) {
    let mut left = x.saturating_add(config.offset);
    let mut top = y.saturating_add(config.offset);

    if left.saturating_add(config.width) > viewport.width {
        left = x.saturating_sub(config.width);
    }
    if top.saturating_add(config.height) > viewport.height {
        top = y.saturating_sub(config.height);
    }

    (left, top)
}

/// What the tooltip currently shows and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipView {
    pub source: ResolvedSource,
    pub url: String,
    pub tag_name: String,
    pub id: Option<String>,
    /// Element classes, highlight class removed
    pub class_name: String,
    pub left: i32,
    pub top: i32,
}

impl TooltipView {
    /// Source line as plain text
    pub fn source_line(&self) -> String {
        match &self.source {
            ResolvedSource::Annotated(found) if found.inherited => {
                format!("{} (inherited from {})", found.source, found.parent_identifier)
            }
            ResolvedSource::Annotated(found) => found.source.clone(),
            ResolvedSource::Inferred { file } => format!("{} (inferred)", file),
        }
    }

    /// Tooltip body markup, every value escaped
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        let source = match &self.source {
            ResolvedSource::Annotated(found) if found.inherited => format!(
                "{} <span class=\"muted\">(inherited from {})</span>",
                escape_html(&found.source),
                escape_html(&found.parent_identifier)
            ),
            ResolvedSource::Annotated(found) => escape_html(&found.source),
            ResolvedSource::Inferred { file } => format!(
                "<span class=\"inferred\">{}</span> <span class=\"muted\">(inferred)</span>",
                escape_html(file)
            ),
        };
        html.push_str(&format!("<div class=\"source\">📁 {}</div>\n", source));
        html.push_str(&format!(
            "<div class=\"url\">🔗 {}</div>\n",
            escape_html(&self.url)
        ));

        let id = match &self.id {
            Some(id) => format!(" <span class=\"id-name\">#{}</span>", escape_html(id)),
            None => String::new(),
        };
        html.push_str(&format!(
            "<div class=\"tag-name\">&lt;{}{}&gt;</div>\n",
            escape_html(&self.tag_name),
            id
        ));

        if !self.class_name.is_empty() {
            html.push_str(&format!(
                "<div class=\"classname\">class=\"{}\"</div>\n",
                escape_html(&self.class_name)
            ));
        }

        html.push_str("<div class=\"hint\">Ctrl+right-click: copy</div>\n");
        html
    }
}
