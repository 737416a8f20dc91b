//! Scripted inspector sessions
//!
//! A scenario is a JSON file describing a page (address, viewport, element
//! tree with layout boxes) and the input events to replay against it.
//!
//! ```json
//! {
//!   "href": "http://localhost/index.php",
//!   "viewport": { "width": 1280, "height": 800 },
//!   "body_rect": { "x": 0, "y": 0, "width": 1280, "height": 800 },
//!   "elements": [
//!     { "tag": "div", "attrs": { "data-source": "page.php:7" },
//!       "rect": { "x": 0, "y": 0, "width": 400, "height": 200 },
//!       "children": [ { "tag": "span", "rect": { "x": 10, "y": 10, "width": 50, "height": 20 } } ] }
//!   ],
//!   "events": [
//!     { "type": "key_down", "key": "control" },
//!     { "type": "pointer_move", "x": 20, "y": 15 }
//!   ]
//! }
//! ```

use crate::dom::{Dom, NodeId, Rect};
use crate::error::{Error, Result};
use crate::overlay::{InputEvent, Page, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Element and its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

/// Page plus the events to replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub href: String,
    #[serde(default)]
    pub viewport: Viewport,
    /// Layout box of the body; defaults to the whole viewport
    #[serde(default)]
    pub body_rect: Option<Rect>,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Build the element tree under `body`
    pub fn build_dom(&self) -> Result<Dom> {
        let mut dom = Dom::new();
        let body = dom.body();
        let body_rect = self.body_rect.unwrap_or(Rect::new(
            0,
            0,
            self.viewport.width,
            self.viewport.height,
        ));
        dom.set_rect(body, Some(body_rect));

        for spec in &self.elements {
            append_spec(&mut dom, body, spec)?;
        }
        Ok(dom)
    }

    pub fn build_page(&self) -> Result<Page> {
        Ok(Page::new(self.build_dom()?, &self.href, self.viewport))
    }
}

fn append_spec(dom: &mut Dom, parent: NodeId, spec: &ElementSpec) -> Result<NodeId> {
    if spec.tag.trim().is_empty() {
        return Err(Error::InvalidTree("element without a tag".into()));
    }

    let node = dom.create_element(&spec.tag);
    for (name, value) in &spec.attrs {
        dom.set_attr(node, name, value);
    }
    dom.set_rect(node, spec.rect);
    if let Some(text) = &spec.text {
        dom.set_text_content(node, text);
    }
    dom.append_child(parent, node)?;

    for child in &spec.children {
        append_spec(dom, node, child)?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::SOURCE_ATTR;
    use crate::lookup::find_nearest_source;

    const SCENARIO: &str = r#"{
        "href": "http://localhost/index.php",
        "viewport": { "width": 800, "height": 600 },
        "elements": [
            { "tag": "div", "attrs": { "data-source": "page.php:7", "id": "main" },
              "rect": { "x": 0, "y": 0, "width": 400, "height": 200 },
              "children": [
                { "tag": "span", "rect": { "x": 10, "y": 10, "width": 50, "height": 20 } }
              ] }
        ],
        "events": [
            { "type": "key_down", "key": "control" },
            { "type": "pointer_move", "x": 20, "y": 15 },
            { "type": "blur" }
        ]
    }"#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        assert_eq!(scenario.events.len(), 3);
        assert_eq!(scenario.viewport.width, 800);
        assert_eq!(scenario.elements[0].children.len(), 1);
    }

    #[test]
    fn test_build_dom_from_scenario() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        let dom = scenario.build_dom().unwrap();

        let span = dom.element_from_point(20, 15).unwrap();
        assert_eq!(dom.tag_name(span), "span");
        let found = find_nearest_source(&dom, span).unwrap();
        assert_eq!(found.source, "page.php:7");
        assert_eq!(found.parent_identifier, "div#main");
        assert_eq!(dom.attr(found.element, SOURCE_ATTR), Some("page.php:7"));

        // Body covers the viewport by default
        assert_eq!(dom.element_from_point(700, 500), Some(dom.body()));
    }

    #[test]
    fn test_minimal_scenario_defaults() {
        let scenario = Scenario::from_json(r#"{ "href": "http://localhost/" }"#).unwrap();
        assert_eq!(scenario.viewport, Viewport::default());
        assert!(scenario.events.is_empty());
        let page = scenario.build_page().unwrap();
        assert_eq!(page.location.hostname, "localhost");
    }

    #[test]
    fn test_empty_tag_rejected() {
        let scenario =
            Scenario::from_json(r#"{ "href": "http://localhost/", "elements": [ { "tag": "" } ] }"#)
                .unwrap();
        assert!(scenario.build_dom().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Scenario::from_json("{").unwrap_err(),
            Error::Json(_)
        ));
    }
}
