use super::Viewport;
use crate::dom::Dom;
use crate::location::PageLocation;

/// Document the inspector attaches to
#[derive(Debug, Clone)]
pub struct Page {
    pub dom: Dom,
    pub location: PageLocation,
    pub viewport: Viewport,
}

impl Page {
    pub fn new(dom: Dom, href: &str, viewport: Viewport) -> Self {
        Self {
            dom,
            location: PageLocation::parse(href),
            viewport,
        }
    }
}
