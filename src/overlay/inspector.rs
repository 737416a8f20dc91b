//! Inspector event handling, toggle and status

use super::{
    copy_text, place_tooltip, scrub_class, Clipboard, EventSource, InputEvent, InspectorState,
    Key, Page, Storage, TooltipView, ACK_CLASS, ACK_TEXT, HIGHLIGHT_CLASS, TOOLTIP_CLASS,
};
use crate::config::{Config, TooltipConfig};
use crate::dom::{Dom, NodeId};
use crate::env::is_local_hostname;
use crate::lookup::resolve_source;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Key that arms the inspector
const MODIFIER: Key = Key::Control;

/// Reported by [`Inspector::status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub enabled: bool,
    pub localhost: bool,
}

/// Clipboard path that succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyMethod {
    ClipboardApi,
    LegacyCommand,
}

/// Result of a copy action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    pub text: String,
    /// `None` when both clipboard paths failed
    pub method: Option<CopyMethod>,
    /// Acknowledgment element, shown only on success
    #[serde(skip)]
    pub ack: Option<NodeId>,
}

/// What handling one event did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    /// Nothing to do for this event in the current state
    Ignored,
    /// Modifier went down while enabled
    Armed,
    /// Tooltip shown or moved
    Inspected(TooltipView),
    /// Secondary click handled; the default context menu is suppressed
    Copied(CopyReport),
    /// Secondary click while armed but not over an element
    Suppressed,
    /// Back to idle, tooltip hidden
    Reset,
    /// Acknowledgments removed by a clock tick
    AckExpired { count: usize },
    /// Enabled flag changed and persisted
    Toggled { enabled: bool },
}

impl EventOutcome {
    /// Whether the host should cancel the event's default action
    pub fn prevent_default(&self) -> bool {
        matches!(self, EventOutcome::Copied(_) | EventOutcome::Suppressed)
    }
}

struct Ack {
    node: NodeId,
    expires_at_ms: u64,
}

/// Hover inspector attached to one page
///
/// Owns the page and reads or writes the enabled flag through `S`; copies
/// go through `C`.
pub struct Inspector<S: Storage, C: Clipboard> {
    page: Page,
    storage: S,
    clipboard: C,
    storage_key: String,
    tooltip_config: TooltipConfig,
    ack_duration_ms: u64,
    localhost: bool,
    enabled: bool,
    state: InspectorState,
    tooltip: NodeId,
    view: Option<TooltipView>,
    acks: Vec<Ack>,
    now_ms: u64,
}

impl<S: Storage, C: Clipboard> Inspector<S, C> {
    /// Attach to a page in a development context
    ///
    /// Returns `None` (and logs) when the page host is not a local host and
    /// `config.force_dev` is off. The enabled flag starts from storage: a
    /// missing value means enabled, only `"false"` disables.
    pub fn attach(page: Page, storage: S, clipboard: C, config: &Config) -> Option<Self> {
        let localhost = is_local_hostname(&page.location.hostname);
        if !localhost && !config.force_dev {
            info!("[srcspot] production environment - disabled");
            return None;
        }

        let enabled = storage
            .get(&config.storage_key)
            .map_or(true, |value| value != "false");

        let mut page = page;
        let tooltip = page.dom.create_element("div");
        page.dom.set_attr(tooltip, "class", TOOLTIP_CLASS);
        page.dom.style_set(tooltip, "display", "none");
        let body = page.dom.body();
        if let Err(e) = page.dom.append_child(body, tooltip) {
            warn!("[srcspot] failed to insert tooltip: {}", e);
        }

        info!("[srcspot] active - hold Ctrl and move the pointer to inspect, Ctrl+right-click to copy");
        debug!(
            "[srcspot] attached to {} (localhost: {}, enabled: {})",
            page.location.href, localhost, enabled
        );

        Some(Self {
            page,
            storage,
            clipboard,
            storage_key: config.storage_key.clone(),
            tooltip_config: config.tooltip,
            ack_duration_ms: config.ack_duration_ms,
            localhost,
            enabled,
            state: InspectorState::Idle,
            tooltip,
            view: None,
            acks: Vec::new(),
            now_ms: 0,
        })
    }

    pub fn dom(&self) -> &Dom {
        &self.page.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.page.dom
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn state(&self) -> InspectorState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tooltip element in the page
    pub fn tooltip_element(&self) -> NodeId {
        self.tooltip
    }

    /// Tooltip contents while visible
    pub fn tooltip(&self) -> Option<&TooltipView> {
        self.view.as_ref()
    }

    /// Acknowledgment elements still on screen
    pub fn active_acks(&self) -> Vec<NodeId> {
        self.acks.iter().map(|a| a.node).collect()
    }

    /// Enable, disable (`Some`) or flip (`None`) the inspector
    ///
    /// Persists the result and returns it. Any inspection in progress ends.
    pub fn toggle(&mut self, state: Option<bool>) -> bool {
        self.enabled = state.unwrap_or(!self.enabled);

        let value = if self.enabled { "true" } else { "false" };
        if let Err(e) = self.storage.set(&self.storage_key, value) {
            warn!("[srcspot] failed to persist enabled flag: {}", e);
        }

        self.reset();
        info!(
            "[srcspot] {}",
            if self.enabled { "enabled" } else { "disabled" }
        );
        self.enabled
    }

    pub fn status(&self) -> Status {
        let status = Status {
            enabled: self.enabled,
            localhost: self.localhost,
        };
        info!(
            "[srcspot] status: {}, environment: {}",
            if status.enabled { "enabled" } else { "disabled" },
            if status.localhost { "localhost" } else { "production" }
        );
        status
    }

    /// Handle one input event
    pub fn dispatch(&mut self, event: &InputEvent) -> EventOutcome {
        match *event {
            InputEvent::KeyDown { key } => self.on_key_down(key),
            InputEvent::KeyUp { key } => self.on_key_up(key),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            InputEvent::ContextMenu { x, y } => self.on_context_menu(x, y),
            InputEvent::Blur => self.on_blur(),
            InputEvent::Tick { now_ms } => self.on_tick(now_ms),
            InputEvent::Toggle { value } => EventOutcome::Toggled {
                enabled: self.toggle(value),
            },
        }
    }

    /// Drain `source`, reporting every event with its outcome
    pub fn run<E, F>(&mut self, mut source: E, mut on_outcome: F)
    where
        E: EventSource,
        F: FnMut(&InputEvent, &EventOutcome),
    {
        while let Some(event) = source.next_event() {
            let outcome = self.dispatch(&event);
            on_outcome(&event, &outcome);
        }
    }

    fn on_key_down(&mut self, key: Key) -> EventOutcome {
        if key != MODIFIER || !self.enabled {
            return EventOutcome::Ignored;
        }
        if self.state == InspectorState::Idle {
            debug!("[srcspot] idle -> armed");
            self.state = InspectorState::Armed;
        }
        EventOutcome::Armed
    }

    fn on_key_up(&mut self, key: Key) -> EventOutcome {
        if key != MODIFIER {
            return EventOutcome::Ignored;
        }
        self.reset();
        EventOutcome::Reset
    }

    fn on_blur(&mut self) -> EventOutcome {
        self.reset();
        EventOutcome::Reset
    }

    fn on_pointer_move(&mut self, x: i32, y: i32) -> EventOutcome {
        if !self.state.is_armed() || !self.enabled {
            return EventOutcome::Ignored;
        }

        let Some(element) = self.hit_test(x, y) else {
            return EventOutcome::Ignored;
        };

        if let Some(previous) = self.state.element() {
            if previous != element {
                self.page.dom.class_remove(previous, HIGHLIGHT_CLASS);
            }
        }
        self.page.dom.class_add(element, HIGHLIGHT_CLASS);
        if self.state.element() != Some(element) {
            debug!(
                "[srcspot] inspecting <{}>",
                self.page.dom.tag_name(element)
            );
        }
        self.state = InspectorState::Inspecting { element };

        let view = self.show_tooltip(element, x, y);
        EventOutcome::Inspected(view)
    }

    fn on_context_menu(&mut self, x: i32, y: i32) -> EventOutcome {
        if !self.state.is_armed() || !self.enabled {
            return EventOutcome::Ignored;
        }

        let Some(element) = self.hit_test(x, y) else {
            return EventOutcome::Suppressed;
        };

        let source = resolve_source(&self.page.dom, element, &self.page.location);
        let text = copy_text(&self.page.dom, element, &self.page.location, &source);
        EventOutcome::Copied(self.copy_to_clipboard(text, x, y))
    }

    fn on_tick(&mut self, now_ms: u64) -> EventOutcome {
        self.now_ms = self.now_ms.max(now_ms);

        let now = self.now_ms;
        let (expired, live): (Vec<Ack>, Vec<Ack>) = std::mem::take(&mut self.acks)
            .into_iter()
            .partition(|ack| ack.expires_at_ms <= now);
        self.acks = live;

        if expired.is_empty() {
            return EventOutcome::Ignored;
        }
        for ack in &expired {
            if let Err(e) = self.page.dom.remove(ack.node) {
                debug!("[srcspot] acknowledgment already gone: {}", e);
            }
        }
        EventOutcome::AckExpired {
            count: expired.len(),
        }
    }

    /// Element under the point, excluding the tooltip itself
    fn hit_test(&self, x: i32, y: i32) -> Option<NodeId> {
        let element = self.page.dom.element_from_point(x, y)?;
        if element == self.tooltip || self.page.dom.is_descendant_of(element, self.tooltip) {
            return None;
        }
        Some(element)
    }

    fn show_tooltip(&mut self, element: NodeId, x: i32, y: i32) -> TooltipView {
        let dom = &self.page.dom;
        let (left, top) = place_tooltip(x, y, self.page.viewport, &self.tooltip_config);
        let view = TooltipView {
            source: resolve_source(dom, element, &self.page.location),
            url: self.page.location.href.clone(),
            tag_name: dom.tag_name(element).to_string(),
            id: dom.id_attr(element).map(str::to_string),
            class_name: scrub_class(dom.class_name(element)),
            left,
            top,
        };

        let dom = &mut self.page.dom;
        dom.style_set(self.tooltip, "left", &format!("{}px", left));
        dom.style_set(self.tooltip, "top", &format!("{}px", top));
        dom.style_set(self.tooltip, "display", "block");
        dom.set_inner_html(self.tooltip, &view.to_html());
        debug!("[srcspot] tooltip: {}", view.source_line());

        self.view = Some(view.clone());
        view
    }

    /// Hide the tooltip, clear the highlight and return to idle
    fn reset(&mut self) {
        self.page.dom.style_set(self.tooltip, "display", "none");
        self.page.dom.set_inner_html(self.tooltip, "");
        self.view = None;
        if let Some(element) = self.state.element() {
            self.page.dom.class_remove(element, HIGHLIGHT_CLASS);
        }
        if self.state != InspectorState::Idle {
            debug!("[srcspot] -> idle");
        }
        self.state = InspectorState::Idle;
    }

    fn copy_to_clipboard(&mut self, text: String, x: i32, y: i32) -> CopyReport {
        let method = match self.clipboard.write_text(&text) {
            Ok(()) => Some(CopyMethod::ClipboardApi),
            Err(e) => {
                debug!("[srcspot] clipboard API failed ({}), using copy command", e);
                self.legacy_copy(&text)
            }
        };

        let ack = match method {
            Some(_) => {
                info!("[srcspot] copied:\n{}", text);
                self.show_ack(x, y)
            }
            None => {
                warn!("[srcspot] copy failed on both clipboard paths");
                None
            }
        };

        CopyReport { text, method, ack }
    }

    /// Copy through an off-screen textarea and the legacy copy command
    fn legacy_copy(&mut self, text: &str) -> Option<CopyMethod> {
        let dom = &mut self.page.dom;
        let textarea = dom.create_element("textarea");
        dom.set_value(textarea, text);
        dom.style_set(textarea, "position", "fixed");
        dom.style_set(textarea, "opacity", "0");
        let body = dom.body();
        if let Err(e) = dom.append_child(body, textarea) {
            warn!("[srcspot] failed to insert copy buffer: {}", e);
            return None;
        }

        dom.select(textarea);
        let selection = dom.selection().unwrap_or_default().to_string();
        let result = self.clipboard.copy_selection(&selection);

        let dom = &mut self.page.dom;
        dom.clear_selection();
        if let Err(e) = dom.remove(textarea) {
            debug!("[srcspot] copy buffer already removed: {}", e);
        }

        match result {
            Ok(()) => Some(CopyMethod::LegacyCommand),
            Err(e) => {
                warn!("[srcspot] copy command failed: {}", e);
                None
            }
        }
    }

    fn show_ack(&mut self, x: i32, y: i32) -> Option<NodeId> {
        let dom = &mut self.page.dom;
        let ack = dom.create_element("div");
        dom.set_attr(ack, "class", ACK_CLASS);
        dom.set_text_content(ack, ACK_TEXT);
        dom.style_set(ack, "left", &format!("{}px", x));
        dom.style_set(ack, "top", &format!("{}px", y));
        let body = dom.body();
        if let Err(e) = dom.append_child(body, ack) {
            warn!("[srcspot] failed to show acknowledgment: {}", e);
            return None;
        }

        self.acks.push(Ack {
            node: ack,
            expires_at_ms: self.now_ms.saturating_add(self.ack_duration_ms),
        });
        Some(ack)
    }
}
