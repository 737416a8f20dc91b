use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use srcspot::attribution::Emitter;
use srcspot::cli::{Cli, Command};
use srcspot::config::Config;
use srcspot::dom::Dom;
use srcspot::env::DevContext;
use srcspot::lookup::{element_identifier, resolve_source, ResolvedSource};
use srcspot::overlay::{
    Clipboard, EventOutcome, InputEvent, Inspector, JsonFileStorage, MemoryClipboard,
    MemoryStorage, NoClipboardApi, Page, Storage, Viewport,
};
use srcspot::scenario::Scenario;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

#[derive(Serialize)]
struct ReplayLine<'a> {
    event: &'a InputEvent,
    outcome: &'a EventOutcome,
    prevent_default: bool,
}

#[derive(Serialize)]
struct LookupReport<'a> {
    element: String,
    source: &'a ResolvedSource,
}

fn check_host(host: &str, force: bool, config: &Config) {
    let context = DevContext::for_host(host).with_force(force || config.force_dev);
    let verdict = if context.is_dev() {
        "development"
    } else {
        "production"
    };
    println!("{}: {}", host, verdict);
}

fn script_tag(
    host: &str,
    force: bool,
    base: Option<&str>,
    path: Option<&str>,
    config: &Config,
) {
    let emitter = Emitter::from_config(DevContext::for_host(host).with_force(force), config);
    let tag = match (base, path) {
        (Some(base), _) => emitter.script_tag_absolute(base),
        (None, Some(path)) => emitter.script_tag_at(path),
        (None, None) => emitter.script_tag(),
    };
    println!("{}", tag);
}

fn replay_with<S: Storage, C: Clipboard>(
    page: Page,
    events: Vec<InputEvent>,
    storage: S,
    clipboard: C,
    config: &Config,
) -> Result<()> {
    let Some(mut inspector) = Inspector::attach(page, storage, clipboard, config) else {
        println!("{}", serde_json::json!({ "attached": false }));
        return Ok(());
    };

    let mut result: Result<()> = Ok(());
    inspector.run(events.into_iter(), |event, outcome| {
        if result.is_err() {
            return;
        }
        result = print_json(&ReplayLine {
            event,
            outcome,
            prevent_default: outcome.prevent_default(),
        });
    });
    result?;

    print_json(&inspector.status())
}

fn replay(
    scenario_path: &Path,
    state: Option<&Path>,
    force: bool,
    no_clipboard_api: bool,
    config: &Config,
) -> Result<()> {
    let scenario = Scenario::from_file(scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;
    let page = scenario.build_page().context("Invalid scenario element tree")?;
    let events = scenario.events;

    let mut config = config.clone();
    config.force_dev |= force;

    match (state, no_clipboard_api) {
        (Some(path), false) => {
            let storage = JsonFileStorage::open(path)
                .with_context(|| format!("Failed to open state file {}", path.display()))?;
            replay_with(page, events, storage, MemoryClipboard::new(), &config)
        }
        (Some(path), true) => {
            let storage = JsonFileStorage::open(path)
                .with_context(|| format!("Failed to open state file {}", path.display()))?;
            replay_with(page, events, storage, NoClipboardApi::new(), &config)
        }
        (None, false) => replay_with(
            page,
            events,
            MemoryStorage::new(),
            MemoryClipboard::new(),
            &config,
        ),
        (None, true) => replay_with(
            page,
            events,
            MemoryStorage::new(),
            NoClipboardApi::new(),
            &config,
        ),
    }
}

fn lookup(scenario_path: &Path, at: (i32, i32)) -> Result<()> {
    let scenario = Scenario::from_file(scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;
    let page = scenario.build_page().context("Invalid scenario element tree")?;

    let (x, y) = at;
    let Some(element) = page.dom.element_from_point(x, y) else {
        bail!("No element at {},{}", x, y);
    };

    let source = resolve_source(&page.dom, element, &page.location);
    print_json(&LookupReport {
        element: element_identifier(&page.dom, element),
        source: &source,
    })
}

fn toggle(state: &Path, value: Option<bool>, config: &Config) -> Result<()> {
    let storage = JsonFileStorage::open(state)
        .with_context(|| format!("Failed to open state file {}", state.display()))?;
    let page = Page::new(Dom::new(), "http://localhost/", Viewport::default());

    let Some(mut inspector) = Inspector::attach(page, storage, MemoryClipboard::new(), config)
    else {
        bail!("Inspector refused to attach to a local page");
    };
    inspector.toggle(value);
    print_json(&inspector.status())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::CheckHost { host, force } => check_host(&host, force, &config),
        Command::ScriptTag {
            host,
            force,
            base,
            path,
        } => script_tag(&host, force, base.as_deref(), path.as_deref(), &config),
        Command::Replay {
            scenario,
            state,
            force,
            no_clipboard_api,
        } => replay(&scenario, state.as_deref(), force, no_clipboard_api, &config)?,
        Command::Lookup { scenario, at } => lookup(&scenario, at)?,
        Command::Toggle { state, value } => toggle(&state, value.map(|v| v.as_bool()), &config)?,
    }

    Ok(())
}
