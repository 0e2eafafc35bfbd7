// Demo: drives a SessionTracker against the in-process loopback SDK.
//
// Replays a typical event sequence (agent data, persistence, connection
// outcome) and prints the state the UI would render after each step.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use livechat_session::sdk::loopback::{LoopbackSdk, Outcome};
use livechat_session::{
    EventCatalog, SessionState, SessionTracker, StartOptions, TrackerOptions,
};

#[derive(Debug, Parser)]
#[command(name = "livechat-session-demo", version, about)]
struct Args {
    /// Account identifier passed to start
    #[arg(long, default_value = "demo_account")]
    account: String,

    /// Service identifier passed to start
    #[arg(long, default_value = "demo_service")]
    service: String,

    /// Make the connection-start operation fail
    #[arg(long)]
    fail_start: bool,

    /// Make the connection-start operation never complete
    #[arg(long, conflicts_with = "fail_start", requires = "timeout_ms")]
    hang_start: bool,

    /// Bound on the connection-start operation, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Also listen for the terminatebutton event
    #[arg(long)]
    extended_catalog: bool,

    /// Event catalog as a JSON object (overrides --extended-catalog),
    /// e.g. '{"agentdata": "agentdata", "persistence": "persistence", "terminate": "observe"}'
    #[arg(long)]
    catalog: Option<String>,
}

fn render(step: &str, state: SessionState) {
    log::info!(
        "{step:<28} status={:<12} agents={:<3} button={}",
        state.status.to_string(),
        state.agent_count,
        if state.available { "Start Chat" } else { "Unavailable" }
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let catalog = match args.catalog.as_deref() {
        Some(json) => EventCatalog::from_json(json).context("invalid --catalog")?,
        None if args.extended_catalog => EventCatalog::extended(),
        None => EventCatalog::standard(),
    };

    let mut builder = TrackerOptions::builder()
        .account_id(args.account.as_str())
        .service_id(args.service.as_str())
        .start_options(StartOptions {
            block_side_tab: true,
            developer_mode: true,
        })
        .catalog(catalog)
        .add_action("my_custom_action");
    if let Some(ms) = args.timeout_ms {
        builder = builder.connect_timeout(Duration::from_millis(ms));
    }

    let sdk = Arc::new(LoopbackSdk::new());
    if args.fail_start {
        sdk.set_start_outcome(Outcome::Fail("backend rejected the connection".into()));
    } else if args.hang_start {
        sdk.set_start_outcome(Outcome::Hang);
    }

    let mut tracker = SessionTracker::new(sdk.clone(), builder.build())?;
    let mut actions = tracker
        .take_action_receiver()
        .context("action receiver already taken")?;
    tracker.attach()?;
    render("attached", tracker.state());

    sdk.emit(
        "agentdata",
        json!({ "available": false, "data": { "chat": { "agents": 0 } } }),
    );
    render("agentdata (none online)", tracker.state());

    sdk.emit(
        "agentdata",
        json!({ "available": true, "data": { "chat": { "agents": 3 } } }),
    );
    render("agentdata (3 online)", tracker.state());

    sdk.emit("persistence", json!({}));
    render("persistence", tracker.state());

    let status = tracker.begin_connection().await?;
    render(&format!("start -> {status}"), tracker.state());

    if tracker.state().available {
        let outcome = tracker.create_or_resume_session(None).await?;
        log::info!("chat: {outcome:?}");

        sdk.emit_action("my_custom_action", "action-1", json!(["data1", "data2"]));
        if let Ok(action) = actions.try_recv() {
            log::info!("operator action {} -> {}", action.name.as_str(), action.data);
        }

        tracker.send_message("Hello from the demo");
        tracker.end_session(true);
    }

    let removed = tracker.detach();
    log::info!("detached {removed} event(s); {} callback(s) left", sdk.total_listeners());
    Ok(())
}
