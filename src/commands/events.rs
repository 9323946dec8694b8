//! Implementation of the `taskroute events` command.

use crate::cli::EventsArgs;
use crate::context::RouteContext;
use crate::error::Result;
use crate::events::{Event, read_events};

/// Execute the `taskroute events` command.
pub fn cmd_events(args: EventsArgs) -> Result<()> {
    let ctx = RouteContext::resolve()?;
    let events = read_events(&ctx)?;

    if events.is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    for event in tail(&events, args.tail) {
        println!("{}", format_event(event));
    }
    Ok(())
}

fn tail(events: &[Event], n: usize) -> &[Event] {
    if n == 0 || n >= events.len() {
        events
    } else {
        &events[events.len() - n..]
    }
}

fn format_event(event: &Event) -> String {
    let mut line = format!(
        "{}  {:18} {}",
        event.ts.format("%Y-%m-%d %H:%M:%S"),
        event.action.to_string(),
        event.agent.as_deref().unwrap_or("-")
    );
    if let Some(details) = event.details.as_object()
        && !details.is_empty()
    {
        line.push_str("  ");
        line.push_str(&event.details.to_string());
    }
    line
}
