use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use timetable_core::{spawn_ticker, ScheduleTracker, SystemClock};

use super::Context;
use crate::render;

#[derive(Args)]
pub struct WatchArgs {
    /// Person name (defaults to the selected one)
    #[arg(long)]
    pub person: Option<String>,
    /// Refresh interval in milliseconds (defaults to tick_interval_ms)
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Exit after printing this many snapshots
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,
    /// Print one JSON snapshot per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: WatchArgs) -> timetable_core::Result<()> {
    let person = ctx.resolve_person(args.person.as_deref())?;
    let period = args
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| ctx.config.tick_interval());
    let fmt = ctx.config.time_format();

    let tracker = Arc::new(ScheduleTracker::new(Arc::new(SystemClock)));
    let mut rx = tracker.subscribe();
    tracker.select(&ctx.loader, &person).await?;
    let ticker = spawn_ticker(tracker.clone(), period);
    tracing::info!(person = %person.name, ?period, "watching");

    let mut printed = 0u64;
    let result: timetable_core::Result<()> = loop {
        let snap = rx.borrow_and_update().clone();
        if let Some(snap) = snap {
            if args.json {
                match serde_json::to_string(&*snap) {
                    Ok(line) => println!("{line}"),
                    Err(e) => break Err(e.into()),
                }
            } else {
                println!("{}", render::snapshot(&snap, fmt));
            }
            printed += 1;
            if args.count.is_some_and(|n| printed >= n) {
                break Ok(());
            }
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
            }
            _ = tokio::signal::ctrl_c() => break Ok(()),
        }
    };

    ticker.stop().await;
    result
}
