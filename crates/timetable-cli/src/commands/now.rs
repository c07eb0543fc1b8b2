use std::sync::Arc;

use chrono::NaiveDateTime;
use clap::Args;
use timetable_core::{Clock, CoreError, FixedClock, ScheduleTracker, SystemClock};

use super::Context;
use crate::render;

#[derive(Args)]
pub struct NowArgs {
    /// Person name (defaults to the selected one)
    #[arg(long)]
    pub person: Option<String>,
    /// Evaluate at this local time instead of now (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_parser = parse_local_datetime)]
    pub at: Option<NaiveDateTime>,
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn parse_local_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("expected YYYY-MM-DDTHH:MM[:SS], got '{value}'"))
}

pub async fn run(ctx: &Context, args: NowArgs) -> timetable_core::Result<()> {
    let person = ctx.resolve_person(args.person.as_deref())?;
    let clock: Arc<dyn Clock> = match args.at {
        Some(at) => Arc::new(FixedClock::new(at)),
        None => Arc::new(SystemClock),
    };

    let tracker = ScheduleTracker::new(clock);
    tracker.select(&ctx.loader, &person).await?;
    let snap = tracker
        .latest()
        .ok_or_else(|| CoreError::Custom(format!("no state published for {}", person.name)))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*snap)?);
    } else {
        print!("{}", render::snapshot(&snap, ctx.config.time_format()));
    }
    Ok(())
}
