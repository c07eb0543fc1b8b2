use timetable_core::timetable::day_key;
use timetable_core::{load_index, ScheduleIndex, TimetableLoader};

use super::Context;
use crate::render;

pub async fn run(
    ctx: &Context,
    person: Option<&str>,
    strict: bool,
    json: bool,
) -> timetable_core::Result<()> {
    let person = ctx.resolve_person(person)?;
    let index = if strict {
        load_index(&ctx.loader, &person).await?
    } else {
        let build = ScheduleIndex::build_lenient(ctx.loader.load(&person).await?);
        for err in &build.dropped {
            eprintln!("warning: skipped {err}");
        }
        build.index
    };

    if json {
        let days: Vec<serde_json::Value> = index
            .week()
            .map(|(day, classes)| -> Result<_, serde_json::Error> {
                let mut entry = serde_json::Map::new();
                entry.insert("day".into(), day_key(day).into());
                entry.insert("classes".into(), serde_json::to_value(classes)?);
                Ok(serde_json::Value::Object(entry))
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        println!("{}", person.name);
        print!("{}", render::week(&index, ctx.config.time_format()));
    }
    Ok(())
}
