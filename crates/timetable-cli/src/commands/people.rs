use super::Context;

pub fn run(ctx: &Context, json: bool) -> timetable_core::Result<()> {
    let people = ctx.loader.available_people()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&people)?);
        return Ok(());
    }

    if people.is_empty() {
        eprintln!("no timetables in {}", ctx.loader.dir().display());
        return Ok(());
    }
    let selected = ctx.config.selected_person.as_deref();
    for person in people {
        let marker = if Some(person.name.as_str()) == selected { "*" } else { " " };
        println!("{marker} {}", person.name);
    }
    Ok(())
}

pub fn select(mut ctx: Context, name: &str) -> timetable_core::Result<()> {
    let person = ctx.loader.find_person(name)?;
    ctx.config.set("selected_person", &person.name)?;
    println!("selected {}", person.name);
    Ok(())
}
