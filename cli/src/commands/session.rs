use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlog_core::error::StoreError;
use fitlog_core::models::Session;
use fitlog_core::service::FitlogService;

use super::helpers::{exit_not_found, parse_date, truncate};

pub(crate) fn cmd_session_add(
    service: &mut FitlogService,
    name: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let session = service.create_session(name, &date)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        let id = &session.id;
        println!("Added session '{name}' on {date} [{id}]");
    }
    Ok(())
}

pub(crate) fn cmd_session_list(service: &FitlogService, json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct SessionRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Exercises")]
        exercises: usize,
    }

    let sessions = service.sessions_sorted();

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        eprintln!("No sessions logged");
        process::exit(2);
    }

    let rows: Vec<SessionRow> = sessions
        .iter()
        .map(|s| SessionRow {
            id: s.id.clone(),
            date: s.date.clone(),
            name: truncate(&s.name, 30),
            exercises: s.exercises.len(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

pub(crate) fn cmd_session_show(service: &FitlogService, id: &str, json: bool) -> Result<()> {
    let session = match service.get_session(id) {
        Ok(session) => session,
        Err(StoreError::NotFound { .. }) => {
            exit_not_found(&format!("Session {id} not found"), json)
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(session)?);
        return Ok(());
    }

    print_session_detail(session);
    Ok(())
}

fn print_session_detail(session: &Session) {
    let date = &session.date;
    let name = &session.name;
    println!("=== {date} — {name} ===\n");

    if session.exercises.is_empty() {
        println!("  (no exercises yet)");
        return;
    }

    #[derive(Tabled)]
    struct ExerciseRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Exercise")]
        name: String,
        #[tabled(rename = "Sets")]
        sets: u32,
        #[tabled(rename = "Reps")]
        reps: u32,
        #[tabled(rename = "Weight (kg)")]
        weight: String,
    }

    let rows: Vec<ExerciseRow> = session
        .exercises
        .iter()
        .map(|e| ExerciseRow {
            id: e.id.clone(),
            name: truncate(&e.name, 30),
            sets: e.sets,
            reps: e.reps,
            weight: format!("{:.1}", e.weight),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn cmd_session_edit(
    service: &mut FitlogService,
    id: &str,
    name: Option<&str>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    if name.is_none() && date.is_none() {
        anyhow::bail!("Nothing to update. Provide at least one of --name or --date");
    }
    let date = date.map(Some).map(parse_date).transpose()?;
    match service.edit_session(id, name, date.as_deref()) {
        Ok(session) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                let name = &session.name;
                let date = &session.date;
                println!("Updated session {id}: '{name}' on {date}");
            }
            Ok(())
        }
        Err(StoreError::NotFound { .. }) => {
            exit_not_found(&format!("Session {id} not found"), json)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn cmd_session_delete(service: &mut FitlogService, id: &str, json: bool) -> Result<()> {
    match service.delete_session(id) {
        Ok(()) => {
            if json {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                println!("Deleted session {id} and its exercises");
            }
            Ok(())
        }
        Err(StoreError::NotFound { .. }) => {
            exit_not_found(&format!("Session {id} not found"), json)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn cmd_exercise_add(
    service: &mut FitlogService,
    session_id: &str,
    name: &str,
    sets: u32,
    reps: u32,
    weight: f64,
    json: bool,
) -> Result<()> {
    match service.add_exercise(session_id, name, sets, reps, weight) {
        Ok(exercise) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&exercise)?);
            } else {
                let id = &exercise.id;
                let w = exercise.weight;
                println!("Added '{name}' — {sets}x{reps} @ {w}kg [{id}]");
            }
            Ok(())
        }
        Err(e @ StoreError::NotFound { .. }) => exit_not_found(&e.to_string(), json),
        Err(e) => Err(e.into()),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_exercise_edit(
    service: &mut FitlogService,
    session_id: &str,
    exercise_id: &str,
    name: Option<&str>,
    sets: Option<u32>,
    reps: Option<u32>,
    weight: Option<f64>,
    json: bool,
) -> Result<()> {
    if name.is_none() && sets.is_none() && reps.is_none() && weight.is_none() {
        anyhow::bail!("Nothing to update. Provide at least one of --name, --sets, --reps, --weight");
    }
    match service.edit_exercise(session_id, exercise_id, name, sets, reps, weight) {
        Ok(exercise) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&exercise)?);
            } else {
                let name = &exercise.name;
                let (sets, reps, w) = (exercise.sets, exercise.reps, exercise.weight);
                println!("Updated exercise {exercise_id}: '{name}' — {sets}x{reps} @ {w}kg");
            }
            Ok(())
        }
        Err(e @ StoreError::NotFound { .. }) => exit_not_found(&e.to_string(), json),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn cmd_exercise_delete(
    service: &mut FitlogService,
    session_id: &str,
    exercise_id: &str,
    json: bool,
) -> Result<()> {
    match service.delete_exercise(session_id, exercise_id) {
        Ok(()) => {
            if json {
                println!("{}", serde_json::json!({ "deleted": exercise_id }));
            } else {
                println!("Deleted exercise {exercise_id}");
            }
            Ok(())
        }
        Err(e @ StoreError::NotFound { .. }) => exit_not_found(&e.to_string(), json),
        Err(e) => Err(e.into()),
    }
}
