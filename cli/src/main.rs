mod commands;
mod config;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_delete, cmd_exercise_add, cmd_exercise_delete, cmd_exercise_edit, cmd_food_add,
    cmd_food_delete, cmd_food_edit, cmd_food_list, cmd_log, cmd_prune, cmd_session_add,
    cmd_session_delete, cmd_session_edit, cmd_session_list, cmd_session_show, cmd_summary,
    cmd_trend, cmd_update,
};
use crate::config::Config;
use fitlog_core::service::FitlogService;

#[derive(Parser)]
#[command(
    name = "fitlog",
    version,
    about = "A simple workout & nutrition tracker CLI",
    long_about = "Track workout sessions and meals from the terminal.\n\
                  Sessions are kept for 14 days, meals for 7, foods forever."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workout sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Manage exercises within a session
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Manage the foods registry (per-100g values, kept forever)
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
    /// Log a meal against a saved food
    Log {
        /// Food name (exact match against the foods registry)
        food: String,
        /// Grams consumed (e.g. "150" or "150g")
        grams: String,
        /// Date to log for (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a meal's grams (re-derives calories/protein from the food)
    Update {
        /// Meal ID
        meal_id: String,
        /// New grams value
        grams: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a meal by ID
    Delete {
        /// Meal ID
        meal_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show meals and totals for a day (default: today)
    Summary {
        /// Date to show (YYYY-MM-DD or today/yesterday)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show daily calorie/protein totals for the last N days
    Trend {
        /// Number of days to show
        #[arg(short, long, default_value = "7")]
        days: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run retention now and report what was removed
    Prune {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Add a workout session
    Add {
        /// Session name (e.g. "Push")
        name: String,
        /// Session date (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List sessions, most recent first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a session and its exercises
    Show {
        /// Session ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename or re-date a session
    Edit {
        /// Session ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a session and its exercises
    Delete {
        /// Session ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Add an exercise to a session
    Add {
        /// Session ID
        session_id: String,
        /// Exercise name (e.g. "Bench press")
        name: String,
        /// Number of sets
        #[arg(long, default_value = "1")]
        sets: u32,
        /// Reps per set
        #[arg(long)]
        reps: u32,
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an exercise
    Edit {
        /// Session ID
        session_id: String,
        /// Exercise ID
        exercise_id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New set count
        #[arg(long)]
        sets: Option<u32>,
        /// New rep count
        #[arg(long)]
        reps: Option<u32>,
        /// New weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an exercise from a session
    Delete {
        /// Session ID
        session_id: String,
        /// Exercise ID
        exercise_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Add a food (per-100g values)
    Add {
        /// Food name (unique, case-sensitive)
        name: String,
        /// Calories per 100g
        #[arg(long)]
        calories: f64,
        /// Protein (g) per 100g
        #[arg(long)]
        protein: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved foods
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a food's per-100g values (logged meals keep their totals)
    Edit {
        /// Food name
        name: String,
        /// New calories per 100g
        #[arg(long)]
        calories: Option<f64>,
        /// New protein per 100g
        #[arg(long)]
        protein: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a food and every meal that references it
    Delete {
        /// Food name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let mut service = FitlogService::open(&config.data_dir)?;
    // Retention runs on every start, as the original tracker did on load.
    let pruned = service.prune(Local::now().date_naive())?;

    match cli.command {
        Commands::Session { command } => match command {
            SessionCommands::Add { name, date, json } => {
                cmd_session_add(&mut service, &name, date, json)
            }
            SessionCommands::List { json } => cmd_session_list(&service, json),
            SessionCommands::Show { id, json } => cmd_session_show(&service, &id, json),
            SessionCommands::Edit {
                id,
                name,
                date,
                json,
            } => cmd_session_edit(&mut service, &id, name.as_deref(), date, json),
            SessionCommands::Delete { id, json } => cmd_session_delete(&mut service, &id, json),
        },
        Commands::Exercise { command } => match command {
            ExerciseCommands::Add {
                session_id,
                name,
                sets,
                reps,
                weight,
                json,
            } => cmd_exercise_add(&mut service, &session_id, &name, sets, reps, weight, json),
            ExerciseCommands::Edit {
                session_id,
                exercise_id,
                name,
                sets,
                reps,
                weight,
                json,
            } => cmd_exercise_edit(
                &mut service,
                &session_id,
                &exercise_id,
                name.as_deref(),
                sets,
                reps,
                weight,
                json,
            ),
            ExerciseCommands::Delete {
                session_id,
                exercise_id,
                json,
            } => cmd_exercise_delete(&mut service, &session_id, &exercise_id, json),
        },
        Commands::Food { command } => match command {
            FoodCommands::Add {
                name,
                calories,
                protein,
                json,
            } => cmd_food_add(&mut service, &name, calories, protein, json),
            FoodCommands::List { json } => cmd_food_list(&service, json),
            FoodCommands::Edit {
                name,
                calories,
                protein,
                json,
            } => cmd_food_edit(&mut service, &name, calories, protein, json),
            FoodCommands::Delete { name, json } => cmd_food_delete(&mut service, &name, json),
        },
        Commands::Log {
            food,
            grams,
            date,
            json,
        } => cmd_log(&mut service, &food, &grams, date, json),
        Commands::Update {
            meal_id,
            grams,
            json,
        } => cmd_update(&mut service, &meal_id, &grams, json),
        Commands::Delete { meal_id, json } => cmd_delete(&mut service, &meal_id, json),
        Commands::Summary { date, json } => cmd_summary(&service, date, json),
        Commands::Trend { days, json } => cmd_trend(&service, days, json),
        Commands::Prune { json } => {
            cmd_prune(&pruned, json);
            Ok(())
        }
    }
}
