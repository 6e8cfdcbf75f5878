use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlog_core::service::FitlogService;

use super::helpers::{parse_per_100g, truncate};

pub(crate) fn cmd_food_add(
    service: &mut FitlogService,
    name: &str,
    calories: f64,
    protein: f64,
    json: bool,
) -> Result<()> {
    let calories = parse_per_100g("Calories", calories)?;
    let protein = parse_per_100g("Protein", protein)?;
    service.add_food(name, calories, protein)?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "name": name,
                "calories_per_100g": calories,
                "protein_per_100g": protein,
            })
        );
    } else {
        println!("Added food '{name}' — {calories:.0} kcal / {protein:.1}g protein per 100g");
    }
    Ok(())
}

pub(crate) fn cmd_food_list(service: &FitlogService, json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Cal/100g")]
        calories: String,
        #[tabled(rename = "P/100g")]
        protein: String,
    }

    let foods = service.foods();

    if json {
        println!("{}", serde_json::to_string_pretty(foods)?);
        return Ok(());
    }

    if foods.is_empty() {
        eprintln!("No foods saved");
        process::exit(2);
    }

    let rows: Vec<FoodRow> = foods
        .iter()
        .map(|(name, f)| FoodRow {
            name: truncate(name, 35),
            calories: format!("{:.0}", f.calories_per_100g),
            protein: format!("{:.1}", f.protein_per_100g),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

pub(crate) fn cmd_food_edit(
    service: &mut FitlogService,
    name: &str,
    calories: Option<f64>,
    protein: Option<f64>,
    json: bool,
) -> Result<()> {
    if calories.is_none() && protein.is_none() {
        anyhow::bail!("Nothing to update. Provide at least one of --calories or --protein");
    }
    let current = service
        .foods()
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("No food named '{name}'"))?
        .clone();
    let calories = parse_per_100g("Calories", calories.unwrap_or(current.calories_per_100g))?;
    let protein = parse_per_100g("Protein", protein.unwrap_or(current.protein_per_100g))?;
    service.edit_food(name, calories, protein)?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "name": name,
                "calories_per_100g": calories,
                "protein_per_100g": protein,
            })
        );
    } else {
        println!("Updated food '{name}' — {calories:.0} kcal / {protein:.1}g protein per 100g");
        println!("Note: already-logged meals keep their recorded totals");
    }
    Ok(())
}

pub(crate) fn cmd_food_delete(service: &mut FitlogService, name: &str, json: bool) -> Result<()> {
    let removed = service.delete_food(name)?;
    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": name, "meals_removed": removed })
        );
    } else if removed == 0 {
        println!("Deleted food '{name}'");
    } else {
        println!("Deleted food '{name}' and {removed} meal(s) that referenced it");
    }
    Ok(())
}
