use anyhow::Result;

use fitlog_core::error::StoreError;
use fitlog_core::service::FitlogService;

use super::helpers::{exit_not_found, parse_date, parse_grams};

pub(crate) fn cmd_log(
    service: &mut FitlogService,
    food: &str,
    grams: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let grams = parse_grams(grams)?;
    let meal = service.create_meal(&date, food, grams)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        let id = &meal.id;
        let (g, cal, protein) = (meal.grams, meal.calories, meal.protein);
        println!("Logged {g:.0}g {food} on {date} — {cal:.1} kcal | P:{protein:.1}g [{id}]");
    }
    Ok(())
}

pub(crate) fn cmd_update(
    service: &mut FitlogService,
    meal_id: &str,
    grams: &str,
    json: bool,
) -> Result<()> {
    let grams = parse_grams(grams)?;
    match service.edit_meal(meal_id, grams) {
        Ok(meal) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&meal)?);
            } else {
                let food = &meal.food_name;
                let (g, cal, protein) = (meal.grams, meal.calories, meal.protein);
                println!("Updated meal {meal_id}: {g:.0}g {food} — {cal:.1} kcal | P:{protein:.1}g");
            }
            Ok(())
        }
        Err(StoreError::NotFound { .. }) => {
            exit_not_found(&format!("Meal {meal_id} not found"), json)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn cmd_delete(service: &mut FitlogService, meal_id: &str, json: bool) -> Result<()> {
    match service.delete_meal(meal_id) {
        Ok(()) => {
            if json {
                println!("{}", serde_json::json!({ "deleted": meal_id }));
            } else {
                println!("Deleted meal {meal_id}");
            }
            Ok(())
        }
        Err(StoreError::NotFound { .. }) => {
            exit_not_found(&format!("Meal {meal_id} not found"), json)
        }
        Err(e) => Err(e.into()),
    }
}
