use anyhow::Result;
use chrono::Local;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlog_core::models::PruneSummary;
use fitlog_core::service::FitlogService;

use super::helpers::parse_date;

pub(crate) fn cmd_summary(
    service: &FitlogService,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let meals = service.meals_on(&date)?;
    let (total_cal, total_protein) = service.totals_for(&date)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "date": date,
                "meals": meals,
                "total_calories": total_cal,
                "total_protein": total_protein,
            }))?
        );
        return Ok(());
    }

    if meals.is_empty() {
        eprintln!("No meals for {date}");
        process::exit(2);
    }

    println!("=== {date} ===\n");
    for m in &meals {
        let id = &m.id;
        let (time, food) = (&m.time, &m.food_name);
        let (g, cal, protein) = (m.grams, m.calories, m.protein);
        println!("  [{id}] {time} {food} — {g:.0}g — {cal:.1} kcal | P:{protein:.1}g");
    }
    println!();
    println!("  TOTAL: {total_cal:.1} kcal | P:{total_protein:.1}g");

    Ok(())
}

pub(crate) fn cmd_trend(service: &FitlogService, days: i64, json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct TrendRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
    }

    let today = Local::now().date_naive();
    let buckets = service.trend(days, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
        return Ok(());
    }

    if buckets
        .iter()
        .all(|b| b.calories.abs() < f64::EPSILON && b.protein.abs() < f64::EPSILON)
    {
        eprintln!("No meals in the last {days} days");
        process::exit(2);
    }

    let rows: Vec<TrendRow> = buckets
        .iter()
        .map(|b| TrendRow {
            date: b.date.clone(),
            calories: format!("{:.0}", b.calories),
            protein: format!("{:.1}g", b.protein),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

pub(crate) fn cmd_prune(summary: &PruneSummary, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "sessions_removed": summary.sessions_removed,
                "meals_removed": summary.meals_removed,
            })
        );
    } else {
        let (s, m) = (summary.sessions_removed, summary.meals_removed);
        println!("Pruned {s} session(s) older than 14 days and {m} meal(s) older than 7 days");
    }
}
