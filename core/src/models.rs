use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Sessions older than this many days are pruned.
pub const SESSION_RETENTION_DAYS: i64 = 14;
/// Meals older than this many days are pruned. Foods are kept forever.
pub const MEAL_RETENTION_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    /// Calendar day in `YYYY-MM-DD` form.
    pub date: String,
    /// RFC 3339 creation timestamp; tiebreaker for same-day sessions.
    pub created_at: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

/// Nutritional reference, keyed by exact name in the foods document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub date: String,
    /// Time of day the meal was logged, `HH:MM:SS`.
    pub time: String,
    pub food_name: String,
    pub grams: f64,
    /// Derived from the food's per-100g values at the time of last write.
    pub calories: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDoc {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionDoc {
    #[serde(default)]
    pub meals: Vec<Meal>,
}

/// The foods document: name → per-100g values. `BTreeMap` keeps the
/// serialized order stable.
pub type FoodMap = BTreeMap<String, Food>;

/// One calendar day's aggregated totals in a trend report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotals {
    pub date: String,
    pub calories: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PruneSummary {
    pub sessions_removed: usize,
    pub meals_removed: usize,
}

/// Fresh opaque identifier: 32 lowercase hex chars, 128 bits of randomness.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Strict `YYYY-MM-DD` calendar validation. Rejected before any mutation so
/// that the lexicographic date comparisons used elsewhere stay date-ordered.
pub fn validate_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| StoreError::InvalidDate(s.to_string()))
}

/// Round to 2 decimal places; derived meal fields are stored rounded.
#[must_use]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
