use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::models::{FoodMap, NutritionDoc, WorkoutDoc};

/// Flat-file persistence for the three logical documents.
///
/// Reads never fail: a missing or unreadable file yields the collection's
/// default empty shape, which the next save overwrites with fresh content.
/// Saves serialize the whole document and rename a temp file into place, so
/// a reader never observes a partially written collection.
pub struct Store {
    workouts_path: PathBuf,
    foods_path: PathBuf,
    nutrition_path: PathBuf,
}

impl Store {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Store {
            workouts_path: dir.join("workouts.json"),
            foods_path: dir.join("foods.json"),
            nutrition_path: dir.join("nutrition.json"),
        })
    }

    #[must_use]
    pub fn load_workouts(&self) -> WorkoutDoc {
        read_or_default(&self.workouts_path)
    }

    #[must_use]
    pub fn load_foods(&self) -> FoodMap {
        read_or_default(&self.foods_path)
    }

    #[must_use]
    pub fn load_nutrition(&self) -> NutritionDoc {
        read_or_default(&self.nutrition_path)
    }

    pub fn save_workouts(&self, doc: &WorkoutDoc) -> Result<()> {
        write_atomic(&self.workouts_path, doc)
    }

    pub fn save_foods(&self, foods: &FoodMap) -> Result<()> {
        write_atomic(&self.foods_path, foods)
    }

    pub fn save_nutrition(&self, doc: &NutritionDoc) -> Result<()> {
        write_atomic(&self.nutrition_path, doc)
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io_err(path, std::io::Error::other(e)))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
