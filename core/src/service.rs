use std::path::Path;

use chrono::{Duration, Local, NaiveDate};

use crate::error::{Result, StoreError};
use crate::models::{
    DayTotals, Exercise, Food, FoodMap, MEAL_RETENTION_DAYS, Meal, NutritionDoc, PruneSummary,
    SESSION_RETENTION_DAYS, Session, WorkoutDoc, new_id, round2, validate_date,
};
use crate::store::Store;

/// The tracker service: owns the store and the in-memory documents.
///
/// Every mutating operation validates its input first, then mutates, then
/// persists the affected document(s), so a failed call leaves both the
/// in-memory state and the files untouched.
pub struct FitlogService {
    store: Store,
    workouts: WorkoutDoc,
    foods: FoodMap,
    nutrition: NutritionDoc,
}

impl FitlogService {
    pub fn open(dir: &Path) -> Result<Self> {
        let store = Store::open(dir)?;
        let workouts = store.load_workouts();
        let foods = store.load_foods();
        let nutrition = store.load_nutrition();
        Ok(FitlogService {
            store,
            workouts,
            foods,
            nutrition,
        })
    }

    // --- Sessions ---

    pub fn create_session(&mut self, name: &str, date: &str) -> Result<Session> {
        validate_date(date)?;
        let session = Session {
            id: new_id(),
            name: name.to_string(),
            date: date.to_string(),
            created_at: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            exercises: Vec::new(),
        };
        self.workouts.sessions.push(session.clone());
        self.store.save_workouts(&self.workouts)?;
        Ok(session)
    }

    pub fn edit_session(
        &mut self,
        id: &str,
        name: Option<&str>,
        date: Option<&str>,
    ) -> Result<Session> {
        if let Some(d) = date {
            validate_date(d)?;
        }
        let session = self
            .workouts
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("session", id))?;
        if let Some(n) = name {
            session.name = n.to_string();
        }
        if let Some(d) = date {
            session.date = d.to_string();
        }
        let updated = session.clone();
        self.store.save_workouts(&self.workouts)?;
        Ok(updated)
    }

    /// Removes the session and, with it, all its nested exercises.
    pub fn delete_session(&mut self, id: &str) -> Result<()> {
        let idx = self
            .workouts
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("session", id))?;
        self.workouts.sessions.remove(idx);
        self.store.save_workouts(&self.workouts)
    }

    pub fn get_session(&self, id: &str) -> Result<&Session> {
        self.workouts
            .sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("session", id))
    }

    /// All sessions, most recent first: `(date, created_at)` descending.
    /// The creation timestamp breaks same-day ties, so the order is total.
    #[must_use]
    pub fn sessions_sorted(&self) -> Vec<&Session> {
        let mut sessions: Vec<&Session> = self.workouts.sessions.iter().collect();
        sessions.sort_by(|a, b| {
            (b.date.as_str(), b.created_at.as_str()).cmp(&(a.date.as_str(), a.created_at.as_str()))
        });
        sessions
    }

    // --- Exercises ---

    pub fn add_exercise(
        &mut self,
        session_id: &str,
        name: &str,
        sets: u32,
        reps: u32,
        weight: f64,
    ) -> Result<Exercise> {
        let session = self.session_mut(session_id)?;
        let exercise = Exercise {
            id: new_id(),
            name: name.to_string(),
            sets,
            reps,
            weight: round2(weight),
        };
        session.exercises.push(exercise.clone());
        self.store.save_workouts(&self.workouts)?;
        Ok(exercise)
    }

    pub fn edit_exercise(
        &mut self,
        session_id: &str,
        exercise_id: &str,
        name: Option<&str>,
        sets: Option<u32>,
        reps: Option<u32>,
        weight: Option<f64>,
    ) -> Result<Exercise> {
        let session = self.session_mut(session_id)?;
        let exercise = session
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
            .ok_or_else(|| StoreError::not_found("exercise", exercise_id))?;
        if let Some(n) = name {
            exercise.name = n.to_string();
        }
        if let Some(s) = sets {
            exercise.sets = s;
        }
        if let Some(r) = reps {
            exercise.reps = r;
        }
        if let Some(w) = weight {
            exercise.weight = round2(w);
        }
        let updated = exercise.clone();
        self.store.save_workouts(&self.workouts)?;
        Ok(updated)
    }

    pub fn delete_exercise(&mut self, session_id: &str, exercise_id: &str) -> Result<()> {
        let session = self.session_mut(session_id)?;
        let idx = session
            .exercises
            .iter()
            .position(|e| e.id == exercise_id)
            .ok_or_else(|| StoreError::not_found("exercise", exercise_id))?;
        session.exercises.remove(idx);
        self.store.save_workouts(&self.workouts)
    }

    fn session_mut(&mut self, id: &str) -> Result<&mut Session> {
        self.workouts
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("session", id))
    }

    // --- Foods ---

    pub fn add_food(
        &mut self,
        name: &str,
        calories_per_100g: f64,
        protein_per_100g: f64,
    ) -> Result<()> {
        if self.foods.contains_key(name) {
            return Err(StoreError::DuplicateKey(name.to_string()));
        }
        self.foods.insert(
            name.to_string(),
            Food {
                calories_per_100g: round2(calories_per_100g),
                protein_per_100g: round2(protein_per_100g),
            },
        );
        self.store.save_foods(&self.foods)
    }

    /// Replaces the food's per-100g values. Meals already logged against it
    /// keep their stored derived fields; there is no live recompute.
    pub fn edit_food(
        &mut self,
        name: &str,
        calories_per_100g: f64,
        protein_per_100g: f64,
    ) -> Result<()> {
        if !self.foods.contains_key(name) {
            return Err(StoreError::InvalidReference(name.to_string()));
        }
        self.foods.insert(
            name.to_string(),
            Food {
                calories_per_100g: round2(calories_per_100g),
                protein_per_100g: round2(protein_per_100g),
            },
        );
        self.store.save_foods(&self.foods)
    }

    /// Removes the food and every meal citing it as one logical transaction.
    /// Returns the number of cascaded meals. Both documents are mutated in
    /// memory before either is persisted, so no reader of the service ever
    /// sees a dangling `food_name`.
    pub fn delete_food(&mut self, name: &str) -> Result<usize> {
        if self.foods.remove(name).is_none() {
            return Err(StoreError::InvalidReference(name.to_string()));
        }
        let before = self.nutrition.meals.len();
        self.nutrition.meals.retain(|m| m.food_name != name);
        let removed = before - self.nutrition.meals.len();
        self.store.save_foods(&self.foods)?;
        self.store.save_nutrition(&self.nutrition)?;
        Ok(removed)
    }

    #[must_use]
    pub fn foods(&self) -> &FoodMap {
        &self.foods
    }

    // --- Meals ---

    pub fn create_meal(&mut self, date: &str, food_name: &str, grams: f64) -> Result<Meal> {
        validate_date(date)?;
        let food = self
            .foods
            .get(food_name)
            .ok_or_else(|| StoreError::InvalidReference(food_name.to_string()))?;
        let factor = grams / 100.0;
        let meal = Meal {
            id: new_id(),
            date: date.to_string(),
            time: Local::now().format("%H:%M:%S").to_string(),
            food_name: food_name.to_string(),
            grams: round2(grams),
            calories: round2(food.calories_per_100g * factor),
            protein: round2(food.protein_per_100g * factor),
        };
        self.nutrition.meals.push(meal.clone());
        self.store.save_nutrition(&self.nutrition)?;
        Ok(meal)
    }

    /// Changes the quantity and recomputes the derived fields from the
    /// food's *current* per-100g values, not the ones in effect when the
    /// meal was first logged.
    pub fn edit_meal(&mut self, id: &str, grams: f64) -> Result<Meal> {
        let idx = self
            .nutrition
            .meals
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("meal", id))?;
        let food_name = self.nutrition.meals[idx].food_name.clone();
        let food = self
            .foods
            .get(&food_name)
            .ok_or_else(|| StoreError::InvalidReference(food_name.clone()))?;
        let factor = grams / 100.0;
        let meal = &mut self.nutrition.meals[idx];
        meal.grams = round2(grams);
        meal.calories = round2(food.calories_per_100g * factor);
        meal.protein = round2(food.protein_per_100g * factor);
        let updated = meal.clone();
        self.store.save_nutrition(&self.nutrition)?;
        Ok(updated)
    }

    pub fn delete_meal(&mut self, id: &str) -> Result<()> {
        let idx = self
            .nutrition
            .meals
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("meal", id))?;
        self.nutrition.meals.remove(idx);
        self.store.save_nutrition(&self.nutrition)
    }

    // --- Retention ---

    /// Drops sessions dated strictly before `now - 14 days` and meals dated
    /// strictly before `now - 7 days`, then persists both documents so the
    /// on-disk state never lags the in-memory state across a restart.
    /// Idempotent; foods are never pruned.
    pub fn prune(&mut self, now: NaiveDate) -> Result<PruneSummary> {
        let session_cutoff = (now - Duration::days(SESSION_RETENTION_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        let meal_cutoff = (now - Duration::days(MEAL_RETENTION_DAYS))
            .format("%Y-%m-%d")
            .to_string();

        let sessions_before = self.workouts.sessions.len();
        self.workouts
            .sessions
            .retain(|s| s.date.as_str() >= session_cutoff.as_str());
        let meals_before = self.nutrition.meals.len();
        self.nutrition
            .meals
            .retain(|m| m.date.as_str() >= meal_cutoff.as_str());

        self.store.save_workouts(&self.workouts)?;
        self.store.save_nutrition(&self.nutrition)?;
        Ok(PruneSummary {
            sessions_removed: sessions_before - self.workouts.sessions.len(),
            meals_removed: meals_before - self.nutrition.meals.len(),
        })
    }

    // --- Aggregation ---

    /// Meals logged on `date`, in the insertion order of the collection.
    pub fn meals_on(&self, date: &str) -> Result<Vec<&Meal>> {
        validate_date(date)?;
        Ok(self
            .nutrition
            .meals
            .iter()
            .filter(|m| m.date == date)
            .collect())
    }

    /// `(total_calories, total_protein)` for the day; zero when empty.
    pub fn totals_for(&self, date: &str) -> Result<(f64, f64)> {
        let meals = self.meals_on(date)?;
        Ok(meals
            .iter()
            .fold((0.0, 0.0), |(c, p), m| (c + m.calories, p + m.protein)))
    }

    /// Daily totals for the `n_days` consecutive calendar days ending at
    /// `ending`, oldest first. Every day in the window gets a bucket, even
    /// with zero meals. `n_days` below 1 is clamped to 1.
    #[must_use]
    pub fn trend(&self, n_days: i64, ending: NaiveDate) -> Vec<DayTotals> {
        let days = n_days.max(1);
        let mut buckets = Vec::with_capacity(usize::try_from(days).unwrap_or(1));
        for offset in (0..days).rev() {
            let date = (ending - Duration::days(offset)).format("%Y-%m-%d").to_string();
            let (calories, protein) = self
                .nutrition
                .meals
                .iter()
                .filter(|m| m.date == date)
                .fold((0.0, 0.0), |(c, p), m| (c + m.calories, p + m.protein));
            buckets.push(DayTotals {
                date,
                calories,
                protein,
            });
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn svc() -> (TempDir, FitlogService) {
        let dir = TempDir::new().unwrap();
        let service = FitlogService::open(dir.path()).unwrap();
        (dir, service)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn push_session(service: &mut FitlogService, id: &str, d: &str, created_at: &str) {
        service.workouts.sessions.push(Session {
            id: id.to_string(),
            name: format!("session-{id}"),
            date: d.to_string(),
            created_at: created_at.to_string(),
            exercises: Vec::new(),
        });
    }

    fn push_meal(service: &mut FitlogService, id: &str, d: &str, food: &str) {
        service.nutrition.meals.push(Meal {
            id: id.to_string(),
            date: d.to_string(),
            time: "12:00:00".to_string(),
            food_name: food.to_string(),
            grams: 100.0,
            calories: 100.0,
            protein: 10.0,
        });
    }

    // --- Sessions & exercises ---

    #[test]
    fn test_create_session_validates_date() {
        let (_dir, mut service) = svc();
        assert!(matches!(
            service.create_session("Push", "2024-13-40"),
            Err(StoreError::InvalidDate(_))
        ));
        assert!(service.workouts.sessions.is_empty());
    }

    #[test]
    fn test_session_lifecycle() {
        let (_dir, mut service) = svc();
        let s = service.create_session("Push", "2024-06-15").unwrap();
        service.add_exercise(&s.id, "Bench", 3, 8, 80.0).unwrap();
        service.add_exercise(&s.id, "OHP", 3, 10, 40.0).unwrap();
        assert_eq!(service.get_session(&s.id).unwrap().exercises.len(), 2);

        service.delete_session(&s.id).unwrap();
        assert!(matches!(
            service.get_session(&s.id),
            Err(StoreError::NotFound { kind: "session", .. })
        ));
        // Exercises went with the session; nothing else holds them.
        assert!(service.workouts.sessions.is_empty());
    }

    #[test]
    fn test_edit_session_invalid_date_leaves_session_unchanged() {
        let (_dir, mut service) = svc();
        let s = service.create_session("Pull", "2024-06-15").unwrap();
        let err = service.edit_session(&s.id, Some("Renamed"), Some("garbage"));
        assert!(matches!(err, Err(StoreError::InvalidDate(_))));
        let current = service.get_session(&s.id).unwrap();
        assert_eq!(current.name, "Pull");
        assert_eq!(current.date, "2024-06-15");
    }

    #[test]
    fn test_edit_and_delete_exercise() {
        let (_dir, mut service) = svc();
        let s = service.create_session("Legs", "2024-06-15").unwrap();
        let e = service.add_exercise(&s.id, "Squat", 5, 5, 100.0).unwrap();

        let updated = service
            .edit_exercise(&s.id, &e.id, None, None, Some(3), Some(110.125))
            .unwrap();
        assert_eq!(updated.name, "Squat");
        assert_eq!(updated.sets, 5);
        assert_eq!(updated.reps, 3);
        assert!((updated.weight - 110.13).abs() < f64::EPSILON);

        service.delete_exercise(&s.id, &e.id).unwrap();
        assert!(service.get_session(&s.id).unwrap().exercises.is_empty());
        assert!(matches!(
            service.delete_exercise(&s.id, &e.id),
            Err(StoreError::NotFound { kind: "exercise", .. })
        ));
    }

    #[test]
    fn test_sessions_sorted_is_deterministic() {
        let (_dir, mut service) = svc();
        push_session(&mut service, "a", "2024-06-10", "2024-06-10T08:00:00");
        push_session(&mut service, "b", "2024-06-12", "2024-06-12T08:00:00");
        // Same date, later creation: must come first among the ties.
        push_session(&mut service, "c", "2024-06-12", "2024-06-12T19:30:00");

        let ids: Vec<&str> = service.sessions_sorted().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    // --- Foods & referential integrity ---

    #[test]
    fn test_add_food_rejects_duplicate() {
        let (_dir, mut service) = svc();
        service.add_food("Egg", 155.0, 13.0).unwrap();
        assert!(matches!(
            service.add_food("Egg", 150.0, 12.0),
            Err(StoreError::DuplicateKey(_))
        ));
        // Original values survive the rejected create.
        assert!((service.foods()["Egg"].calories_per_100g - 155.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_food_names_are_case_sensitive() {
        let (_dir, mut service) = svc();
        service.add_food("Egg", 155.0, 13.0).unwrap();
        service.add_food("egg", 155.0, 13.0).unwrap();
        assert_eq!(service.foods().len(), 2);
    }

    #[test]
    fn test_edit_food_does_not_recompute_meals() {
        let (_dir, mut service) = svc();
        service.add_food("Chicken", 165.0, 31.0).unwrap();
        let meal = service.create_meal("2024-06-15", "Chicken", 150.0).unwrap();
        assert!((meal.calories - 247.5).abs() < f64::EPSILON);

        service.edit_food("Chicken", 200.0, 25.0).unwrap();
        let stored = &service.meals_on("2024-06-15").unwrap()[0];
        assert!((stored.calories - 247.5).abs() < f64::EPSILON);
        assert!((stored.protein - 46.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_food_cascades_only_referencing_meals() {
        let (_dir, mut service) = svc();
        service.add_food("Egg", 155.0, 13.0).unwrap();
        service.add_food("Rice", 130.0, 2.7).unwrap();
        for _ in 0..3 {
            service.create_meal("2024-06-15", "Egg", 100.0).unwrap();
        }
        service.create_meal("2024-06-15", "Rice", 200.0).unwrap();
        service.create_meal("2024-06-14", "Rice", 150.0).unwrap();

        let removed = service.delete_food("Egg").unwrap();
        assert_eq!(removed, 3);
        assert!(!service.foods().contains_key("Egg"));
        assert_eq!(service.nutrition.meals.len(), 2);
        assert!(service.nutrition.meals.iter().all(|m| m.food_name == "Rice"));
    }

    #[test]
    fn test_delete_food_unknown_name() {
        let (_dir, mut service) = svc();
        assert!(matches!(
            service.delete_food("Ghost"),
            Err(StoreError::InvalidReference(_))
        ));
    }

    // --- Meals ---

    #[test]
    fn test_create_meal_derived_fields() {
        let (_dir, mut service) = svc();
        service.add_food("Chicken", 165.0, 31.0).unwrap();
        let meal = service.create_meal("2024-06-15", "Chicken", 150.0).unwrap();
        assert!((meal.calories - 247.5).abs() < f64::EPSILON);
        assert!((meal.protein - 46.5).abs() < f64::EPSILON);
        assert_eq!(meal.food_name, "Chicken");
        assert_eq!(meal.id.len(), 32);
    }

    #[test]
    fn test_create_meal_unknown_food_leaves_store_unchanged() {
        let (dir, mut service) = svc();
        service.add_food("Rice", 130.0, 2.7).unwrap();
        service.create_meal("2024-06-15", "Rice", 100.0).unwrap();
        let before = service.nutrition.clone();

        let err = service.create_meal("2024-06-15", "nonexistent-food", 100.0);
        assert!(matches!(err, Err(StoreError::InvalidReference(_))));
        assert_eq!(service.nutrition, before);

        // On-disk state unchanged too.
        let reopened = FitlogService::open(dir.path()).unwrap();
        assert_eq!(reopened.nutrition, before);
    }

    #[test]
    fn test_edit_meal_resnapshots_current_food_values() {
        let (_dir, mut service) = svc();
        service.add_food("Chicken", 165.0, 31.0).unwrap();
        let meal = service.create_meal("2024-06-15", "Chicken", 150.0).unwrap();

        // The food is repriced after logging; editing grams re-derives from
        // the current values, not the original snapshot.
        service.edit_food("Chicken", 200.0, 20.0).unwrap();
        let updated = service.edit_meal(&meal.id, 50.0).unwrap();
        assert!((updated.grams - 50.0).abs() < f64::EPSILON);
        assert!((updated.calories - 100.0).abs() < f64::EPSILON);
        assert!((updated.protein - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edit_meal_errors() {
        let (_dir, mut service) = svc();
        assert!(matches!(
            service.edit_meal("missing", 100.0),
            Err(StoreError::NotFound { kind: "meal", .. })
        ));
        // A meal whose food vanished from the document (hand-edited file)
        // is rejected without mutation.
        push_meal(&mut service, "m1", "2024-06-15", "Ghost");
        assert!(matches!(
            service.edit_meal("m1", 200.0),
            Err(StoreError::InvalidReference(_))
        ));
        assert!((service.nutrition.meals[0].grams - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_meal() {
        let (_dir, mut service) = svc();
        service.add_food("Rice", 130.0, 2.7).unwrap();
        let meal = service.create_meal("2024-06-15", "Rice", 100.0).unwrap();
        service.delete_meal(&meal.id).unwrap();
        assert!(service.nutrition.meals.is_empty());
        assert!(matches!(
            service.delete_meal(&meal.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    // --- Retention ---

    #[test]
    fn test_prune_retention_boundaries() {
        let (_dir, mut service) = svc();
        let now = date("2024-06-15");
        push_session(&mut service, "keep", "2024-06-01", "t1"); // now - 14
        push_session(&mut service, "drop", "2024-05-31", "t2"); // now - 15
        push_meal(&mut service, "mkeep", "2024-06-08", "Egg"); // now - 7
        push_meal(&mut service, "mdrop", "2024-06-07", "Egg"); // now - 8

        let summary = service.prune(now).unwrap();
        assert_eq!(summary.sessions_removed, 1);
        assert_eq!(summary.meals_removed, 1);
        assert_eq!(service.workouts.sessions.len(), 1);
        assert_eq!(service.workouts.sessions[0].id, "keep");
        assert_eq!(service.nutrition.meals.len(), 1);
        assert_eq!(service.nutrition.meals[0].id, "mkeep");
    }

    #[test]
    fn test_prune_is_idempotent() {
        let (_dir, mut service) = svc();
        let now = date("2024-06-15");
        push_session(&mut service, "old", "2024-01-01", "t1");
        push_session(&mut service, "new", "2024-06-14", "t2");
        push_meal(&mut service, "m1", "2024-06-14", "Egg");

        service.prune(now).unwrap();
        let workouts = service.workouts.clone();
        let nutrition = service.nutrition.clone();

        let second = service.prune(now).unwrap();
        assert_eq!(second, PruneSummary::default());
        assert_eq!(service.workouts, workouts);
        assert_eq!(service.nutrition, nutrition);
    }

    #[test]
    fn test_prune_never_touches_foods_and_persists() {
        let (dir, mut service) = svc();
        service.add_food("Egg", 155.0, 13.0).unwrap();
        push_session(&mut service, "old", "2020-01-01", "t1");
        push_meal(&mut service, "m1", "2020-01-01", "Egg");
        service.prune(date("2024-06-15")).unwrap();

        let reopened = FitlogService::open(dir.path()).unwrap();
        assert!(reopened.workouts.sessions.is_empty());
        assert!(reopened.nutrition.meals.is_empty());
        assert_eq!(reopened.foods().len(), 1);
    }

    // --- Aggregation ---

    #[test]
    fn test_meals_on_insertion_order() {
        let (_dir, mut service) = svc();
        push_meal(&mut service, "m1", "2024-06-15", "A");
        push_meal(&mut service, "m2", "2024-06-14", "B");
        push_meal(&mut service, "m3", "2024-06-15", "C");

        let ids: Vec<&str> = service
            .meals_on("2024-06-15")
            .unwrap()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m3"]);
        assert!(matches!(
            service.meals_on("not-a-date"),
            Err(StoreError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_totals_for_empty_day_is_zero() {
        let (_dir, service) = svc();
        let (cal, protein) = service.totals_for("2024-06-15").unwrap();
        assert!((cal - 0.0).abs() < f64::EPSILON);
        assert!((protein - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trend_zero_fills_empty_days() {
        let (_dir, mut service) = svc();
        let ending = date("2024-06-15");
        // Meals on the last day of the window and three days earlier.
        push_meal(&mut service, "m1", "2024-06-15", "A");
        push_meal(&mut service, "m2", "2024-06-12", "B");

        let buckets = service.trend(7, ending);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].date, "2024-06-09");
        assert_eq!(buckets[6].date, "2024-06-15");
        for bucket in &buckets {
            let expect_data = bucket.date == "2024-06-15" || bucket.date == "2024-06-12";
            if expect_data {
                assert!((bucket.calories - 100.0).abs() < f64::EPSILON);
                assert!((bucket.protein - 10.0).abs() < f64::EPSILON);
            } else {
                assert!((bucket.calories - 0.0).abs() < f64::EPSILON);
                assert!((bucket.protein - 0.0).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_trend_clamps_day_count() {
        let (_dir, service) = svc();
        assert_eq!(service.trend(0, date("2024-06-15")).len(), 1);
        assert_eq!(service.trend(-5, date("2024-06-15")).len(), 1);
    }

    // --- Persistence through the service ---

    #[test]
    fn test_reopen_round_trip() {
        let (dir, mut service) = svc();
        service.add_food("Oats", 389.0, 16.9).unwrap();
        let s = service.create_session("Push", "2024-06-15").unwrap();
        service.add_exercise(&s.id, "Bench", 3, 8, 80.0).unwrap();
        service.create_meal("2024-06-15", "Oats", 60.0).unwrap();

        let reopened = FitlogService::open(dir.path()).unwrap();
        assert_eq!(reopened.workouts, service.workouts);
        assert_eq!(reopened.foods, service.foods);
        assert_eq!(reopened.nutrition, service.nutrition);
    }
}
