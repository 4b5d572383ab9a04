use std::{collections::HashSet, fmt, str::FromStr};

use menuplan_shared::Day;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};

use crate::{Ingredient, Meal, MealKey, SlotKey};

/// Meals keyed by `{day}_{slot}`, kept in insertion order.
///
/// Serialized as a JSON object. The order of entries is the order in which
/// keys were first saved, and it is what aggregation walks through.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MealPlan {
    entries: Vec<(MealKey, Meal)>,
}

impl MealPlan {
    pub fn get(&self, day: Day, slot: &SlotKey) -> Option<&Meal> {
        self.entries
            .iter()
            .find(|(key, _)| key.day == day && &key.slot == slot)
            .map(|(_, meal)| meal)
    }

    pub fn get_by_key(&self, key: &MealKey) -> Option<&Meal> {
        self.get(key.day, &key.slot)
    }

    pub fn contains(&self, key: &MealKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    fn entry(&mut self, key: MealKey) -> &mut Meal {
        let position = match self.entries.iter().position(|(k, _)| k == &key) {
            Some(position) => position,
            None => {
                self.entries.push((key, Meal::default()));
                self.entries.len() - 1
            }
        };

        &mut self.entries[position].1
    }

    pub(crate) fn get_mut(&mut self, key: &MealKey) -> Option<&mut Meal> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, meal)| meal)
    }

    pub fn set_meal_name(
        &mut self,
        day: Day,
        slot: SlotKey,
        name: impl AsRef<str>,
        slot_label: impl Into<String>,
    ) {
        let meal = self.entry(MealKey::new(day, slot));
        meal.name = name.as_ref().trim().to_owned();
        meal.slot_label = slot_label.into();
    }

    pub fn set_ingredients(
        &mut self,
        day: Day,
        slot: SlotKey,
        ingredients: Vec<Ingredient>,
        slot_label: impl Into<String>,
    ) {
        let meal = self.entry(MealKey::new(day, slot));
        meal.ingredients = ingredients;
        meal.slot_label = slot_label.into();
    }

    pub fn remove(&mut self, key: &MealKey) -> Option<Meal> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;

        Some(self.entries.remove(position).1)
    }

    /// Drops every meal whose key is not in `active`, returns how many went.
    pub fn prune_inactive(&mut self, active: &HashSet<MealKey>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(key, _)| active.contains(key));

        before - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MealKey, &Meal)> {
        self.entries.iter().map(|(key, meal)| (key, meal))
    }

    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        self.entries.iter().map(|(_, meal)| meal)
    }

    pub fn keys(&self) -> impl Iterator<Item = &MealKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_content(&self) -> bool {
        self.meals().any(Meal::has_content)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn snapshot(&self) -> MealPlan {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: &MealPlan) {
        self.entries = snapshot.entries.clone();
    }
}

impl Serialize for MealPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, meal)| (key.to_string(), meal)))
    }
}

impl<'de> Deserialize<'de> for MealPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MealPlanVisitor)
    }
}

struct MealPlanVisitor;

impl<'de> Visitor<'de> for MealPlanVisitor {
    type Value = MealPlan;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of meal keys to meals")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut plan = MealPlan::default();

        while let Some((raw_key, meal)) = access.next_entry::<String, Meal>()? {
            let key = match MealKey::from_str(&raw_key) {
                Ok(key) => key,
                Err(err) => {
                    tracing::warn!(key = %raw_key, error = %err, "skipping unknown meal key");
                    continue;
                }
            };

            match plan.get_mut(&key) {
                Some(existing) => *existing = meal,
                None => plan.entries.push((key, meal)),
            }
        }

        Ok(plan)
    }
}
