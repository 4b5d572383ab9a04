use std::{fmt, str::FromStr};

use menuplan_shared::{BaseSlot, Day};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub quantity: String,
    /// Already in the pantry, never reaches the shopping list.
    #[serde(default)]
    pub ready: bool,
}

#[derive(Validate, Clone, Debug)]
pub struct IngredientInput {
    #[validate(length(min = 1, message = "Ingredient name is required"))]
    pub name: String,
    pub quantity: String,
}

impl IngredientInput {
    /// Trims both fields; an empty quantity means one unit.
    pub fn new(name: impl AsRef<str>, quantity: impl AsRef<str>) -> Self {
        let quantity = quantity.as_ref().trim();

        Self {
            name: name.as_ref().trim().to_owned(),
            quantity: if quantity.is_empty() {
                "1".to_owned()
            } else {
                quantity.to_owned()
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Meal {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub slot_label: String,
}

impl Meal {
    pub fn has_content(&self) -> bool {
        !self.name.trim().is_empty() || !self.ingredients.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    Base(BaseSlot),
    Custom(String),
}

impl SlotKey {
    pub fn is_custom(&self) -> bool {
        matches!(self, SlotKey::Custom(_))
    }
}

impl From<BaseSlot> for SlotKey {
    fn from(value: BaseSlot) -> Self {
        SlotKey::Base(value)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKey::Base(slot) => f.write_str(slot.as_ref()),
            SlotKey::Custom(id) => f.write_str(id),
        }
    }
}

impl FromStr for SlotKey {
    type Err = menuplan_shared::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(slot) = BaseSlot::from_str(s) {
            return Ok(SlotKey::Base(slot));
        }

        if s.is_empty() || s.contains('_') {
            menuplan_shared::user!("invalid slot '{s}'");
        }

        Ok(SlotKey::Custom(s.to_owned()))
    }
}

/// Composite `{day}_{slot}` key of a meal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MealKey {
    pub day: Day,
    pub slot: SlotKey,
}

impl MealKey {
    pub fn new(day: Day, slot: impl Into<SlotKey>) -> Self {
        Self {
            day,
            slot: slot.into(),
        }
    }
}

impl fmt::Display for MealKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.day, self.slot)
    }
}

impl FromStr for MealKey {
    type Err = menuplan_shared::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((day, slot)) = s.split_once('_') else {
            menuplan_shared::user!("invalid meal key '{s}'");
        };

        let Ok(day) = Day::from_str(day) else {
            menuplan_shared::user!("invalid day in meal key '{s}'");
        };

        Ok(MealKey {
            day,
            slot: SlotKey::from_str(slot)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_key_round_trips_through_storage_format() {
        let key = MealKey::from_str("senin_sarapan").unwrap();
        assert_eq!(key, MealKey::new(Day::Senin, BaseSlot::Sarapan));
        assert_eq!(key.to_string(), "senin_sarapan");

        let custom = MealKey::from_str("rabu_01HZX3M8Q0J6D1").unwrap();
        assert_eq!(custom.slot, SlotKey::Custom("01HZX3M8Q0J6D1".to_owned()));
    }

    #[test]
    fn meal_key_rejects_garbage() {
        assert!(MealKey::from_str("senin").is_err());
        assert!(MealKey::from_str("monday_sarapan").is_err());
        assert!(MealKey::from_str("senin_").is_err());
    }

    #[test]
    fn input_defaults_quantity_to_one() {
        let input = IngredientInput::new("  Telur ", "   ");
        assert_eq!(input.name, "Telur");
        assert_eq!(input.quantity, "1");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn input_with_blank_name_fails_validation() {
        assert!(IngredientInput::new("   ", "2").validate().is_err());
    }

    #[test]
    fn meal_missing_fields_deserialize_to_defaults() {
        let meal: Meal = serde_json::from_str(r#"{"name":"Omelet"}"#).unwrap();
        assert_eq!(meal.name, "Omelet");
        assert!(meal.ingredients.is_empty());
        assert!(meal.has_content());
        assert!(!Meal::default().has_content());
    }
}
