use std::collections::HashSet;

use menuplan_shared::Day;
use validator::Validate;

use crate::{
    CustomSlot, FALLBACK_SLOT_LABEL, Ingredient, IngredientInput, Meal, MealKey, MealPlan,
    SlotKey, SlotRegistry, SlotView, resolve_label,
};

/// Live planner state: the meal plan together with the custom slot registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeekPlan {
    pub meals: MealPlan,
    pub slots: SlotRegistry,
}

impl WeekPlan {
    pub fn new(meals: MealPlan, slots: SlotRegistry) -> Self {
        Self { meals, slots }
    }

    pub fn label_of(&self, day: Day, slot: &SlotKey) -> String {
        resolve_label(day, slot, &self.slots, &self.meals)
    }

    pub fn list_slots(&self, day: Day) -> Vec<SlotView> {
        self.slots.list_slots(day)
    }

    pub fn add_custom_slot(&mut self, day: Day, label: impl AsRef<str>) -> String {
        let id = self.slots.add_custom_slot(day, label);
        tracing::debug!(day = %day, slot = %id, "custom slot added");

        id
    }

    /// Removes a custom slot together with the meal stored under it.
    pub fn remove_custom_slot(&mut self, day: Day, id: &str) -> menuplan_shared::Result<Option<Meal>> {
        if self.slots.remove_custom_slot(day, id).is_none() {
            menuplan_shared::not_found!("slot '{id}' on {day}");
        }

        let removed = self
            .meals
            .remove(&MealKey::new(day, SlotKey::Custom(id.to_owned())));

        tracing::debug!(day = %day, slot = id, cascade = removed.is_some(), "custom slot removed");

        Ok(removed)
    }

    fn ensure_active(&self, day: Day, slot: &SlotKey) -> menuplan_shared::Result<()> {
        if !self.slots.is_active(day, slot) {
            menuplan_shared::not_found!("slot '{slot}' on {day}");
        }

        Ok(())
    }

    pub fn get(&self, day: Day, slot: &SlotKey) -> Option<&Meal> {
        self.meals.get(day, slot)
    }

    pub fn set_meal_name(
        &mut self,
        day: Day,
        slot: SlotKey,
        name: impl AsRef<str>,
    ) -> menuplan_shared::Result<()> {
        self.ensure_active(day, &slot)?;
        let label = self.label_of(day, &slot);
        self.meals.set_meal_name(day, slot, name, label);

        Ok(())
    }

    /// Replaces the ingredient list of a meal.
    ///
    /// Names and quantities are normalized as on entry. A blank name or a
    /// repeated id rejects the whole list and leaves the meal as it was.
    pub fn set_ingredients(
        &mut self,
        day: Day,
        slot: SlotKey,
        ingredients: Vec<Ingredient>,
    ) -> menuplan_shared::Result<()> {
        self.ensure_active(day, &slot)?;

        let mut ids = HashSet::new();
        let mut normalized = Vec::with_capacity(ingredients.len());
        for ingredient in ingredients {
            let input = IngredientInput::new(&ingredient.name, &ingredient.quantity);
            input.validate()?;

            if !ids.insert(ingredient.id.to_owned()) {
                menuplan_shared::user!("duplicate ingredient id '{}'", ingredient.id);
            }

            normalized.push(Ingredient {
                name: input.name,
                quantity: input.quantity,
                ..ingredient
            });
        }

        let ingredients = normalized;
        let label = self.label_of(day, &slot);
        self.meals.set_ingredients(day, slot, ingredients, label);

        Ok(())
    }

    fn ingredients_of(&self, day: Day, slot: &SlotKey) -> Vec<Ingredient> {
        self.meals
            .get(day, slot)
            .map(|meal| meal.ingredients.clone())
            .unwrap_or_default()
    }

    pub fn add_ingredient(
        &mut self,
        day: Day,
        slot: SlotKey,
        input: IngredientInput,
    ) -> menuplan_shared::Result<String> {
        input.validate()?;
        self.ensure_active(day, &slot)?;

        let mut ingredients = self.ingredients_of(day, &slot);
        let id = loop {
            let id = menuplan_shared::new_id();
            if !ingredients.iter().any(|ingredient| ingredient.id == id) {
                break id;
            }
        };

        ingredients.push(Ingredient {
            id: id.to_owned(),
            name: input.name,
            quantity: input.quantity,
            ready: false,
        });
        self.set_ingredients(day, slot, ingredients)?;

        Ok(id)
    }

    fn edit_ingredient(
        &mut self,
        day: Day,
        slot: SlotKey,
        id: &str,
        edit: impl FnOnce(&mut Vec<Ingredient>, usize),
    ) -> menuplan_shared::Result<()> {
        self.ensure_active(day, &slot)?;

        let mut ingredients = self.ingredients_of(day, &slot);
        let Some(position) = ingredients.iter().position(|ingredient| ingredient.id == id) else {
            menuplan_shared::not_found!("ingredient '{id}'");
        };

        edit(&mut ingredients, position);
        self.set_ingredients(day, slot, ingredients)
    }

    pub fn update_ingredient(
        &mut self,
        day: Day,
        slot: SlotKey,
        id: &str,
        input: IngredientInput,
    ) -> menuplan_shared::Result<()> {
        input.validate()?;

        self.edit_ingredient(day, slot, id, |ingredients, position| {
            ingredients[position].name = input.name;
            ingredients[position].quantity = input.quantity;
        })
    }

    pub fn remove_ingredient(
        &mut self,
        day: Day,
        slot: SlotKey,
        id: &str,
    ) -> menuplan_shared::Result<()> {
        self.edit_ingredient(day, slot, id, |ingredients, position| {
            ingredients.remove(position);
        })
    }

    pub fn set_ingredient_ready(
        &mut self,
        day: Day,
        slot: SlotKey,
        id: &str,
        ready: bool,
    ) -> menuplan_shared::Result<()> {
        self.edit_ingredient(day, slot, id, |ingredients, position| {
            ingredients[position].ready = ready;
        })
    }

    pub fn active_keys(&self) -> HashSet<MealKey> {
        self.slots.active_keys().collect()
    }

    pub fn prune_inactive(&mut self) -> usize {
        let active = self.active_keys();
        self.meals.prune_inactive(&active)
    }

    /// Registers a slot for every custom key in the plan that has none.
    ///
    /// Used after restoring a snapshot so that every stored meal is reachable.
    pub fn materialize_slots(&mut self) -> usize {
        let missing = self
            .meals
            .iter()
            .filter_map(|(key, meal)| match &key.slot {
                SlotKey::Custom(id) if !self.slots.contains(key.day, id) => {
                    let label = match meal.slot_label.trim() {
                        "" => FALLBACK_SLOT_LABEL.to_owned(),
                        label => label.to_owned(),
                    };

                    Some((key.day, CustomSlot { id: id.to_owned(), label }))
                }
                _ => None,
            })
            .collect::<Vec<_>>();

        let mut registered = 0;
        for (day, slot) in missing {
            if self.slots.register(day, slot) {
                registered += 1;
            }
        }

        registered
    }

    pub fn has_content(&self) -> bool {
        self.meals.has_content()
    }

    pub fn clear_meals(&mut self) {
        self.meals.clear();
    }

    pub fn snapshot(&self) -> WeekPlan {
        self.clone()
    }

    pub fn restore(&mut self, meals: &MealPlan, slots: &SlotRegistry) -> usize {
        self.meals.restore(meals);
        self.slots = slots.clone();

        self.materialize_slots()
    }
}

#[cfg(test)]
mod tests {
    use menuplan_shared::{BaseSlot, Error};

    use super::*;

    #[test]
    fn removing_custom_slot_deletes_its_meal() {
        let mut week = WeekPlan::default();
        let id = week.add_custom_slot(Day::Senin, "Cemilan");
        let slot = SlotKey::Custom(id.to_owned());

        week.set_meal_name(Day::Senin, slot.clone(), "Pisang Goreng").unwrap();
        week.add_ingredient(Day::Senin, slot.clone(), IngredientInput::new("Pisang", "3"))
            .unwrap();
        assert_eq!(week.get(Day::Senin, &slot).unwrap().slot_label, "Cemilan");

        let removed = week.remove_custom_slot(Day::Senin, &id).unwrap();
        assert_eq!(removed.unwrap().name, "Pisang Goreng");
        assert!(week.get(Day::Senin, &slot).is_none());
        assert!(!week.meals.contains(&MealKey::new(Day::Senin, slot)));
    }

    #[test]
    fn removing_unknown_slot_is_not_found() {
        let mut week = WeekPlan::default();
        let err = week.remove_custom_slot(Day::Senin, "nope").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn meals_need_an_existing_slot() {
        let mut week = WeekPlan::default();
        let err = week
            .set_meal_name(Day::Senin, SlotKey::Custom("ghost".to_owned()), "Kue")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(week.meals.is_empty());
    }

    #[test]
    fn empty_ingredient_name_is_rejected_without_mutation() {
        let mut week = WeekPlan::default();
        let err = week
            .add_ingredient(Day::Senin, BaseSlot::Sarapan.into(), IngredientInput::new("  ", "2"))
            .unwrap_err();

        assert!(matches!(err, Error::Validate(_)));
        assert!(week.meals.is_empty());
    }

    #[test]
    fn replacing_ingredients_checks_names_and_ids() {
        let mut week = WeekPlan::default();
        let slot = SlotKey::Base(BaseSlot::Sarapan);
        let ingredient = |id: &str, name: &str| Ingredient {
            id: id.to_owned(),
            name: name.to_owned(),
            quantity: "2".to_owned(),
            ready: false,
        };

        week.set_ingredients(Day::Senin, slot.clone(), vec![ingredient("A", "Telur")])
            .unwrap();

        let err = week
            .set_ingredients(
                Day::Senin,
                slot.clone(),
                vec![ingredient("B", "   "), ingredient("C", "Beras")],
            )
            .unwrap_err();
        assert!(matches!(err, Error::Validate(_)));

        let err = week
            .set_ingredients(
                Day::Senin,
                slot.clone(),
                vec![ingredient("A", "Telur"), ingredient("A", "Beras")],
            )
            .unwrap_err();
        assert!(matches!(err, Error::User(ref msg) if msg == "duplicate ingredient id 'A'"));

        let ingredients = &week.get(Day::Senin, &slot).unwrap().ingredients;
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Telur");

        week.set_ingredients(
            Day::Senin,
            slot.clone(),
            vec![Ingredient {
                quantity: " ".to_owned(),
                ..ingredient("D", "  Bawang ")
            }],
        )
        .unwrap();
        let stored = &week.get(Day::Senin, &slot).unwrap().ingredients[0];
        assert_eq!(stored.name, "Bawang");
        assert_eq!(stored.quantity, "1");
    }

    #[test]
    fn ingredient_editing() {
        let mut week = WeekPlan::default();
        let slot = SlotKey::Base(BaseSlot::Malam);
        let telur = week
            .add_ingredient(Day::Rabu, slot.clone(), IngredientInput::new("Telur", ""))
            .unwrap();
        let beras = week
            .add_ingredient(Day::Rabu, slot.clone(), IngredientInput::new("Beras", "1kg"))
            .unwrap();
        assert_ne!(telur, beras);

        week.update_ingredient(Day::Rabu, slot.clone(), &telur, IngredientInput::new("Telur Ayam", "4"))
            .unwrap();
        week.set_ingredient_ready(Day::Rabu, slot.clone(), &beras, true)
            .unwrap();

        let meal = week.get(Day::Rabu, &slot).unwrap();
        assert_eq!(meal.ingredients[0].name, "Telur Ayam");
        assert_eq!(meal.ingredients[0].quantity, "4");
        assert!(meal.ingredients[1].ready);

        week.remove_ingredient(Day::Rabu, slot.clone(), &telur).unwrap();
        assert_eq!(week.get(Day::Rabu, &slot).unwrap().ingredients.len(), 1);

        let err = week
            .remove_ingredient(Day::Rabu, slot, &telur)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn prune_drops_meals_of_unregistered_slots() {
        let mut week = WeekPlan::default();
        week.set_meal_name(Day::Senin, BaseSlot::Sarapan.into(), "Bubur")
            .unwrap();
        week.meals.set_meal_name(
            Day::Senin,
            SlotKey::Custom("stale".to_owned()),
            "Kue",
            "Cemilan",
        );

        assert_eq!(week.prune_inactive(), 1);
        assert_eq!(week.meals.len(), 1);
    }

    #[test]
    fn materialize_registers_missing_custom_slots() {
        let mut week = WeekPlan::default();
        week.meals.set_meal_name(
            Day::Jumat,
            SlotKey::Custom("01JCUSTOM".to_owned()),
            "Es Buah",
            "Takjil",
        );
        week.meals.set_meal_name(
            Day::Jumat,
            SlotKey::Custom("01JBLANK".to_owned()),
            "Kurma",
            "",
        );

        assert_eq!(week.materialize_slots(), 2);
        assert_eq!(week.slots.custom_label(Day::Jumat, "01JCUSTOM"), Some("Takjil"));
        assert_eq!(
            week.slots.custom_label(Day::Jumat, "01JBLANK"),
            Some(FALLBACK_SLOT_LABEL)
        );
        assert_eq!(week.materialize_slots(), 0);
    }
}
