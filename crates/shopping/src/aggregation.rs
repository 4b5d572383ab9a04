use std::collections::HashMap;

use menuplan_mealplan::MealPlan;

/// One line of the aggregated ingredient list.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedIngredient {
    pub name: String,
    pub quantity: String,
}

/// Ingredient Aggregation Service
///
/// Stateless domain service that walks every meal of a plan and groups
/// ingredients that still need buying under their normalized name.
///
/// Quantities are opaque text and are never parsed:
/// - "2" + "3" = "2 + 3"
/// - "2 pcs" + "1" = "2 pcs" ("1" and "" both mean unspecified)
/// - "" + "" = "1"
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Aggregate all non-ready ingredients of the plan.
    ///
    /// Output order is first-seen order over the plan's own entry order; the
    /// first spelling of a name is the one kept for display. An empty result
    /// means there is nothing to put on a shopping list.
    pub fn aggregate(plan: &MealPlan) -> Vec<AggregatedIngredient> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut result: Vec<AggregatedIngredient> = Vec::new();

        let pending = plan
            .meals()
            .flat_map(|meal| meal.ingredients.iter())
            .filter(|ingredient| !ingredient.ready);

        for ingredient in pending {
            let normalized = Self::normalize_name(&ingredient.name);

            match positions.get(&normalized) {
                Some(&position) => {
                    let entry = &mut result[position];
                    entry.quantity = combine_quantities(&entry.quantity, &ingredient.quantity);
                }
                None => {
                    positions.insert(normalized, result.len());
                    result.push(AggregatedIngredient {
                        name: ingredient.name.to_owned(),
                        quantity: match ingredient.quantity.as_str() {
                            "" => "1".to_owned(),
                            quantity => quantity.to_owned(),
                        },
                    });
                }
            }
        }

        tracing::debug!(
            meals = plan.len(),
            ingredients = result.len(),
            "ingredients aggregated"
        );

        result
    }

    /// Normalize ingredient name (trim whitespace, lowercase)
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Alphabetical, case-insensitive order for display and export.
    pub fn sort_by_name(items: &mut [AggregatedIngredient]) {
        items.sort_by_cached_key(|item| Self::normalize_name(&item.name));
    }
}

/// Textual quantity merge.
///
/// An empty side or a literal "1" counts as unspecified and yields the
/// other side; two unspecified sides give "1".
pub fn combine_quantities(a: &str, b: &str) -> String {
    let unspecified = |q: &str| q.is_empty() || q == "1";

    if unspecified(a) {
        return if b.is_empty() { "1".to_owned() } else { b.to_owned() };
    }

    if unspecified(b) {
        return a.to_owned();
    }

    format!("{a} + {b}")
}

#[cfg(test)]
mod tests {
    use menuplan_mealplan::{Ingredient, SlotKey};
    use menuplan_shared::{BaseSlot, Day};

    use super::*;

    fn ingredient(name: &str, quantity: &str, ready: bool) -> Ingredient {
        Ingredient {
            id: menuplan_shared::new_id(),
            name: name.to_owned(),
            quantity: quantity.to_owned(),
            ready,
        }
    }

    #[test]
    fn test_combine_quantities() {
        assert_eq!(combine_quantities("1", "1"), "1");
        assert_eq!(combine_quantities("", ""), "1");
        assert_eq!(combine_quantities("2 pcs", "1"), "2 pcs");
        assert_eq!(combine_quantities("1", "2 pcs"), "2 pcs");
        assert_eq!(combine_quantities("", "3"), "3");
        assert_eq!(combine_quantities("2 pcs", "3 pcs"), "2 pcs + 3 pcs");
        assert_eq!(combine_quantities("2 + 3", "4"), "2 + 3 + 4");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(IngredientAggregationService::normalize_name("  Telur  "), "telur");
        assert_eq!(IngredientAggregationService::normalize_name("BAWANG"), "bawang");
    }

    #[test]
    fn test_aggregate_scenario() {
        let mut plan = MealPlan::default();
        plan.set_meal_name(Day::Senin, BaseSlot::Sarapan.into(), "Nasi Goreng", "Sarapan");
        plan.set_ingredients(
            Day::Senin,
            BaseSlot::Sarapan.into(),
            vec![ingredient("Telur", "2", false), ingredient("Beras", "1kg", true)],
            "Sarapan",
        );
        plan.set_meal_name(Day::Selasa, BaseSlot::Sarapan.into(), "Omelet", "Sarapan");
        plan.set_ingredients(
            Day::Selasa,
            BaseSlot::Sarapan.into(),
            vec![ingredient("telur", "3", false)],
            "Sarapan",
        );

        let result = IngredientAggregationService::aggregate(&plan);
        assert_eq!(
            result,
            [AggregatedIngredient {
                name: "Telur".to_owned(),
                quantity: "2 + 3".to_owned(),
            }]
        );
    }

    #[test]
    fn test_aggregate_keeps_first_seen_order() {
        let mut plan = MealPlan::default();
        plan.set_ingredients(
            Day::Rabu,
            SlotKey::Custom("01JSNACK".to_owned()),
            vec![
                ingredient("Tepung", "", false),
                ingredient(" Gula ", "100g", false),
            ],
            "Cemilan",
        );
        plan.set_ingredients(
            Day::Senin,
            BaseSlot::Malam.into(),
            vec![ingredient("Ayam", "1 ekor", false), ingredient("gula", "1", false)],
            "Makan Malam",
        );

        let result = IngredientAggregationService::aggregate(&plan);
        let names = result.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Tepung", " Gula ", "Ayam"]);
        assert_eq!(result[0].quantity, "1");
        assert_eq!(result[1].quantity, "100g");
    }

    #[test]
    fn test_ready_ingredients_never_aggregated() {
        let mut plan = MealPlan::default();
        plan.set_ingredients(
            Day::Minggu,
            BaseSlot::Siang.into(),
            vec![ingredient("Garam", "1", true), ingredient("garam", "2", true)],
            "Makan Siang",
        );

        assert!(IngredientAggregationService::aggregate(&plan).is_empty());
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let mut plan = MealPlan::default();
        plan.set_ingredients(
            Day::Kamis,
            BaseSlot::Siang.into(),
            vec![ingredient("Tahu", "5", false), ingredient("Tempe", "2", false)],
            "Makan Siang",
        );

        assert_eq!(
            IngredientAggregationService::aggregate(&plan),
            IngredientAggregationService::aggregate(&plan)
        );
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut items = ["telur", "Bawang", "ayam"]
            .iter()
            .map(|name| AggregatedIngredient {
                name: name.to_string(),
                quantity: "1".to_owned(),
            })
            .collect::<Vec<_>>();

        IngredientAggregationService::sort_by_name(&mut items);
        let names = items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["ayam", "Bawang", "telur"]);
    }
}
