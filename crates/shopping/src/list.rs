use std::collections::{HashMap, HashSet};

use menuplan_mealplan::IngredientInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AggregatedIngredient;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShoppingStats {
    pub total: usize,
    pub checked: usize,
    pub remaining: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new(items: Vec<ShoppingItem>) -> Self {
        Self { items }
    }

    /// Reconcile a freshly aggregated list with this one and replace it.
    ///
    /// Items whose lowercase name was already on the list keep their id and
    /// checked flag but take the new quantity. Previous items that no longer
    /// match anything are kept, unchanged, at the end. When the previous list
    /// holds the same name twice, the later entry is the one matched.
    pub fn merge(&mut self, aggregated: Vec<AggregatedIngredient>) {
        let previous = std::mem::take(&mut self.items);
        let by_name = previous
            .iter()
            .enumerate()
            .map(|(position, item)| (item.name.to_lowercase(), position))
            .collect::<HashMap<_, _>>();

        let mut merged = aggregated
            .into_iter()
            .map(|ingredient| {
                let mut item = ShoppingItem {
                    id: menuplan_shared::new_id(),
                    name: ingredient.name,
                    quantity: ingredient.quantity,
                    checked: false,
                };

                if let Some(&position) = by_name.get(&item.name.to_lowercase()) {
                    item.id = previous[position].id.to_owned();
                    item.checked = previous[position].checked;
                }

                item
            })
            .collect::<Vec<_>>();

        let mut kept = merged
            .iter()
            .map(|item| item.name.to_lowercase())
            .collect::<HashSet<_>>();

        let orphans = previous
            .into_iter()
            .filter(|item| kept.insert(item.name.to_lowercase()))
            .collect::<Vec<_>>();

        tracing::debug!(
            items = merged.len(),
            orphans = orphans.len(),
            "shopping list merged"
        );

        merged.extend(orphans);
        self.items = merged;
    }

    pub fn toggle(&mut self, id: &str) -> menuplan_shared::Result<bool> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            menuplan_shared::not_found!("shopping item '{id}'");
        };

        item.checked = !item.checked;

        Ok(item.checked)
    }

    /// Adds an item by hand. It survives later regenerations as an orphan.
    pub fn add_item(&mut self, input: IngredientInput) -> menuplan_shared::Result<String> {
        input.validate()?;

        let item = ShoppingItem {
            id: menuplan_shared::new_id(),
            name: input.name,
            quantity: input.quantity,
            checked: false,
        };
        let id = item.id.to_owned();
        self.items.push(item);

        Ok(id)
    }

    pub fn stats(&self) -> ShoppingStats {
        let total = self.items.len();
        let checked = self.items.iter().filter(|item| item.checked).count();

        ShoppingStats {
            total,
            checked,
            remaining: total - checked,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
