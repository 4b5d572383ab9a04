pub mod aggregation;
pub mod list;

pub use aggregation::{AggregatedIngredient, IngredientAggregationService, combine_quantities};
pub use list::{ShoppingItem, ShoppingList, ShoppingStats};
