use menuplan_db::{DocumentKey, Storage};
use menuplan_mealplan::{
    Ingredient, IngredientInput, Meal, MealPlan, SlotKey, SlotRegistry, SlotView, Template,
    TemplateStore, WeekPlan,
};
use menuplan_shared::{Confirmation, Day, Result};
use menuplan_shopping::{IngredientAggregationService, ShoppingList, ShoppingStats};
use time::Date;

use crate::export;
use crate::theme::Theme;

/// Result of regenerating the shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// No meal holds an ingredient that still needs buying; the stored list
    /// was left as it was.
    NothingToGenerate,
    Generated { total: usize },
}

/// Rendered weekly menu, ready to be written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub file_name: String,
    pub text: String,
}

/// Owns the live planner state and writes every change through to storage.
///
/// Each mutating operation saves the whole affected document once it
/// succeeds. A failed validation leaves memory and storage untouched, and a
/// failed save puts the previous in-memory state back.
pub struct Planner {
    storage: Storage,
    week: WeekPlan,
    shopping: ShoppingList,
    templates: TemplateStore,
    theme: Theme,
}

impl Planner {
    #[tracing::instrument(skip_all)]
    pub async fn load(storage: Storage) -> Result<Self> {
        let meals = storage.load::<MealPlan>(DocumentKey::MealPlan).await?;
        let slots = storage.load::<SlotRegistry>(DocumentKey::CustomSlots).await?;
        let shopping = storage.load::<ShoppingList>(DocumentKey::ShoppingList).await?;
        let templates = storage.load::<TemplateStore>(DocumentKey::Templates).await?;
        let theme = storage.load::<String>(DocumentKey::Theme).await?;

        tracing::debug!(
            meals = meals.len(),
            custom_slots = slots.len(),
            shopping_items = shopping.len(),
            templates = templates.len(),
            "planner loaded"
        );

        Ok(Self {
            storage,
            week: WeekPlan::new(meals, slots),
            shopping,
            templates,
            theme: Theme::parse_lenient(&theme),
        })
    }

    pub fn week(&self) -> &WeekPlan {
        &self.week
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping
    }

    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn list_slots(&self, day: Day) -> Vec<SlotView> {
        self.week.list_slots(day)
    }

    pub fn label_of(&self, day: Day, slot: &SlotKey) -> String {
        self.week.label_of(day, slot)
    }

    async fn write_week(&self) -> Result<()> {
        self.storage
            .save(DocumentKey::CustomSlots, &self.week.slots)
            .await?;
        self.storage
            .save(DocumentKey::MealPlan, &self.week.meals)
            .await
    }

    /// Saves the slot registry and the meal plan. When a write fails the
    /// week goes back to `previous` and both documents are rewritten from it.
    async fn commit_week(&mut self, previous: WeekPlan) -> Result<()> {
        let pruned = self.week.prune_inactive();
        if pruned > 0 {
            tracing::debug!(pruned, "meals of removed slots dropped");
        }

        let Err(err) = self.write_week().await else {
            return Ok(());
        };

        tracing::warn!(error = %err, "saving the week failed, previous plan restored");
        self.week = previous;
        if let Err(rollback) = self.write_week().await {
            tracing::warn!(error = %rollback, "previous plan not written back");
        }

        Err(err)
    }

    async fn commit_shopping_list(&mut self, previous: ShoppingList) -> Result<()> {
        let Err(err) = self
            .storage
            .save(DocumentKey::ShoppingList, &self.shopping)
            .await
        else {
            return Ok(());
        };

        tracing::warn!(error = %err, "saving the shopping list failed, previous list restored");
        self.shopping = previous;

        Err(err)
    }

    async fn commit_templates(&mut self, previous: TemplateStore) -> Result<()> {
        let Err(err) = self
            .storage
            .save(DocumentKey::Templates, &self.templates)
            .await
        else {
            return Ok(());
        };

        tracing::warn!(error = %err, "saving templates failed, previous templates restored");
        self.templates = previous;

        Err(err)
    }

    #[tracing::instrument(skip(self, name), fields(day = %day, slot = %slot))]
    pub async fn set_meal_name(&mut self, day: Day, slot: SlotKey, name: &str) -> Result<()> {
        let previous = self.week.clone();
        self.week.set_meal_name(day, slot, name.trim())?;
        self.commit_week(previous).await
    }

    /// Replaces the whole ingredient list of a meal.
    #[tracing::instrument(skip(self, ingredients), fields(day = %day, slot = %slot))]
    pub async fn set_ingredients(
        &mut self,
        day: Day,
        slot: SlotKey,
        ingredients: Vec<Ingredient>,
    ) -> Result<()> {
        let previous = self.week.clone();
        self.week.set_ingredients(day, slot, ingredients)?;
        self.commit_week(previous).await
    }

    #[tracing::instrument(skip(self, input), fields(day = %day, slot = %slot))]
    pub async fn add_ingredient(
        &mut self,
        day: Day,
        slot: SlotKey,
        input: IngredientInput,
    ) -> Result<String> {
        let previous = self.week.clone();
        let id = self.week.add_ingredient(day, slot, input)?;
        self.commit_week(previous).await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self, input), fields(day = %day, slot = %slot))]
    pub async fn update_ingredient(
        &mut self,
        day: Day,
        slot: SlotKey,
        id: &str,
        input: IngredientInput,
    ) -> Result<()> {
        let previous = self.week.clone();
        self.week.update_ingredient(day, slot, id, input)?;
        self.commit_week(previous).await
    }

    #[tracing::instrument(skip(self), fields(day = %day, slot = %slot))]
    pub async fn remove_ingredient(&mut self, day: Day, slot: SlotKey, id: &str) -> Result<()> {
        let previous = self.week.clone();
        self.week.remove_ingredient(day, slot, id)?;
        self.commit_week(previous).await
    }

    #[tracing::instrument(skip(self), fields(day = %day, slot = %slot))]
    pub async fn set_ingredient_ready(
        &mut self,
        day: Day,
        slot: SlotKey,
        id: &str,
        ready: bool,
    ) -> Result<()> {
        let previous = self.week.clone();
        self.week.set_ingredient_ready(day, slot, id, ready)?;
        self.commit_week(previous).await
    }

    #[tracing::instrument(skip(self), fields(day = %day))]
    pub async fn add_custom_slot(&mut self, day: Day, label: &str) -> Result<String> {
        let previous = self.week.clone();
        let id = self.week.add_custom_slot(day, label);
        self.commit_week(previous).await?;

        Ok(id)
    }

    /// Removes the slot and, in the same step, the meal stored under it.
    #[tracing::instrument(skip(self), fields(day = %day))]
    pub async fn remove_custom_slot(&mut self, day: Day, id: &str) -> Result<Option<Meal>> {
        let previous = self.week.clone();
        let removed = self.week.remove_custom_slot(day, id)?;
        self.commit_week(previous).await?;

        Ok(removed)
    }

    /// Rebuilds the shopping list from the current plan.
    ///
    /// Items that survive keep their id and checked state; items no longer
    /// produced by the plan stay on the list untouched.
    #[tracing::instrument(skip(self))]
    pub async fn generate_shopping_list(&mut self) -> Result<GenerateOutcome> {
        let aggregated = IngredientAggregationService::aggregate(&self.week.meals);
        if aggregated.is_empty() {
            tracing::info!("no ingredients to buy, shopping list left unchanged");
            return Ok(GenerateOutcome::NothingToGenerate);
        }

        let previous = self.shopping.clone();
        self.shopping.merge(aggregated);
        self.commit_shopping_list(previous).await?;

        let total = self.shopping.len();
        tracing::info!(total, "shopping list generated");

        Ok(GenerateOutcome::Generated { total })
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_item(&mut self, id: &str) -> Result<bool> {
        let previous = self.shopping.clone();
        let checked = self.shopping.toggle(id)?;
        self.commit_shopping_list(previous).await?;

        Ok(checked)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn add_shopping_item(&mut self, input: IngredientInput) -> Result<String> {
        let previous = self.shopping.clone();
        let id = self.shopping.add_item(input)?;
        self.commit_shopping_list(previous).await?;

        Ok(id)
    }

    pub fn shopping_stats(&self) -> ShoppingStats {
        self.shopping.stats()
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_shopping_list(&mut self, confirmation: Confirmation) -> Result<()> {
        confirmation.require("clear the shopping list")?;

        let previous = self.shopping.clone();
        self.shopping.clear();
        self.commit_shopping_list(previous).await?;

        tracing::info!("shopping list cleared");

        Ok(())
    }

    /// Removes every meal. Custom slots stay registered.
    #[tracing::instrument(skip(self))]
    pub async fn clear_meal_plan(&mut self, confirmation: Confirmation) -> Result<()> {
        confirmation.require("clear the whole meal plan")?;

        self.storage.remove(DocumentKey::MealPlan).await?;
        self.week.clear_meals();

        tracing::info!("meal plan cleared");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn save_template(&mut self, name: &str) -> Result<String> {
        let previous = self.templates.clone();
        let id = self.templates.save(name, &self.week)?;
        self.commit_templates(previous).await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn apply_template(&mut self, id: &str, confirmation: Confirmation) -> Result<usize> {
        let previous = self.week.clone();
        let materialized = self.templates.apply(id, &mut self.week, confirmation)?;
        self.commit_week(previous).await?;

        Ok(materialized)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_template(&mut self, id: &str) -> Result<Template> {
        let previous = self.templates.clone();
        let template = self.templates.delete(id)?;
        self.commit_templates(previous).await?;

        tracing::info!(template = id, "template deleted");

        Ok(template)
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.storage.save(DocumentKey::Theme, &theme).await?;
        self.theme = theme;

        Ok(())
    }

    pub fn export(&self, date: Date) -> Result<Export> {
        Ok(Export {
            file_name: export::export_file_name(date),
            text: export::export_text(&self.week)?,
        })
    }
}
