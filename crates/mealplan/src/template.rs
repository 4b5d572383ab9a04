use menuplan_shared::Confirmation;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{MealPlan, SlotRegistry, WeekPlan};

/// Named snapshot of a whole week. Never changes after it is saved.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub meal_plan: MealPlan,
    #[serde(default)]
    pub custom_slots: SlotRegistry,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn save(&mut self, name: impl AsRef<str>, week: &WeekPlan) -> menuplan_shared::Result<String> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            menuplan_shared::user!("Template name is required");
        }

        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(anyhow::Error::from)?;

        let template = Template {
            id: menuplan_shared::new_id(),
            name: name.to_owned(),
            meal_plan: week.meals.snapshot(),
            custom_slots: week.slots.clone(),
            created_at,
        };
        let id = template.id.to_owned();
        self.templates.push(template);

        tracing::info!(template = %id, name, "template saved");

        Ok(id)
    }

    /// Replaces the live week with a copy of the template.
    ///
    /// Overwriting a week that has any content needs confirmation. Returns the
    /// number of custom slots that had to be registered for restored meals.
    pub fn apply(
        &self,
        id: &str,
        week: &mut WeekPlan,
        confirmation: Confirmation,
    ) -> menuplan_shared::Result<usize> {
        let Some(template) = self.get(id) else {
            menuplan_shared::not_found!("template '{id}'");
        };

        if week.has_content() {
            confirmation.require(format!("overwrite current plan with '{}'", template.name))?;
        }

        let materialized = week.restore(&template.meal_plan, &template.custom_slots);

        tracing::info!(template = id, materialized, "template applied");

        Ok(materialized)
    }

    pub fn delete(&mut self, id: &str) -> menuplan_shared::Result<Template> {
        let Some(position) = self.templates.iter().position(|t| t.id == id) else {
            menuplan_shared::not_found!("template '{id}'");
        };

        Ok(self.templates.remove(position))
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
