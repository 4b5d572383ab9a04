use std::fmt::{self, Write};

use menuplan_mealplan::WeekPlan;
use menuplan_shared::Day;
use menuplan_shopping::IngredientAggregationService;
use strum::VariantArray;
use time::Date;

const RULE_WIDTH: usize = 60;

/// Suggested file name of an export made on `date`.
pub fn export_file_name(date: Date) -> String {
    format!("Daftar_Menu_{date}.txt")
}

/// Renders the week as plain text: every day with at least one named meal,
/// followed by the aggregated ingredients sorted by name.
///
/// A week without any named meal has nothing to export.
pub fn export_text(week: &WeekPlan) -> menuplan_shared::Result<String> {
    let has_named_meal = week.meals.meals().any(|meal| !meal.name.trim().is_empty());
    if !has_named_meal {
        menuplan_shared::user!("Nothing to export, fill in a meal first");
    }

    render(week).map_err(|err| anyhow::Error::from(err).into())
}

fn render(week: &WeekPlan) -> Result<String, fmt::Error> {
    let banner = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    writeln!(out, "{banner}")?;
    writeln!(out, "DAFTAR MENU MAKANAN MINGGUAN")?;
    writeln!(out, "{banner}")?;
    writeln!(out)?;

    for day in Day::VARIANTS {
        let meals = week
            .list_slots(*day)
            .into_iter()
            .filter_map(|view| {
                week.get(*day, &view.key)
                    .filter(|meal| !meal.name.trim().is_empty())
                    .map(|meal| (view.label, meal))
            })
            .collect::<Vec<_>>();

        if meals.is_empty() {
            continue;
        }

        writeln!(out, "{}", day.label().to_uppercase())?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for (label, meal) in meals {
            writeln!(out, "  {label}: {}", meal.name)?;

            if !meal.ingredients.is_empty() {
                writeln!(out, "    Bahan-bahan:")?;
                for ingredient in &meal.ingredients {
                    writeln!(out, "      - {} ({})", ingredient.name, ingredient.quantity)?;
                }
            }

            writeln!(out)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{banner}")?;
    writeln!(out, "RINGKASAN BAHAN BELANJA")?;
    writeln!(out, "{banner}")?;
    writeln!(out)?;

    let mut summary = IngredientAggregationService::aggregate(&week.meals);
    IngredientAggregationService::sort_by_name(&mut summary);

    if summary.is_empty() {
        writeln!(out, "Belum ada bahan yang ditambahkan.")?;
    }

    for item in summary {
        writeln!(out, "- {} ({})", item.name, item.quantity)?;
    }

    Ok(out)
}
