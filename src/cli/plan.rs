use clap::Subcommand;
use menuplan::Config;
use menuplan_mealplan::{IngredientInput, SlotKey};
use menuplan_shared::{Confirmation, Day};
use strum::VariantArray;

#[derive(Subcommand)]
pub enum MealCommand {
    /// Set the meal name of a slot
    Set {
        day: Day,
        /// Base slot (sarapan, siang, malam) or a custom slot id
        slot: SlotKey,
        name: String,
    },
    /// Show the week, or a single day
    Show {
        #[arg(long)]
        day: Option<Day>,
    },
    /// Remove every meal from the plan
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum IngredientCommand {
    /// Add an ingredient to a meal
    Add {
        day: Day,
        slot: SlotKey,
        name: String,
        #[arg(long, short, default_value = "")]
        quantity: String,
    },
    /// Replace an ingredient's name and quantity
    Update {
        day: Day,
        slot: SlotKey,
        id: String,
        name: String,
        #[arg(long, short, default_value = "")]
        quantity: String,
    },
    /// Remove an ingredient from a meal
    Remove { day: Day, slot: SlotKey, id: String },
    /// Mark an ingredient as already at home
    Ready {
        day: Day,
        slot: SlotKey,
        id: String,
        /// Put it back on the shopping list instead
        #[arg(long)]
        unset: bool,
    },
}

#[derive(Subcommand)]
pub enum SlotCommand {
    /// Add a custom slot to a day
    Add {
        day: Day,
        #[arg(default_value = "")]
        label: String,
    },
    /// Remove a custom slot and the meal stored under it
    Remove { day: Day, id: String },
    /// List the slots of a day
    List { day: Day },
}

#[tracing::instrument(skip_all)]
pub async fn meal(config: Config, command: MealCommand) -> anyhow::Result<()> {
    let mut planner = super::open_planner(&config).await?;

    match command {
        MealCommand::Set { day, slot, name } => {
            let label = planner.label_of(day, &slot);
            planner.set_meal_name(day, slot, &name).await?;
            println!("{} {label}: {}", day.label(), name.trim());
        }
        MealCommand::Show { day } => {
            let days = match day {
                Some(day) => vec![day],
                None => Day::VARIANTS.to_vec(),
            };

            for day in days {
                println!("{}", day.label());

                for view in planner.list_slots(day) {
                    let meal = planner.week().get(day, &view.key);
                    let name = meal.map(|meal| meal.name.as_str()).unwrap_or_default();
                    let marker = if view.is_custom {
                        format!(" [{}]", view.key)
                    } else {
                        String::new()
                    };
                    println!("  {}{marker}: {name}", view.label);

                    for ingredient in meal.iter().flat_map(|meal| meal.ingredients.iter()) {
                        let ready = if ingredient.ready { " (ready)" } else { "" };
                        println!(
                            "    - {} ({}){ready} [{}]",
                            ingredient.name, ingredient.quantity, ingredient.id
                        );
                    }
                }
            }
        }
        MealCommand::Clear { yes } => {
            planner.clear_meal_plan(Confirmation::from_flag(yes)).await?;
            println!("Meal plan cleared");
        }
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn ingredient(config: Config, command: IngredientCommand) -> anyhow::Result<()> {
    let mut planner = super::open_planner(&config).await?;

    match command {
        IngredientCommand::Add {
            day,
            slot,
            name,
            quantity,
        } => {
            let id = planner
                .add_ingredient(day, slot, IngredientInput::new(name, quantity))
                .await?;
            println!("{id}");
        }
        IngredientCommand::Update {
            day,
            slot,
            id,
            name,
            quantity,
        } => {
            planner
                .update_ingredient(day, slot, &id, IngredientInput::new(name, quantity))
                .await?;
        }
        IngredientCommand::Remove { day, slot, id } => {
            planner.remove_ingredient(day, slot, &id).await?;
        }
        IngredientCommand::Ready {
            day,
            slot,
            id,
            unset,
        } => {
            planner.set_ingredient_ready(day, slot, &id, !unset).await?;
        }
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn slot(config: Config, command: SlotCommand) -> anyhow::Result<()> {
    let mut planner = super::open_planner(&config).await?;

    match command {
        SlotCommand::Add { day, label } => {
            let id = planner.add_custom_slot(day, &label).await?;
            println!("{id}");
        }
        SlotCommand::Remove { day, id } => {
            match planner.remove_custom_slot(day, &id).await? {
                Some(meal) if !meal.name.is_empty() => {
                    println!("Slot removed together with '{}'", meal.name)
                }
                _ => println!("Slot removed"),
            }
        }
        SlotCommand::List { day } => {
            for view in planner.list_slots(day) {
                let kind = if view.is_custom { "custom" } else { "base" };
                println!("{}\t{}\t{kind}", view.key, view.label);
            }
        }
    }

    Ok(())
}
