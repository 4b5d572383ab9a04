use clap::Subcommand;
use menuplan::{Config, GenerateOutcome};
use menuplan_mealplan::IngredientInput;
use menuplan_shared::Confirmation;

#[derive(Subcommand)]
pub enum ShoppingCommand {
    /// Rebuild the list from the meal plan, keeping checked items
    Generate,
    /// Print the list with its progress
    Show,
    /// Check or uncheck an item
    Toggle { id: String },
    /// Add an item that is not part of any meal
    Add {
        name: String,
        #[arg(long, short, default_value = "")]
        quantity: String,
    },
    /// Empty the list
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[tracing::instrument(skip_all)]
pub async fn shopping(config: Config, command: ShoppingCommand) -> anyhow::Result<()> {
    let mut planner = super::open_planner(&config).await?;

    match command {
        ShoppingCommand::Generate => match planner.generate_shopping_list().await? {
            GenerateOutcome::NothingToGenerate => {
                println!("No ingredients to buy, add ingredients to your meals first")
            }
            GenerateOutcome::Generated { total } => println!("Shopping list has {total} items"),
        },
        ShoppingCommand::Show => {
            for item in planner.shopping_list().iter() {
                let mark = if item.checked { "x" } else { " " };
                println!("[{mark}] {} ({}) [{}]", item.name, item.quantity, item.id);
            }

            let stats = planner.shopping_stats();
            println!(
                "{} items, {} checked, {} remaining",
                stats.total, stats.checked, stats.remaining
            );
        }
        ShoppingCommand::Toggle { id } => {
            let checked = planner.toggle_item(&id).await?;
            println!("{}", if checked { "checked" } else { "unchecked" });
        }
        ShoppingCommand::Add { name, quantity } => {
            let id = planner
                .add_shopping_item(IngredientInput::new(name, quantity))
                .await?;
            println!("{id}");
        }
        ShoppingCommand::Clear { yes } => {
            planner
                .clear_shopping_list(Confirmation::from_flag(yes))
                .await?;
            println!("Shopping list cleared");
        }
    }

    Ok(())
}
