use clap::Subcommand;
use menuplan::Config;
use menuplan_shared::Confirmation;

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// Save the current week under a name
    Save { name: String },
    /// Replace the current week with a saved one
    Apply {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete a saved template
    Delete { id: String },
    /// List saved templates
    List,
}

#[tracing::instrument(skip_all)]
pub async fn template(config: Config, command: TemplateCommand) -> anyhow::Result<()> {
    let mut planner = super::open_planner(&config).await?;

    match command {
        TemplateCommand::Save { name } => {
            let id = planner.save_template(&name).await?;
            println!("{id}");
        }
        TemplateCommand::Apply { id, yes } => {
            let materialized = planner
                .apply_template(&id, Confirmation::from_flag(yes))
                .await?;
            if materialized > 0 {
                tracing::info!(materialized, "custom slots recreated from template");
            }
            println!("Template applied");
        }
        TemplateCommand::Delete { id } => {
            let template = planner.delete_template(&id).await?;
            println!("Template '{}' deleted", template.name);
        }
        TemplateCommand::List => {
            for template in planner.templates() {
                println!(
                    "{}\t{}\t{} meals\t{}",
                    template.id,
                    template.name,
                    template.meal_plan.len(),
                    template.created_at
                );
            }
        }
    }

    Ok(())
}
