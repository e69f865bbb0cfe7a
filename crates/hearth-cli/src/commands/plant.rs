//! Plant care commands.

use chrono::Utc;
use clap::Subcommand;
use hearth_core::plants::needing_water;
use hearth_core::{Config, HouseholdDb, Plant};

use super::{active_household, active_user, CliResult};

#[derive(Subcommand)]
pub enum PlantAction {
    /// Register a plant (due for its first watering immediately)
    Add {
        /// Plant name
        name: String,
        /// Where the plant lives
        #[arg(long, default_value = "")]
        location: String,
        /// Days between waterings
        #[arg(long, default_value = "7")]
        every: u32,
    },
    /// List plants
    List {
        /// Only plants due for water
        #[arg(long)]
        due: bool,
    },
    /// Record a watering
    Water {
        /// Plant ID
        id: String,
    },
    /// Delete a plant
    Delete {
        /// Plant ID
        id: String,
    },
}

pub fn run(action: PlantAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    match action {
        PlantAction::Add { name, location, every } => {
            let user = active_user(&config)?;
            let plant = Plant::new(&household_id, name, location, every, user);
            db.create_plant(&plant)?;
            println!("Plant registered: {}", plant.id);
            println!("{}", serde_json::to_string_pretty(&plant)?);
        }
        PlantAction::List { due } => {
            let plants = db.list_plants(&household_id)?;
            if due {
                let thirsty = needing_water(&plants, Utc::now());
                println!("{}", serde_json::to_string_pretty(&thirsty)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&plants)?);
            }
        }
        PlantAction::Water { id } => {
            let mut plant = db.get_plant(&id)?.ok_or(format!("Plant not found: {id}"))?;
            plant.water(Utc::now());
            db.update_plant(&plant)?;
            println!(
                "{} watered, next due {}",
                plant.name,
                plant
                    .next_watering
                    .map(|t| t.date_naive().to_string())
                    .unwrap_or_default()
            );
        }
        PlantAction::Delete { id } => {
            if db.delete_plant(&id)? {
                println!("Plant deleted: {id}");
            } else {
                println!("Plant not found: {id}");
            }
        }
    }
    Ok(())
}
