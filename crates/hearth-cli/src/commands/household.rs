//! Household management commands.

use chrono::{Duration, Utc};
use clap::Subcommand;
use hearth_core::{Config, Household, HouseholdDb};

use super::{active_household, active_user, CliResult};

#[derive(Subcommand)]
pub enum HouseholdAction {
    /// Create a household and make it active
    Create {
        /// Household name
        name: String,
    },
    /// Show the active household
    Show,
    /// Switch the active household
    Use {
        /// Household ID
        id: String,
    },
    /// Generate an invite code (valid for 7 days)
    Invite,
    /// Join a household using an invite code
    Join {
        /// Household ID
        id: String,
        /// Invite code
        code: String,
    },
    /// Add a member directly
    AddMember {
        /// User ID to add
        user: String,
    },
}

pub fn run(action: HouseholdAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let mut config = Config::load()?;

    match action {
        HouseholdAction::Create { name } => {
            let user = active_user(&config)?;
            let household = Household::new(name, user);
            db.create_household(&household)?;
            config.active_household = Some(household.id.clone());
            config.save()?;
            println!("Household created: {}", household.id);
            println!("{}", serde_json::to_string_pretty(&household)?);
        }
        HouseholdAction::Show => {
            let id = active_household(&config)?;
            match db.get_household(&id)? {
                Some(household) => println!("{}", serde_json::to_string_pretty(&household)?),
                None => println!("Household not found: {id}"),
            }
        }
        HouseholdAction::Use { id } => {
            if db.get_household(&id)?.is_none() {
                return Err(format!("Household not found: {id}").into());
            }
            config.active_household = Some(id.clone());
            config.save()?;
            println!("Active household: {id}");
        }
        HouseholdAction::Invite => {
            let id = active_household(&config)?;
            let mut household = db
                .get_household(&id)?
                .ok_or(format!("Household not found: {id}"))?;

            let code: String = uuid::Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(8)
                .collect::<String>()
                .to_uppercase();
            household.invite_code = Some(code.clone());
            household.invite_expires_at = Some(Utc::now() + Duration::days(7));
            db.update_household(&household)?;
            println!("Invite code: {code} (expires in 7 days)");
        }
        HouseholdAction::Join { id, code } => {
            let user = active_user(&config)?;
            let mut household = db
                .get_household(&id)?
                .ok_or(format!("Household not found: {id}"))?;

            if !household.invite_is_valid(&code, Utc::now()) {
                return Err("invalid or expired invite code".into());
            }
            household.add_member(&user);
            db.update_household(&household)?;
            config.active_household = Some(id.clone());
            config.save()?;
            println!("Joined household: {id}");
        }
        HouseholdAction::AddMember { user } => {
            let id = active_household(&config)?;
            let mut household = db
                .get_household(&id)?
                .ok_or(format!("Household not found: {id}"))?;
            household.add_member(&user);
            db.update_household(&household)?;
            println!("Members: {}", household.members.join(", "));
        }
    }
    Ok(())
}
