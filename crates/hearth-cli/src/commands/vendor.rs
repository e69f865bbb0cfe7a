//! Vendor and service contract commands.

use chrono::Utc;
use clap::Subcommand;
use hearth_core::vendor::{services_due, Contract, MaintenanceEntry};
use hearth_core::{Config, HouseholdDb, Vendor, VendorType};

use super::{active_household, active_user, parse_date, CliResult};

#[derive(Subcommand)]
pub enum VendorAction {
    /// Register a vendor
    Add {
        /// Vendor name
        name: String,
        /// Kind: utility, maintenance, service or other
        #[arg(long = "type", default_value = "other")]
        vendor_type: String,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Website
        #[arg(long)]
        website: Option<String>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List vendors
    List,
    /// Attach a contract to a vendor
    AddContract {
        /// Vendor ID
        id: String,
        /// Contract start date (YYYY-MM-DD)
        start: String,
        /// Contract end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Monthly cost
        #[arg(long)]
        monthly_cost: Option<f64>,
    },
    /// Attach a recurring maintenance service to a vendor
    AddService {
        /// Vendor ID
        id: String,
        /// What gets serviced (e.g. "boiler check")
        service: String,
        /// Days between services
        #[arg(long, default_value = "365")]
        every: u32,
    },
    /// Record a completed maintenance service
    RecordService {
        /// Vendor ID
        id: String,
        /// Service name
        service: String,
    },
    /// Maintenance services currently due
    Due,
    /// Total monthly cost of active contracts
    Costs,
    /// Delete a vendor
    Delete {
        /// Vendor ID
        id: String,
    },
}

pub fn run(action: VendorAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    match action {
        VendorAction::Add {
            name,
            vendor_type,
            phone,
            email,
            website,
            notes,
        } => {
            let user = active_user(&config)?;
            let mut vendor = Vendor::new(&household_id, name, VendorType::parse(&vendor_type), user);
            vendor.contact.phone = phone;
            vendor.contact.email = email;
            vendor.contact.website = website;
            vendor.notes = notes;
            db.create_vendor(&vendor)?;
            println!("Vendor registered: {}", vendor.id);
            println!("{}", serde_json::to_string_pretty(&vendor)?);
        }
        VendorAction::List => {
            let vendors = db.list_vendors(&household_id)?;
            println!("{}", serde_json::to_string_pretty(&vendors)?);
        }
        VendorAction::AddContract {
            id,
            start,
            end,
            monthly_cost,
        } => {
            let mut vendor = db.get_vendor(&id)?.ok_or(format!("Vendor not found: {id}"))?;
            vendor.contracts.push(Contract {
                start_date: parse_date(&start)?,
                end_date: end.as_deref().map(parse_date).transpose()?,
                monthly_cost,
                notes: None,
            });
            vendor.updated_at = Utc::now();
            db.update_vendor(&vendor)?;
            println!("Contract added to {}", vendor.name);
        }
        VendorAction::AddService { id, service, every } => {
            let mut vendor = db.get_vendor(&id)?.ok_or(format!("Vendor not found: {id}"))?;
            vendor.maintenance.push(MaintenanceEntry {
                service_type: service,
                frequency_days: every,
                last_service: None,
                next_service: Some(Utc::now()),
                notes: None,
            });
            vendor.updated_at = Utc::now();
            db.update_vendor(&vendor)?;
            println!("Service added to {}", vendor.name);
        }
        VendorAction::RecordService { id, service } => {
            let mut vendor = db.get_vendor(&id)?.ok_or(format!("Vendor not found: {id}"))?;
            let entry = vendor
                .maintenance
                .iter_mut()
                .find(|m| m.service_type == service)
                .ok_or(format!("Service not found: {service}"))?;
            entry.record_service(Utc::now());
            let next = entry
                .next_service
                .map(|t| t.date_naive().to_string())
                .unwrap_or_default();
            vendor.updated_at = Utc::now();
            db.update_vendor(&vendor)?;
            println!("{service} recorded, next due {next}");
        }
        VendorAction::Due => {
            let vendors = db.list_vendors(&household_id)?;
            for (vendor, entry) in services_due(&vendors, Utc::now()) {
                println!("{}: {}", vendor.name, entry.service_type);
            }
        }
        VendorAction::Costs => {
            let today = Utc::now().date_naive();
            let vendors = db.list_vendors(&household_id)?;
            let mut total = 0.0;
            for vendor in &vendors {
                let cost = vendor.active_monthly_cost(today);
                if cost > 0.0 {
                    println!("{}: {:.2}/month", vendor.name, cost);
                    total += cost;
                }
            }
            println!("Total: {total:.2}/month");
        }
        VendorAction::Delete { id } => {
            if db.delete_vendor(&id)? {
                println!("Vendor deleted: {id}");
            } else {
                println!("Vendor not found: {id}");
            }
        }
    }
    Ok(())
}
