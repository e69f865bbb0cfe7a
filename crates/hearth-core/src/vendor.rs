//! Vendor and maintenance records: utility providers, contracts, and
//! recurring service visits.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of vendor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorType {
    Utility,
    Maintenance,
    Service,
    Other,
}

impl VendorType {
    /// Parse from the lowercase storage form. Unknown values map to `Other`.
    pub fn parse(s: &str) -> VendorType {
        match s {
            "utility" => VendorType::Utility,
            "maintenance" => VendorType::Maintenance,
            "service" => VendorType::Service,
            _ => VendorType::Other,
        }
    }

    /// Lowercase storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorType::Utility => "utility",
            VendorType::Maintenance => "maintenance",
            VendorType::Service => "service",
            VendorType::Other => "other",
        }
    }
}

impl fmt::Display for VendorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details for a vendor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
}

/// A supply or service contract with a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_cost: Option<f64>,
    pub notes: Option<String>,
}

impl Contract {
    /// Whether the contract is active on `date` (inclusive bounds).
    pub fn is_active(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }
}

/// A recurring maintenance visit (e.g. annual boiler check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    /// What gets serviced
    pub service_type: String,
    /// Days between services
    pub frequency_days: u32,
    /// When the service last happened
    pub last_service: Option<DateTime<Utc>>,
    /// When the next service is due
    pub next_service: Option<DateTime<Utc>>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl MaintenanceEntry {
    /// Whether the service is due at `reference`. Entries with no schedule
    /// yet are never flagged, same rule as plant watering.
    pub fn is_due(&self, reference: DateTime<Utc>) -> bool {
        match self.next_service {
            Some(next) => next <= reference,
            None => false,
        }
    }

    /// Record a completed service at `now` and schedule the next one.
    pub fn record_service(&mut self, now: DateTime<Utc>) {
        self.last_service = Some(now);
        self.next_service = Some(now + Duration::days(self.frequency_days as i64));
    }
}

/// A vendor the household deals with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    /// Unique identifier
    pub id: String,
    /// Owning household
    pub household_id: String,
    /// Vendor name
    pub name: String,
    /// Kind of vendor
    pub vendor_type: VendorType,
    /// Contact details
    #[serde(default)]
    pub contact: ContactInfo,
    /// Contracts with this vendor
    #[serde(default)]
    pub contracts: Vec<Contract>,
    /// Recurring maintenance visits
    #[serde(default)]
    pub maintenance: Vec<MaintenanceEntry>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
    /// Member who added the vendor
    pub created_by: String,
}

impl Vendor {
    /// Create a new vendor record.
    pub fn new(
        household_id: impl Into<String>,
        name: impl Into<String>,
        vendor_type: VendorType,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Vendor {
            id: uuid::Uuid::new_v4().to_string(),
            household_id: household_id.into(),
            name: name.into(),
            vendor_type,
            contact: ContactInfo::default(),
            contracts: Vec::new(),
            maintenance: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// Total monthly cost of contracts active on `date`.
    pub fn active_monthly_cost(&self, date: NaiveDate) -> f64 {
        self.contracts
            .iter()
            .filter(|c| c.is_active(date))
            .filter_map(|c| c.monthly_cost)
            .sum()
    }
}

/// `(vendor, entry)` pairs for every maintenance service due at `reference`.
pub fn services_due<'a>(
    vendors: &'a [Vendor],
    reference: DateTime<Utc>,
) -> Vec<(&'a Vendor, &'a MaintenanceEntry)> {
    vendors
        .iter()
        .flat_map(|v| v.maintenance.iter().map(move |m| (v, m)))
        .filter(|(_, m)| m.is_due(reference))
        .collect()
}
