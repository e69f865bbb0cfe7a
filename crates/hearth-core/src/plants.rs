//! Plant-watering reminders.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A houseplant with a watering cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    /// Unique identifier
    pub id: String,
    /// Owning household
    pub household_id: String,
    /// Plant name
    pub name: String,
    /// Where the plant lives (e.g. "Kitchen windowsill")
    pub location: String,
    /// Days between waterings
    pub watering_frequency: u32,
    /// When the plant was last watered
    pub last_watered: Option<DateTime<Utc>>,
    /// When the plant is next due for water
    pub next_watering: Option<DateTime<Utc>>,
    /// Light requirements
    pub light_notes: Option<String>,
    /// Fertilizer schedule notes
    pub fertilizer_notes: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
    /// Member who added the plant
    pub created_by: String,
}

impl Plant {
    /// Register a new plant, due for its first watering immediately.
    pub fn new(
        household_id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        watering_frequency: u32,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Plant {
            id: uuid::Uuid::new_v4().to_string(),
            household_id: household_id.into(),
            name: name.into(),
            location: location.into(),
            watering_frequency,
            last_watered: None,
            next_watering: Some(now),
            light_notes: None,
            fertilizer_notes: None,
            notes: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// Whether the plant is due for water at `reference`. A plant with no
    /// schedule yet is never flagged.
    pub fn needs_water(&self, reference: DateTime<Utc>) -> bool {
        match self.next_watering {
            Some(next) => next <= reference,
            None => false,
        }
    }

    /// Record a watering at `now` and schedule the next one
    /// `watering_frequency` days out.
    pub fn water(&mut self, now: DateTime<Utc>) {
        self.last_watered = Some(now);
        self.next_watering = Some(now + Duration::days(self.watering_frequency as i64));
        self.updated_at = now;
    }
}

/// Plants due for water at `reference`.
pub fn needing_water(plants: &[Plant], reference: DateTime<Utc>) -> Vec<&Plant> {
    plants.iter().filter(|p| p.needs_water(reference)).collect()
}
