//! Household task types and room templates.
//!
//! Tasks belong to a household and recur according to a [`Frequency`].
//! Occurrence membership (which dates a task is due on) lives in the
//! [`occurrence`] module; calendar grid helpers live in [`calendar`].

pub mod calendar;
pub mod occurrence;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Room a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Room {
    Kitchen,
    Bathroom,
    Bedroom,
    Living,
    Other,
}

impl Room {
    /// All rooms, in display order.
    pub const ALL: [Room; 5] = [
        Room::Kitchen,
        Room::Bathroom,
        Room::Bedroom,
        Room::Living,
        Room::Other,
    ];

    /// Parse from the lowercase storage form. Unknown values map to `Other`.
    pub fn parse(s: &str) -> Room {
        match s {
            "kitchen" => Room::Kitchen,
            "bathroom" => Room::Bathroom,
            "bedroom" => Room::Bedroom,
            "living" => Room::Living,
            _ => Room::Other,
        }
    }

    /// Lowercase storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Kitchen => "kitchen",
            Room::Bathroom => "bathroom",
            Room::Bedroom => "bedroom",
            Room::Living => "living",
            Room::Other => "other",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a task recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    OneTime,
}

impl Frequency {
    /// Parse from the kebab-case storage form. Unknown values map to `OneTime`.
    pub fn parse(s: &str) -> Frequency {
        match s {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::OneTime,
        }
    }

    /// Kebab-case storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::OneTime => "one-time",
        }
    }

    /// Whether the task repeats (everything except one-time).
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::OneTime)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A household task.
///
/// Date anchors (`start_date`, `due_date`, `end_date`) are calendar dates,
/// already truncated to local midnight; time-of-day never participates in
/// occurrence membership. `scheduled_time` is an `HH:mm` string used only
/// for ordering within a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Owning household
    pub household_id: String,
    /// Task title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Room the task belongs to
    pub room: Room,
    /// Recurrence frequency
    pub frequency: Frequency,
    /// Estimated duration in minutes
    pub estimated_minutes: u32,
    /// Member the task is assigned to (optional, tasks may rotate)
    pub assigned_to: Option<String>,
    /// Inventory item ids consumed when the task completes
    #[serde(default)]
    pub required_products: Vec<String>,
    /// Whether the task is completed
    pub completed: bool,
    /// Member who completed the task
    pub completed_by: Option<String>,
    /// Completion timestamp
    pub completed_at: Option<DateTime<Utc>>,
    /// Due date; for one-time tasks the fallback occurrence anchor
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    /// Recurrence anchor date
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub start_date: Option<NaiveDate>,
    /// Last date (inclusive) a recurring task may occur on
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub end_date: Option<NaiveDate>,
    /// Time of day in `HH:mm`, used for intra-day ordering only
    pub scheduled_time: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Member who created the task
    pub created_by: String,
}

impl Task {
    /// Create a new incomplete task with default values.
    pub fn new(
        household_id: impl Into<String>,
        title: impl Into<String>,
        room: Room,
        frequency: Frequency,
        created_by: impl Into<String>,
    ) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            household_id: household_id.into(),
            title: title.into(),
            description: None,
            room,
            frequency,
            estimated_minutes: 15,
            assigned_to: None,
            required_products: Vec::new(),
            completed: false,
            completed_by: None,
            completed_at: None,
            due_date: None,
            start_date: None,
            end_date: None,
            scheduled_time: None,
            created_at: Utc::now(),
            created_by: created_by.into(),
        }
    }

    /// Mark the task as completed by `member` at `now`.
    pub fn complete(&mut self, member: impl Into<String>, now: DateTime<Utc>) {
        self.completed = true;
        self.completed_by = Some(member.into());
        self.completed_at = Some(now);
    }

    /// Clear completion state.
    pub fn uncomplete(&mut self) {
        self.completed = false;
        self.completed_by = None;
        self.completed_at = None;
    }
}

/// Default list ordering: tasks with a due date first (ascending), then
/// tasks without one by creation time.
pub fn sort_default(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.created_at.cmp(&b.created_at),
    });
}

/// Lenient date deserialization for anchors arriving from loosely-typed
/// stores: accepts `YYYY-MM-DD`, an RFC3339 timestamp (truncated to its
/// calendar date), or epoch milliseconds. Anything unparsable degrades to
/// `None` so a single malformed record never fails a whole list.
pub mod flexible_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
    }

    /// Normalize one raw representation to a calendar date, or `None`.
    pub fn normalize(raw_text: Option<&str>, raw_millis: Option<i64>) -> Option<NaiveDate> {
        if let Some(s) = raw_text {
            if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(d);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc).date_naive());
            }
            return None;
        }
        raw_millis.and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Raw>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Raw::Text(s)) => normalize(Some(&s), None),
            Some(Raw::Millis(ms)) => normalize(None, Some(ms)),
            None => None,
        })
    }
}

/// A template entry for quick task creation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub estimated_minutes: u32,
    pub frequency: Frequency,
}

/// Predefined task templates per room.
pub fn room_templates(room: Room) -> &'static [TaskTemplate] {
    use Frequency::{Daily, Monthly, Weekly};
    match room {
        Room::Kitchen => &[
            TaskTemplate { title: "Wash dishes", estimated_minutes: 15, frequency: Daily },
            TaskTemplate { title: "Clean the stovetop", estimated_minutes: 10, frequency: Daily },
            TaskTemplate { title: "Clean the fridge", estimated_minutes: 20, frequency: Weekly },
            TaskTemplate { title: "Clean the oven", estimated_minutes: 30, frequency: Monthly },
            TaskTemplate { title: "Empty the dishwasher", estimated_minutes: 5, frequency: Daily },
        ],
        Room::Bathroom => &[
            TaskTemplate { title: "Clean the sink", estimated_minutes: 5, frequency: Daily },
            TaskTemplate { title: "Clean the shower/bathtub", estimated_minutes: 15, frequency: Weekly },
            TaskTemplate { title: "Clean the toilet", estimated_minutes: 10, frequency: Weekly },
            TaskTemplate { title: "Clean mirrors and surfaces", estimated_minutes: 10, frequency: Weekly },
            TaskTemplate { title: "Change towels", estimated_minutes: 5, frequency: Weekly },
        ],
        Room::Bedroom => &[
            TaskTemplate { title: "Make the bed", estimated_minutes: 5, frequency: Daily },
            TaskTemplate { title: "Organize clothes", estimated_minutes: 15, frequency: Weekly },
            TaskTemplate { title: "Dust", estimated_minutes: 10, frequency: Weekly },
            TaskTemplate { title: "Change bed sheets", estimated_minutes: 15, frequency: Weekly },
        ],
        Room::Living => &[
            TaskTemplate { title: "Dust", estimated_minutes: 15, frequency: Weekly },
            TaskTemplate { title: "Vacuum", estimated_minutes: 20, frequency: Weekly },
            TaskTemplate { title: "Organize pillows and blankets", estimated_minutes: 5, frequency: Daily },
            TaskTemplate { title: "Clean windows", estimated_minutes: 30, frequency: Monthly },
        ],
        Room::Other => &[
            TaskTemplate { title: "Do laundry", estimated_minutes: 30, frequency: Weekly },
            TaskTemplate { title: "Iron", estimated_minutes: 45, frequency: Weekly },
            TaskTemplate { title: "Take out trash", estimated_minutes: 5, frequency: Weekly },
            TaskTemplate { title: "Check bills", estimated_minutes: 10, frequency: Monthly },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serialization_roundtrip() {
        let mut task = Task::new("hh-1", "Wash dishes", Room::Kitchen, Frequency::Daily, "user-1");
        task.start_date = NaiveDate::from_ymd_opt(2025, 1, 6);
        task.scheduled_time = Some("08:30".to_string());

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.start_date, task.start_date);
        assert_eq!(decoded.frequency, Frequency::Daily);
    }

    #[test]
    fn flexible_date_accepts_plain_and_rfc3339() {
        let json = r#"{
            "id": "t", "household_id": "h", "title": "x", "description": null,
            "room": "kitchen", "frequency": "weekly", "estimated_minutes": 5,
            "assigned_to": null, "completed": false, "completed_by": null,
            "completed_at": null,
            "due_date": "2025-03-10",
            "start_date": "2025-01-06T09:30:00Z",
            "end_date": 1737936000000,
            "scheduled_time": null,
            "created_at": "2025-01-01T00:00:00Z", "created_by": "u"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(task.start_date, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(task.end_date, NaiveDate::from_ymd_opt(2025, 1, 27));
    }

    #[test]
    fn flexible_date_degrades_to_none_on_garbage() {
        let json = r#"{
            "id": "t", "household_id": "h", "title": "x", "description": null,
            "room": "other", "frequency": "daily", "estimated_minutes": 5,
            "assigned_to": null, "completed": false, "completed_by": null,
            "completed_at": null,
            "due_date": "not-a-date",
            "start_date": null,
            "end_date": null,
            "scheduled_time": null,
            "created_at": "2025-01-01T00:00:00Z", "created_by": "u"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn sort_default_puts_dated_tasks_first() {
        let mut a = Task::new("h", "no date", Room::Other, Frequency::OneTime, "u");
        let mut b = Task::new("h", "later", Room::Other, Frequency::OneTime, "u");
        b.due_date = NaiveDate::from_ymd_opt(2025, 5, 2);
        let mut c = Task::new("h", "sooner", Room::Other, Frequency::OneTime, "u");
        c.due_date = NaiveDate::from_ymd_opt(2025, 5, 1);
        a.created_at = Utc::now();

        let mut tasks = vec![a, b, c];
        sort_default(&mut tasks);
        assert_eq!(tasks[0].title, "sooner");
        assert_eq!(tasks[1].title, "later");
        assert_eq!(tasks[2].title, "no date");
    }

    #[test]
    fn every_room_has_templates() {
        for room in Room::ALL {
            assert!(!room_templates(room).is_empty());
        }
    }
}
