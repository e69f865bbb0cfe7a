//! SQLite-based storage for every household collection.
//!
//! Dates are stored as TEXT: calendar dates as `YYYY-MM-DD`, timestamps as
//! RFC3339. Nested structures (split maps, contracts, linked ids) are JSON
//! columns. Malformed anchor dates read back as `None` so one bad record
//! degrades to "not due" instead of failing a whole list.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::expense::{Expense, ExpenseCategory};
use crate::household::{Household, HouseholdSettings};
use crate::inventory::{InventoryItem, ItemCategory, StockStatus};
use crate::plants::Plant;
use crate::recurring_expense::{BillingCycle, RecurringExpense};
use crate::shopping::{ShoppingItem, ShoppingList};
use crate::task::{sort_default, Frequency, Room, Task};
use crate::vendor::{ContactInfo, Contract, MaintenanceEntry, Vendor, VendorType};

// === Helper Functions ===

/// Parse an RFC3339 timestamp with fallback to the current time.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse an optional RFC3339 timestamp; malformed values become `None`.
fn parse_datetime_opt(dt_str: Option<String>) -> Option<DateTime<Utc>> {
    dt_str.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}

/// Parse an optional `YYYY-MM-DD` date; malformed values become `None`.
fn parse_date_opt(date_str: Option<String>) -> Option<NaiveDate> {
    date_str.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

/// Parse a required `YYYY-MM-DD` date with fallback to today.
fn parse_date_fallback(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap_or_else(|_| Utc::now().date_naive())
}

/// Decode a JSON column, defaulting on malformed content.
fn parse_json_default<T: serde::de::DeserializeOwned + Default>(raw: Option<String>) -> T {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let room: String = row.get(4)?;
    let frequency: String = row.get(5)?;
    let created_at: String = row.get(16)?;
    Ok(Task {
        id: row.get(0)?,
        household_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        room: Room::parse(&room),
        frequency: Frequency::parse(&frequency),
        estimated_minutes: row.get(6)?,
        assigned_to: row.get(7)?,
        required_products: parse_json_default(row.get(8)?),
        completed: row.get(9)?,
        completed_by: row.get(10)?,
        completed_at: parse_datetime_opt(row.get(11)?),
        due_date: parse_date_opt(row.get(12)?),
        start_date: parse_date_opt(row.get(13)?),
        end_date: parse_date_opt(row.get(14)?),
        scheduled_time: row.get(15)?,
        created_at: parse_datetime_fallback(&created_at),
        created_by: row.get(17)?,
    })
}

fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
    let category: String = row.get(4)?;
    let date: String = row.get(8)?;
    let created_at: String = row.get(9)?;
    Ok(Expense {
        id: row.get(0)?,
        household_id: row.get(1)?,
        amount: row.get(2)?,
        currency: row.get(3)?,
        category: ExpenseCategory::parse(&category),
        paid_by: row.get(5)?,
        split_between: parse_json_default(row.get(6)?),
        description: row.get(7)?,
        date: parse_date_fallback(&date),
        created_at: parse_datetime_fallback(&created_at),
        created_by: row.get(10)?,
        reconciled: row.get(11)?,
    })
}

fn row_to_recurring(row: &rusqlite::Row) -> rusqlite::Result<RecurringExpense> {
    let category: String = row.get(4)?;
    let frequency: String = row.get(5)?;
    let next_due: String = row.get(6)?;
    let created_at: String = row.get(10)?;
    Ok(RecurringExpense {
        id: row.get(0)?,
        household_id: row.get(1)?,
        title: row.get(2)?,
        amount: row.get(3)?,
        category: ExpenseCategory::parse(&category),
        frequency: BillingCycle::parse(&frequency),
        next_due_date: parse_date_fallback(&next_due),
        last_paid_date: parse_date_opt(row.get(7)?),
        paid_by: row.get(8)?,
        auto_create: row.get(9)?,
        created_at: parse_datetime_fallback(&created_at),
        created_by: row.get(11)?,
    })
}

fn row_to_shopping_item(row: &rusqlite::Row) -> rusqlite::Result<ShoppingItem> {
    let added_at: String = row.get(4)?;
    Ok(ShoppingItem {
        id: row.get(0)?,
        name: row.get(2)?,
        quantity: row.get(3)?,
        added_by: row.get(5)?,
        added_at: parse_datetime_fallback(&added_at),
        checked: row.get(6)?,
        checked_by: row.get(7)?,
        checked_at: parse_datetime_opt(row.get(8)?),
    })
}

fn row_to_inventory_item(row: &rusqlite::Row) -> rusqlite::Result<InventoryItem> {
    let category: String = row.get(3)?;
    let status: String = row.get(4)?;
    let created_at: String = row.get(12)?;
    let updated_at: String = row.get(13)?;
    Ok(InventoryItem {
        id: row.get(0)?,
        household_id: row.get(1)?,
        name: row.get(2)?,
        category: ItemCategory::parse(&category),
        status: StockStatus::parse(&status),
        quantity: row.get(5)?,
        unit: row.get(6)?,
        min_quantity: row.get(7)?,
        last_purchased: parse_datetime_opt(row.get(8)?),
        last_used: parse_datetime_opt(row.get(9)?),
        linked_tasks: parse_json_default(row.get(10)?),
        notes: row.get(11)?,
        created_at: parse_datetime_fallback(&created_at),
        updated_at: parse_datetime_fallback(&updated_at),
        created_by: row.get(14)?,
    })
}

fn row_to_plant(row: &rusqlite::Row) -> rusqlite::Result<Plant> {
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;
    Ok(Plant {
        id: row.get(0)?,
        household_id: row.get(1)?,
        name: row.get(2)?,
        location: row.get(3)?,
        watering_frequency: row.get(4)?,
        last_watered: parse_datetime_opt(row.get(5)?),
        next_watering: parse_datetime_opt(row.get(6)?),
        light_notes: row.get(7)?,
        fertilizer_notes: row.get(8)?,
        notes: row.get(9)?,
        created_at: parse_datetime_fallback(&created_at),
        updated_at: parse_datetime_fallback(&updated_at),
        created_by: row.get(12)?,
    })
}

fn row_to_vendor(row: &rusqlite::Row) -> rusqlite::Result<Vendor> {
    let vendor_type: String = row.get(3)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;
    let contact: Option<String> = row.get(4)?;
    let contracts: Option<String> = row.get(5)?;
    let maintenance: Option<String> = row.get(6)?;
    Ok(Vendor {
        id: row.get(0)?,
        household_id: row.get(1)?,
        name: row.get(2)?,
        vendor_type: VendorType::parse(&vendor_type),
        contact: contact
            .and_then(|s| serde_json::from_str::<ContactInfo>(&s).ok())
            .unwrap_or_default(),
        contracts: contracts
            .and_then(|s| serde_json::from_str::<Vec<Contract>>(&s).ok())
            .unwrap_or_default(),
        maintenance: maintenance
            .and_then(|s| serde_json::from_str::<Vec<MaintenanceEntry>>(&s).ok())
            .unwrap_or_default(),
        notes: row.get(7)?,
        created_at: parse_datetime_fallback(&created_at),
        updated_at: parse_datetime_fallback(&updated_at),
        created_by: row.get(10)?,
    })
}

/// Optional filters for task listing.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub room: Option<Room>,
    pub frequency: Option<Frequency>,
    pub assigned_to: Option<String>,
}

/// SQLite database for household storage.
///
/// Stores households, tasks, expenses, recurring expenses, the shopping
/// list, inventory, plants, vendors, and shown badges.
pub struct HouseholdDb {
    conn: Connection,
}

impl HouseholdDb {
    /// Open the database at `~/.config/hearth/hearth.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("hearth.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS households (
                    id                TEXT PRIMARY KEY,
                    name              TEXT NOT NULL,
                    members           TEXT NOT NULL DEFAULT '[]',
                    invite_code       TEXT,
                    invite_expires_at TEXT,
                    currency          TEXT NOT NULL DEFAULT 'EUR',
                    timezone          TEXT NOT NULL DEFAULT 'Europe/Rome',
                    created_at        TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS tasks (
                    id                TEXT PRIMARY KEY,
                    household_id      TEXT NOT NULL,
                    title             TEXT NOT NULL,
                    description       TEXT,
                    room              TEXT NOT NULL DEFAULT 'other',
                    frequency         TEXT NOT NULL DEFAULT 'one-time',
                    estimated_minutes INTEGER NOT NULL DEFAULT 15,
                    assigned_to       TEXT,
                    required_products TEXT NOT NULL DEFAULT '[]',
                    completed         INTEGER NOT NULL DEFAULT 0,
                    completed_by      TEXT,
                    completed_at      TEXT,
                    due_date          TEXT,
                    start_date        TEXT,
                    end_date          TEXT,
                    scheduled_time    TEXT,
                    created_at        TEXT NOT NULL,
                    created_by        TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS expenses (
                    id            TEXT PRIMARY KEY,
                    household_id  TEXT NOT NULL,
                    amount        REAL NOT NULL,
                    currency      TEXT NOT NULL DEFAULT 'EUR',
                    category      TEXT NOT NULL DEFAULT 'extra',
                    paid_by       TEXT NOT NULL,
                    split_between TEXT NOT NULL DEFAULT '{}',
                    description   TEXT NOT NULL DEFAULT '',
                    date          TEXT NOT NULL,
                    created_at    TEXT NOT NULL,
                    created_by    TEXT NOT NULL,
                    reconciled    INTEGER NOT NULL DEFAULT 0
                );

                CREATE TABLE IF NOT EXISTS recurring_expenses (
                    id             TEXT PRIMARY KEY,
                    household_id   TEXT NOT NULL,
                    title          TEXT NOT NULL,
                    amount         REAL NOT NULL,
                    category       TEXT NOT NULL DEFAULT 'bills',
                    frequency      TEXT NOT NULL DEFAULT 'monthly',
                    next_due_date  TEXT NOT NULL,
                    last_paid_date TEXT,
                    paid_by        TEXT,
                    auto_create    INTEGER NOT NULL DEFAULT 0,
                    created_at     TEXT NOT NULL,
                    created_by     TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS shopping_items (
                    id           TEXT PRIMARY KEY,
                    household_id TEXT NOT NULL,
                    name         TEXT NOT NULL,
                    quantity     INTEGER,
                    added_at     TEXT NOT NULL,
                    added_by     TEXT NOT NULL,
                    checked      INTEGER NOT NULL DEFAULT 0,
                    checked_by   TEXT,
                    checked_at   TEXT
                );

                CREATE TABLE IF NOT EXISTS inventory (
                    id             TEXT PRIMARY KEY,
                    household_id   TEXT NOT NULL,
                    name           TEXT NOT NULL,
                    category       TEXT NOT NULL DEFAULT 'other',
                    status         TEXT NOT NULL DEFAULT 'ok',
                    quantity       INTEGER,
                    unit           TEXT,
                    min_quantity   INTEGER,
                    last_purchased TEXT,
                    last_used      TEXT,
                    linked_tasks   TEXT NOT NULL DEFAULT '[]',
                    notes          TEXT,
                    created_at     TEXT NOT NULL,
                    updated_at     TEXT NOT NULL,
                    created_by     TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS plants (
                    id                 TEXT PRIMARY KEY,
                    household_id       TEXT NOT NULL,
                    name               TEXT NOT NULL,
                    location           TEXT NOT NULL DEFAULT '',
                    watering_frequency INTEGER NOT NULL DEFAULT 7,
                    last_watered       TEXT,
                    next_watering      TEXT,
                    light_notes        TEXT,
                    fertilizer_notes   TEXT,
                    notes              TEXT,
                    created_at         TEXT NOT NULL,
                    updated_at         TEXT NOT NULL,
                    created_by         TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS vendors (
                    id           TEXT PRIMARY KEY,
                    household_id TEXT NOT NULL,
                    name         TEXT NOT NULL,
                    vendor_type  TEXT NOT NULL DEFAULT 'other',
                    contact      TEXT,
                    contracts    TEXT NOT NULL DEFAULT '[]',
                    maintenance  TEXT NOT NULL DEFAULT '[]',
                    notes        TEXT,
                    created_at   TEXT NOT NULL,
                    updated_at   TEXT NOT NULL,
                    created_by   TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS shown_badges (
                    user_id  TEXT NOT NULL,
                    badge_id TEXT NOT NULL,
                    shown_at TEXT NOT NULL,
                    PRIMARY KEY (user_id, badge_id)
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_household ON tasks(household_id);
                CREATE INDEX IF NOT EXISTS idx_expenses_household_date ON expenses(household_id, date);
                CREATE INDEX IF NOT EXISTS idx_inventory_household ON inventory(household_id);
                ",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // === Households ===

    pub fn create_household(&self, household: &Household) -> Result<()> {
        self.conn.execute(
            "INSERT INTO households (id, name, members, invite_code, invite_expires_at, currency, timezone, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                household.id,
                household.name,
                serde_json::to_string(&household.members)?,
                household.invite_code,
                household.invite_expires_at.map(|t| t.to_rfc3339()),
                household.settings.currency,
                household.settings.timezone,
                household.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_household(&self, id: &str) -> Result<Option<Household>> {
        let household = self
            .conn
            .query_row(
                "SELECT id, name, members, invite_code, invite_expires_at, currency, timezone, created_at
                 FROM households WHERE id = ?1",
                params![id],
                |row| {
                    let created_at: String = row.get(7)?;
                    Ok(Household {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        members: parse_json_default(row.get(2)?),
                        invite_code: row.get(3)?,
                        invite_expires_at: parse_datetime_opt(row.get(4)?),
                        settings: HouseholdSettings {
                            currency: row.get(5)?,
                            timezone: row.get(6)?,
                        },
                        created_at: parse_datetime_fallback(&created_at),
                    })
                },
            )
            .optional()?;
        Ok(household)
    }

    pub fn update_household(&self, household: &Household) -> Result<()> {
        self.conn.execute(
            "UPDATE households SET name = ?2, members = ?3, invite_code = ?4,
             invite_expires_at = ?5, currency = ?6, timezone = ?7 WHERE id = ?1",
            params![
                household.id,
                household.name,
                serde_json::to_string(&household.members)?,
                household.invite_code,
                household.invite_expires_at.map(|t| t.to_rfc3339()),
                household.settings.currency,
                household.settings.timezone,
            ],
        )?;
        Ok(())
    }

    // === Tasks ===

    pub fn create_task(&self, task: &Task) -> Result<()> {
        self.conn.execute(
            "INSERT INTO tasks (id, household_id, title, description, room, frequency,
             estimated_minutes, assigned_to, required_products, completed, completed_by,
             completed_at, due_date, start_date, end_date, scheduled_time, created_at, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                task.id,
                task.household_id,
                task.title,
                task.description,
                task.room.as_str(),
                task.frequency.as_str(),
                task.estimated_minutes,
                task.assigned_to,
                serde_json::to_string(&task.required_products)?,
                task.completed,
                task.completed_by,
                task.completed_at.map(|t| t.to_rfc3339()),
                task.due_date.map(|d| d.to_string()),
                task.start_date.map(|d| d.to_string()),
                task.end_date.map(|d| d.to_string()),
                task.scheduled_time,
                task.created_at.to_rfc3339(),
                task.created_by,
            ],
        )?;
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(
                "SELECT id, household_id, title, description, room, frequency, estimated_minutes,
                 assigned_to, required_products, completed, completed_by, completed_at, due_date,
                 start_date, end_date, scheduled_time, created_at, created_by
                 FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }

    /// List a household's tasks, filtered and in the default ordering
    /// (dated tasks first, then by creation time).
    pub fn list_tasks(&self, household_id: &str, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, household_id, title, description, room, frequency, estimated_minutes,
             assigned_to, required_products, completed, completed_by, completed_at, due_date,
             start_date, end_date, scheduled_time, created_at, created_by
             FROM tasks WHERE household_id = ?1",
        )?;
        let rows = stmt.query_map(params![household_id], row_to_task)?;

        let mut tasks = Vec::new();
        for task in rows {
            let task = task.map_err(DatabaseError::from)?;
            if let Some(completed) = filter.completed {
                if task.completed != completed {
                    continue;
                }
            }
            if let Some(room) = filter.room {
                if task.room != room {
                    continue;
                }
            }
            if let Some(frequency) = filter.frequency {
                if task.frequency != frequency {
                    continue;
                }
            }
            if let Some(ref assignee) = filter.assigned_to {
                if task.assigned_to.as_ref() != Some(assignee) {
                    continue;
                }
            }
            tasks.push(task);
        }

        sort_default(&mut tasks);
        Ok(tasks)
    }

    pub fn update_task(&self, task: &Task) -> Result<()> {
        self.conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, room = ?4, frequency = ?5,
             estimated_minutes = ?6, assigned_to = ?7, required_products = ?8, completed = ?9,
             completed_by = ?10, completed_at = ?11, due_date = ?12, start_date = ?13,
             end_date = ?14, scheduled_time = ?15 WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.room.as_str(),
                task.frequency.as_str(),
                task.estimated_minutes,
                task.assigned_to,
                serde_json::to_string(&task.required_products)?,
                task.completed,
                task.completed_by,
                task.completed_at.map(|t| t.to_rfc3339()),
                task.due_date.map(|d| d.to_string()),
                task.start_date.map(|d| d.to_string()),
                task.end_date.map(|d| d.to_string()),
                task.scheduled_time,
            ],
        )?;
        Ok(())
    }

    /// Complete a task and consume one unit of each linked inventory item.
    /// Missing or failing items are skipped so the completion itself
    /// always lands.
    pub fn complete_task(&self, id: &str, user_id: &str, now: DateTime<Utc>) -> Result<Option<Task>> {
        let mut task = match self.get_task(id)? {
            Some(task) => task,
            None => return Ok(None),
        };

        task.complete(user_id, now);
        self.update_task(&task)?;

        for product_id in &task.required_products {
            if let Ok(Some(mut item)) = self.get_inventory_item(product_id) {
                item.consume_one(now);
                let _ = self.update_inventory_item(&item);
            }
        }

        Ok(Some(task))
    }

    pub fn uncomplete_task(&self, id: &str) -> Result<Option<Task>> {
        let mut task = match self.get_task(id)? {
            Some(task) => task,
            None => return Ok(None),
        };
        task.uncomplete();
        self.update_task(&task)?;
        Ok(Some(task))
    }

    pub fn delete_task(&self, id: &str) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Expenses ===

    pub fn create_expense(&self, expense: &Expense) -> Result<()> {
        self.conn.execute(
            "INSERT INTO expenses (id, household_id, amount, currency, category, paid_by,
             split_between, description, date, created_at, created_by, reconciled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                expense.id,
                expense.household_id,
                expense.amount,
                expense.currency,
                expense.category.as_str(),
                expense.paid_by,
                serde_json::to_string(&expense.split_between)?,
                expense.description,
                expense.date.to_string(),
                expense.created_at.to_rfc3339(),
                expense.created_by,
                expense.reconciled,
            ],
        )?;
        Ok(())
    }

    /// List a household's expenses, newest first, optionally clipped to an
    /// inclusive date window and/or one category.
    pub fn list_expenses(
        &self,
        household_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        category: Option<ExpenseCategory>,
    ) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, household_id, amount, currency, category, paid_by, split_between,
             description, date, created_at, created_by, reconciled
             FROM expenses WHERE household_id = ?1 ORDER BY date DESC",
        )?;
        let rows = stmt.query_map(params![household_id], row_to_expense)?;

        let mut expenses = Vec::new();
        for expense in rows {
            let expense = expense.map_err(DatabaseError::from)?;
            if let Some(start) = start {
                if expense.date < start {
                    continue;
                }
            }
            if let Some(end) = end {
                if expense.date > end {
                    continue;
                }
            }
            if let Some(category) = category {
                if expense.category != category {
                    continue;
                }
            }
            expenses.push(expense);
        }
        Ok(expenses)
    }

    pub fn delete_expense(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Recurring expenses ===

    pub fn create_recurring_expense(&self, expense: &RecurringExpense) -> Result<()> {
        self.conn.execute(
            "INSERT INTO recurring_expenses (id, household_id, title, amount, category, frequency,
             next_due_date, last_paid_date, paid_by, auto_create, created_at, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                expense.id,
                expense.household_id,
                expense.title,
                expense.amount,
                expense.category.as_str(),
                expense.frequency.as_str(),
                expense.next_due_date.to_string(),
                expense.last_paid_date.map(|d| d.to_string()),
                expense.paid_by,
                expense.auto_create,
                expense.created_at.to_rfc3339(),
                expense.created_by,
            ],
        )?;
        Ok(())
    }

    pub fn get_recurring_expense(&self, id: &str) -> Result<Option<RecurringExpense>> {
        let expense = self
            .conn
            .query_row(
                "SELECT id, household_id, title, amount, category, frequency, next_due_date,
                 last_paid_date, paid_by, auto_create, created_at, created_by
                 FROM recurring_expenses WHERE id = ?1",
                params![id],
                row_to_recurring,
            )
            .optional()?;
        Ok(expense)
    }

    /// List a household's recurring expenses, soonest due first.
    pub fn list_recurring_expenses(&self, household_id: &str) -> Result<Vec<RecurringExpense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, household_id, title, amount, category, frequency, next_due_date,
             last_paid_date, paid_by, auto_create, created_at, created_by
             FROM recurring_expenses WHERE household_id = ?1 ORDER BY next_due_date ASC",
        )?;
        let rows = stmt.query_map(params![household_id], row_to_recurring)?;
        let mut expenses = Vec::new();
        for expense in rows {
            expenses.push(expense.map_err(DatabaseError::from)?);
        }
        Ok(expenses)
    }

    pub fn update_recurring_expense(&self, expense: &RecurringExpense) -> Result<()> {
        self.conn.execute(
            "UPDATE recurring_expenses SET title = ?2, amount = ?3, category = ?4, frequency = ?5,
             next_due_date = ?6, last_paid_date = ?7, paid_by = ?8, auto_create = ?9 WHERE id = ?1",
            params![
                expense.id,
                expense.title,
                expense.amount,
                expense.category.as_str(),
                expense.frequency.as_str(),
                expense.next_due_date.to_string(),
                expense.last_paid_date.map(|d| d.to_string()),
                expense.paid_by,
                expense.auto_create,
            ],
        )?;
        Ok(())
    }

    pub fn delete_recurring_expense(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM recurring_expenses WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Shopping list ===

    /// Assemble the household shopping list from its item rows.
    pub fn get_shopping_list(&self, household_id: &str) -> Result<ShoppingList> {
        let mut stmt = self.conn.prepare(
            "SELECT id, household_id, name, quantity, added_at, added_by, checked, checked_by, checked_at
             FROM shopping_items WHERE household_id = ?1 ORDER BY added_at ASC",
        )?;
        let rows = stmt.query_map(params![household_id], row_to_shopping_item)?;

        let mut list = ShoppingList::new(household_id);
        for item in rows {
            list.items.push(item.map_err(DatabaseError::from)?);
        }
        Ok(list)
    }

    pub fn add_shopping_item(&self, household_id: &str, item: &ShoppingItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO shopping_items (id, household_id, name, quantity, added_at, added_by,
             checked, checked_by, checked_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                household_id,
                item.name,
                item.quantity,
                item.added_at.to_rfc3339(),
                item.added_by,
                item.checked,
                item.checked_by,
                item.checked_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Toggle one shopping item; returns the new checked state, or `None`
    /// when the item does not exist.
    pub fn toggle_shopping_item(
        &self,
        id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, household_id, name, quantity, added_at, added_by, checked, checked_by, checked_at
                 FROM shopping_items WHERE id = ?1",
                params![id],
                row_to_shopping_item,
            )
            .optional()?;

        let mut item = match item {
            Some(item) => item,
            None => return Ok(None),
        };
        item.toggle(user_id, now);

        self.conn.execute(
            "UPDATE shopping_items SET checked = ?2, checked_by = ?3, checked_at = ?4 WHERE id = ?1",
            params![
                id,
                item.checked,
                item.checked_by,
                item.checked_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(Some(item.checked))
    }

    pub fn remove_shopping_item(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM shopping_items WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Delete every checked item; returns how many were removed.
    pub fn clear_checked_items(&self, household_id: &str) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM shopping_items WHERE household_id = ?1 AND checked = 1",
            params![household_id],
        )?;
        Ok(deleted)
    }

    // === Inventory ===

    pub fn create_inventory_item(&self, item: &InventoryItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO inventory (id, household_id, name, category, status, quantity, unit,
             min_quantity, last_purchased, last_used, linked_tasks, notes, created_at, updated_at, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                item.id,
                item.household_id,
                item.name,
                item.category.as_str(),
                item.status.as_str(),
                item.quantity,
                item.unit,
                item.min_quantity,
                item.last_purchased.map(|t| t.to_rfc3339()),
                item.last_used.map(|t| t.to_rfc3339()),
                serde_json::to_string(&item.linked_tasks)?,
                item.notes,
                item.created_at.to_rfc3339(),
                item.updated_at.to_rfc3339(),
                item.created_by,
            ],
        )?;
        Ok(())
    }

    pub fn get_inventory_item(&self, id: &str) -> Result<Option<InventoryItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, household_id, name, category, status, quantity, unit, min_quantity,
                 last_purchased, last_used, linked_tasks, notes, created_at, updated_at, created_by
                 FROM inventory WHERE id = ?1",
                params![id],
                row_to_inventory_item,
            )
            .optional()?;
        Ok(item)
    }

    pub fn list_inventory(&self, household_id: &str) -> Result<Vec<InventoryItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, household_id, name, category, status, quantity, unit, min_quantity,
             last_purchased, last_used, linked_tasks, notes, created_at, updated_at, created_by
             FROM inventory WHERE household_id = ?1 ORDER BY name ASC",
        )?;
        let rows = stmt.query_map(params![household_id], row_to_inventory_item)?;
        let mut items = Vec::new();
        for item in rows {
            items.push(item.map_err(DatabaseError::from)?);
        }
        Ok(items)
    }

    pub fn update_inventory_item(&self, item: &InventoryItem) -> Result<()> {
        self.conn.execute(
            "UPDATE inventory SET name = ?2, category = ?3, status = ?4, quantity = ?5, unit = ?6,
             min_quantity = ?7, last_purchased = ?8, last_used = ?9, linked_tasks = ?10,
             notes = ?11, updated_at = ?12 WHERE id = ?1",
            params![
                item.id,
                item.name,
                item.category.as_str(),
                item.status.as_str(),
                item.quantity,
                item.unit,
                item.min_quantity,
                item.last_purchased.map(|t| t.to_rfc3339()),
                item.last_used.map(|t| t.to_rfc3339()),
                serde_json::to_string(&item.linked_tasks)?,
                item.notes,
                item.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn delete_inventory_item(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM inventory WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Plants ===

    pub fn create_plant(&self, plant: &Plant) -> Result<()> {
        self.conn.execute(
            "INSERT INTO plants (id, household_id, name, location, watering_frequency, last_watered,
             next_watering, light_notes, fertilizer_notes, notes, created_at, updated_at, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                plant.id,
                plant.household_id,
                plant.name,
                plant.location,
                plant.watering_frequency,
                plant.last_watered.map(|t| t.to_rfc3339()),
                plant.next_watering.map(|t| t.to_rfc3339()),
                plant.light_notes,
                plant.fertilizer_notes,
                plant.notes,
                plant.created_at.to_rfc3339(),
                plant.updated_at.to_rfc3339(),
                plant.created_by,
            ],
        )?;
        Ok(())
    }

    pub fn get_plant(&self, id: &str) -> Result<Option<Plant>> {
        let plant = self
            .conn
            .query_row(
                "SELECT id, household_id, name, location, watering_frequency, last_watered,
                 next_watering, light_notes, fertilizer_notes, notes, created_at, updated_at, created_by
                 FROM plants WHERE id = ?1",
                params![id],
                row_to_plant,
            )
            .optional()?;
        Ok(plant)
    }

    pub fn list_plants(&self, household_id: &str) -> Result<Vec<Plant>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, household_id, name, location, watering_frequency, last_watered,
             next_watering, light_notes, fertilizer_notes, notes, created_at, updated_at, created_by
             FROM plants WHERE household_id = ?1 ORDER BY name ASC",
        )?;
        let rows = stmt.query_map(params![household_id], row_to_plant)?;
        let mut plants = Vec::new();
        for plant in rows {
            plants.push(plant.map_err(DatabaseError::from)?);
        }
        Ok(plants)
    }

    pub fn update_plant(&self, plant: &Plant) -> Result<()> {
        self.conn.execute(
            "UPDATE plants SET name = ?2, location = ?3, watering_frequency = ?4, last_watered = ?5,
             next_watering = ?6, light_notes = ?7, fertilizer_notes = ?8, notes = ?9, updated_at = ?10
             WHERE id = ?1",
            params![
                plant.id,
                plant.name,
                plant.location,
                plant.watering_frequency,
                plant.last_watered.map(|t| t.to_rfc3339()),
                plant.next_watering.map(|t| t.to_rfc3339()),
                plant.light_notes,
                plant.fertilizer_notes,
                plant.notes,
                plant.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn delete_plant(&self, id: &str) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM plants WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Vendors ===

    pub fn create_vendor(&self, vendor: &Vendor) -> Result<()> {
        self.conn.execute(
            "INSERT INTO vendors (id, household_id, name, vendor_type, contact, contracts,
             maintenance, notes, created_at, updated_at, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                vendor.id,
                vendor.household_id,
                vendor.name,
                vendor.vendor_type.as_str(),
                serde_json::to_string(&vendor.contact)?,
                serde_json::to_string(&vendor.contracts)?,
                serde_json::to_string(&vendor.maintenance)?,
                vendor.notes,
                vendor.created_at.to_rfc3339(),
                vendor.updated_at.to_rfc3339(),
                vendor.created_by,
            ],
        )?;
        Ok(())
    }

    pub fn get_vendor(&self, id: &str) -> Result<Option<Vendor>> {
        let vendor = self
            .conn
            .query_row(
                "SELECT id, household_id, name, vendor_type, contact, contracts, maintenance,
                 notes, created_at, updated_at, created_by
                 FROM vendors WHERE id = ?1",
                params![id],
                row_to_vendor,
            )
            .optional()?;
        Ok(vendor)
    }

    pub fn list_vendors(&self, household_id: &str) -> Result<Vec<Vendor>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, household_id, name, vendor_type, contact, contracts, maintenance,
             notes, created_at, updated_at, created_by
             FROM vendors WHERE household_id = ?1 ORDER BY name ASC",
        )?;
        let rows = stmt.query_map(params![household_id], row_to_vendor)?;
        let mut vendors = Vec::new();
        for vendor in rows {
            vendors.push(vendor.map_err(DatabaseError::from)?);
        }
        Ok(vendors)
    }

    pub fn update_vendor(&self, vendor: &Vendor) -> Result<()> {
        self.conn.execute(
            "UPDATE vendors SET name = ?2, vendor_type = ?3, contact = ?4, contracts = ?5,
             maintenance = ?6, notes = ?7, updated_at = ?8 WHERE id = ?1",
            params![
                vendor.id,
                vendor.name,
                vendor.vendor_type.as_str(),
                serde_json::to_string(&vendor.contact)?,
                serde_json::to_string(&vendor.contracts)?,
                serde_json::to_string(&vendor.maintenance)?,
                vendor.notes,
                vendor.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn delete_vendor(&self, id: &str) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM vendors WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Badges ===

    pub fn shown_badges(&self, user_id: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT badge_id FROM shown_badges WHERE user_id = ?1")?;
        let rows = stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?;
        let mut ids = Vec::new();
        for id in rows {
            ids.push(id.map_err(DatabaseError::from)?);
        }
        Ok(ids)
    }

    pub fn mark_badge_shown(&self, user_id: &str, badge_id: &str, now: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO shown_badges (user_id, badge_id, shown_at) VALUES (?1, ?2, ?3)",
            params![user_id, badge_id, now.to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_db() -> HouseholdDb {
        HouseholdDb::open_memory().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed_household(db: &HouseholdDb) -> Household {
        let mut hh = Household::new("Via Roma 12", "ana");
        hh.add_member("ben");
        db.create_household(&hh).unwrap();
        hh
    }

    #[test]
    fn household_roundtrip() {
        let db = open_db();
        let hh = seed_household(&db);

        let loaded = db.get_household(&hh.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Via Roma 12");
        assert_eq!(loaded.members, vec!["ana", "ben"]);
        assert!(db.get_household("missing").unwrap().is_none());
    }

    #[test]
    fn task_roundtrip_preserves_anchor_dates() {
        let db = open_db();
        let hh = seed_household(&db);

        let mut task = Task::new(&hh.id, "Clean the fridge", Room::Kitchen, Frequency::Weekly, "ana");
        task.start_date = Some(date(2025, 1, 6));
        task.end_date = Some(date(2025, 3, 31));
        task.scheduled_time = Some("18:00".into());
        db.create_task(&task).unwrap();

        let loaded = db.get_task(&task.id).unwrap().unwrap();
        assert_eq!(loaded.start_date, Some(date(2025, 1, 6)));
        assert_eq!(loaded.end_date, Some(date(2025, 3, 31)));
        assert_eq!(loaded.frequency, Frequency::Weekly);
        assert_eq!(loaded.scheduled_time.as_deref(), Some("18:00"));
    }

    #[test]
    fn malformed_stored_date_degrades_to_none() {
        let db = open_db();
        let hh = seed_household(&db);
        let task = Task::new(&hh.id, "Odd one", Room::Other, Frequency::Weekly, "ana");
        db.create_task(&task).unwrap();

        db.conn
            .execute(
                "UPDATE tasks SET start_date = 'garbage' WHERE id = ?1",
                params![task.id],
            )
            .unwrap();

        let loaded = db.get_task(&task.id).unwrap().unwrap();
        assert_eq!(loaded.start_date, None);
        // A recurring task without an anchor is simply never due.
        assert!(!crate::task::occurrence::is_due(&loaded, date(2025, 1, 6)));
    }

    #[test]
    fn list_tasks_filters_and_orders() {
        let db = open_db();
        let hh = seed_household(&db);

        let mut kitchen = Task::new(&hh.id, "Dishes", Room::Kitchen, Frequency::Daily, "ana");
        kitchen.due_date = Some(date(2025, 2, 1));
        let bathroom = Task::new(&hh.id, "Toilet", Room::Bathroom, Frequency::Weekly, "ana");
        let mut done = Task::new(&hh.id, "Windows", Room::Living, Frequency::Monthly, "ana");
        done.complete("ben", Utc::now());

        for task in [&kitchen, &bathroom, &done] {
            db.create_task(task).unwrap();
        }

        let open = db
            .list_tasks(&hh.id, &TaskFilter { completed: Some(false), ..Default::default() })
            .unwrap();
        assert_eq!(open.len(), 2);
        assert_eq!(open[0].title, "Dishes"); // dated first

        let kitchen_only = db
            .list_tasks(&hh.id, &TaskFilter { room: Some(Room::Kitchen), ..Default::default() })
            .unwrap();
        assert_eq!(kitchen_only.len(), 1);
    }

    #[test]
    fn complete_task_consumes_linked_inventory() {
        let db = open_db();
        let hh = seed_household(&db);

        let mut soap = InventoryItem::new(&hh.id, "Dish soap", ItemCategory::Cleaning, Some(2), Some(1), "ana");
        db.create_inventory_item(&soap).unwrap();

        let mut task = Task::new(&hh.id, "Dishes", Room::Kitchen, Frequency::Daily, "ana");
        task.required_products = vec![soap.id.clone(), "missing-item".to_string()];
        db.create_task(&task).unwrap();

        let completed = db.complete_task(&task.id, "ben", Utc::now()).unwrap().unwrap();
        assert!(completed.completed);
        assert_eq!(completed.completed_by.as_deref(), Some("ben"));

        soap = db.get_inventory_item(&soap.id).unwrap().unwrap();
        assert_eq!(soap.quantity, Some(1));
        assert_eq!(soap.status, StockStatus::Low);
        assert!(soap.last_used.is_some());

        let reverted = db.uncomplete_task(&task.id).unwrap().unwrap();
        assert!(!reverted.completed);
        assert!(reverted.completed_by.is_none());
    }

    #[test]
    fn expense_roundtrip_and_window_filter() {
        let db = open_db();
        let hh = seed_household(&db);

        for (amount, day) in [(30.0, 1), (50.0, 10), (20.0, 20)] {
            let expense = Expense::new_equal_split(
                &hh.id,
                amount,
                "EUR",
                ExpenseCategory::Groceries,
                "ana",
                &hh.members,
                "shop",
                date(2025, 3, day),
                "ana",
            );
            db.create_expense(&expense).unwrap();
        }

        let all = db.list_expenses(&hh.id, None, None, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date, date(2025, 3, 20)); // newest first

        let window = db
            .list_expenses(&hh.id, Some(date(2025, 3, 5)), Some(date(2025, 3, 15)), None)
            .unwrap();
        assert_eq!(window.len(), 1);
        assert!((window[0].amount - 50.0).abs() < 1e-9);
        assert!((window[0].split_between["ben"] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn recurring_expense_roundtrip_sorted_by_due() {
        let db = open_db();
        let hh = seed_household(&db);

        for (title, day) in [("Rent", 28), ("Internet", 5)] {
            let bill = RecurringExpense {
                id: uuid::Uuid::new_v4().to_string(),
                household_id: hh.id.clone(),
                title: title.into(),
                amount: 100.0,
                category: ExpenseCategory::Bills,
                frequency: BillingCycle::Monthly,
                next_due_date: date(2025, 4, day),
                last_paid_date: None,
                paid_by: None,
                auto_create: false,
                created_at: Utc::now(),
                created_by: "ana".into(),
            };
            db.create_recurring_expense(&bill).unwrap();
        }

        let bills = db.list_recurring_expenses(&hh.id).unwrap();
        assert_eq!(bills[0].title, "Internet");
        assert_eq!(bills[1].title, "Rent");
    }

    #[test]
    fn shopping_item_lifecycle() {
        let db = open_db();
        let hh = seed_household(&db);

        let milk = ShoppingItem::new("Milk", "ana");
        let bread = ShoppingItem::new("Bread", "ben");
        db.add_shopping_item(&hh.id, &milk).unwrap();
        db.add_shopping_item(&hh.id, &bread).unwrap();

        assert_eq!(db.toggle_shopping_item(&milk.id, "ben", Utc::now()).unwrap(), Some(true));
        assert_eq!(db.toggle_shopping_item("nope", "ben", Utc::now()).unwrap(), None);

        let list = db.get_shopping_list(&hh.id).unwrap();
        assert_eq!(list.items.len(), 2);
        assert!(!list.all_checked());

        assert_eq!(db.clear_checked_items(&hh.id).unwrap(), 1);
        let list = db.get_shopping_list(&hh.id).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].name, "Bread");
    }

    #[test]
    fn plant_and_vendor_roundtrip() {
        let db = open_db();
        let hh = seed_household(&db);

        let mut plant = Plant::new(&hh.id, "Monstera", "Living room", 7, "ana");
        db.create_plant(&plant).unwrap();
        plant.water(Utc::now());
        db.update_plant(&plant).unwrap();
        let loaded = db.get_plant(&plant.id).unwrap().unwrap();
        assert!(loaded.last_watered.is_some());

        let mut vendor = Vendor::new(&hh.id, "City Power", VendorType::Utility, "ana");
        vendor.contracts.push(Contract {
            start_date: date(2025, 1, 1),
            end_date: None,
            monthly_cost: Some(80.0),
            notes: None,
        });
        db.create_vendor(&vendor).unwrap();
        let loaded = db.get_vendor(&vendor.id).unwrap().unwrap();
        assert_eq!(loaded.contracts.len(), 1);
        assert_eq!(loaded.vendor_type, VendorType::Utility);
    }

    #[test]
    fn shown_badges_are_deduplicated() {
        let db = open_db();
        let now = Utc::now();
        db.mark_badge_shown("ana", "first-expense", now).unwrap();
        db.mark_badge_shown("ana", "first-expense", now).unwrap();
        db.mark_badge_shown("ana", "shopping-hero", now).unwrap();

        let mut shown = db.shown_badges("ana").unwrap();
        shown.sort();
        assert_eq!(shown, vec!["first-expense", "shopping-hero"]);
        assert!(db.shown_badges("ben").unwrap().is_empty());
    }
}
