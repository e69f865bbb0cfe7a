//! # Hearth Core Library
//!
//! This library provides the core business logic for Hearth, a shared
//! household manager. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary over the same
//! core library.
//!
//! ## Architecture
//!
//! - **Occurrence Engine**: Pure functions deciding which dates a recurring
//!   task is due on; the reference date is always an explicit parameter
//! - **Storage**: SQLite-based household storage and TOML-based configuration
//! - **Collections**: Tasks, expenses, recurring bills, the shopping list,
//!   inventory, plants and vendors, all keyed by household
//! - **Cross-cutting**: Achievement badges, full-text-ish search and a TTL
//!   query cache
//!
//! ## Key Components
//!
//! - [`task::occurrence`]: Recurrence membership and day ordering
//! - [`HouseholdDb`]: Persistence for every collection
//! - [`Config`]: Application configuration management

pub mod badges;
pub mod cache;
pub mod error;
pub mod expense;
pub mod household;
pub mod inventory;
pub mod plants;
pub mod recurring_expense;
pub mod search;
pub mod shopping;
pub mod storage;
pub mod task;
pub mod vendor;

pub use cache::TtlCache;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use expense::{Expense, ExpenseCategory};
pub use household::{Household, HouseholdSettings};
pub use inventory::{InventoryItem, ItemCategory, StockStatus};
pub use plants::Plant;
pub use recurring_expense::{BillingCycle, RecurringExpense};
pub use search::{ResultKind, SearchIndex, SearchResult};
pub use shopping::{ShoppingItem, ShoppingList};
pub use storage::{Config, HouseholdDb};
pub use task::{Frequency, Room, Task};
pub use vendor::{Vendor, VendorType};
