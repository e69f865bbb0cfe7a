//! Task management commands.

use chrono::Utc;
use clap::Subcommand;
use hearth_core::storage::db::TaskFilter;
use hearth_core::task::{calendar, occurrence, room_templates, Frequency, Room, Task};
use hearth_core::{Config, HouseholdDb};

use super::{active_household, active_user, parse_date, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Room: kitchen, bathroom, bedroom, living or other
        #[arg(long, default_value = "other")]
        room: String,
        /// Frequency: daily, weekly, monthly or one-time
        #[arg(long, default_value = "one-time")]
        frequency: String,
        /// Estimated minutes
        #[arg(long, default_value = "15")]
        minutes: u32,
        /// Member the task is assigned to
        #[arg(long)]
        assign: Option<String>,
        /// Due date (YYYY-MM-DD), the anchor for one-time tasks
        #[arg(long)]
        due: Option<String>,
        /// Recurrence anchor date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Last recurrence date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Time of day (HH:mm), used for intra-day ordering
        #[arg(long)]
        time: Option<String>,
        /// Comma-separated inventory item ids consumed on completion
        #[arg(long)]
        requires: Option<String>,
    },
    /// List tasks
    List {
        /// Only open tasks
        #[arg(long)]
        open: bool,
        /// Only completed tasks
        #[arg(long)]
        completed: bool,
        /// Filter by room
        #[arg(long)]
        room: Option<String>,
        /// Filter by frequency
        #[arg(long)]
        frequency: Option<String>,
        /// Filter by assignee
        #[arg(long)]
        assigned_to: Option<String>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Mark a task completed (consumes linked inventory)
    Complete {
        /// Task ID
        id: String,
    },
    /// Clear a task's completion state
    Uncomplete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Tasks due on a date, in day order
    Due {
        /// Reference date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// Every occurrence of every task in a date range
    Agenda {
        /// Range start (YYYY-MM-DD)
        from: String,
        /// Range end, inclusive (YYYY-MM-DD)
        to: String,
    },
    /// Month grid with due-task counts per day
    Calendar {
        /// Any date inside the month (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// List predefined task templates for a room
    Templates {
        /// Room name
        room: String,
    },
    /// Create all template tasks for a room
    Seed {
        /// Room name
        room: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let db = HouseholdDb::open()?;
    let config = Config::load()?;
    let household_id = active_household(&config)?;

    match action {
        TaskAction::Create {
            title,
            description,
            room,
            frequency,
            minutes,
            assign,
            due,
            start,
            end,
            time,
            requires,
        } => {
            let user = active_user(&config)?;
            let mut task = Task::new(
                &household_id,
                title,
                Room::parse(&room),
                Frequency::parse(&frequency),
                user,
            );
            task.description = description;
            task.estimated_minutes = minutes;
            task.assigned_to = assign;
            task.due_date = due.as_deref().map(parse_date).transpose()?;
            task.start_date = start.as_deref().map(parse_date).transpose()?;
            task.end_date = end.as_deref().map(parse_date).transpose()?;
            task.scheduled_time = time;
            task.required_products = requires
                .map(|r| r.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default();

            db.create_task(&task)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List {
            open,
            completed,
            room,
            frequency,
            assigned_to,
        } => {
            let filter = TaskFilter {
                completed: if open {
                    Some(false)
                } else if completed {
                    Some(true)
                } else {
                    None
                },
                room: room.as_deref().map(Room::parse),
                frequency: frequency.as_deref().map(Frequency::parse),
                assigned_to,
            };
            let tasks = db.list_tasks(&household_id, &filter)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => match db.get_task(&id)? {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Complete { id } => match db.complete_task(&id, &active_user(&config)?, Utc::now())? {
            Some(task) => {
                println!("Task completed: {}", task.title);
                println!("{}", serde_json::to_string_pretty(&task)?);
            }
            None => println!("Task not found: {id}"),
        },
        TaskAction::Uncomplete { id } => match db.uncomplete_task(&id)? {
            Some(task) => println!("Task reopened: {}", task.title),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Delete { id } => {
            if db.delete_task(&id)? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Due { date } => {
            let reference = match date {
                Some(raw) => parse_date(&raw)?,
                None => Utc::now().date_naive(),
            };
            let tasks = db.list_tasks(&household_id, &TaskFilter::default())?;
            let due: Vec<&Task> = occurrence::tasks_for_day(&tasks, reference);
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        TaskAction::Agenda { from, to } => {
            let start = parse_date(&from)?;
            let end = parse_date(&to)?;
            let tasks = db.list_tasks(&household_id, &TaskFilter::default())?;

            for task in &tasks {
                let dates = occurrence::occurrences_in_range(task, start, end);
                if !dates.is_empty() {
                    let days: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
                    println!("{}: {}", task.title, days.join(", "));
                }
            }
        }
        TaskAction::Calendar { date } => {
            let reference = match date {
                Some(raw) => parse_date(&raw)?,
                None => Utc::now().date_naive(),
            };
            let tasks = db.list_tasks(&household_id, &TaskFilter::default())?;

            println!("Mon Tue Wed Thu Fri Sat Sun");
            for week in calendar::month_grid(reference).chunks(7) {
                let cells: Vec<String> = week
                    .iter()
                    .map(|day| {
                        let count = occurrence::tasks_for_day(&tasks, *day).len();
                        if count > 0 {
                            format!("{:>2}*{}", day.format("%d"), count)
                        } else {
                            format!("{:>2}  ", day.format("%d"))
                        }
                    })
                    .collect();
                println!("{}", cells.join(" "));
            }
        }
        TaskAction::Templates { room } => {
            let room = Room::parse(&room);
            for template in room_templates(room) {
                println!(
                    "{} ({} min, {})",
                    template.title, template.estimated_minutes, template.frequency
                );
            }
        }
        TaskAction::Seed { room } => {
            let user = active_user(&config)?;
            let room = Room::parse(&room);
            let templates = room_templates(room);
            for template in templates {
                let mut task = Task::new(&household_id, template.title, room, template.frequency, &user);
                task.estimated_minutes = template.estimated_minutes;
                db.create_task(&task)?;
            }
            println!("Created {} tasks for {}", templates.len(), room);
        }
    }
    Ok(())
}
