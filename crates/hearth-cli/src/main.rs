use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "hearth", version, about = "Hearth household CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Household management
    Household {
        #[command(subcommand)]
        action: commands::household::HouseholdAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Expense tracking
    Expense {
        #[command(subcommand)]
        action: commands::expense::ExpenseAction,
    },
    /// Recurring bills
    Recurring {
        #[command(subcommand)]
        action: commands::recurring::RecurringAction,
    },
    /// Shopping list
    Shopping {
        #[command(subcommand)]
        action: commands::shopping::ShoppingAction,
    },
    /// Household inventory
    Inventory {
        #[command(subcommand)]
        action: commands::inventory::InventoryAction,
    },
    /// Plant watering
    Plant {
        #[command(subcommand)]
        action: commands::plant::PlantAction,
    },
    /// Vendors and service contracts
    Vendor {
        #[command(subcommand)]
        action: commands::vendor::VendorAction,
    },
    /// Achievement badges
    Badges {
        #[command(subcommand)]
        action: commands::badges::BadgesAction,
    },
    /// Search across all collections
    Search {
        /// Search term
        query: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Household { action } => commands::household::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Expense { action } => commands::expense::run(action),
        Commands::Recurring { action } => commands::recurring::run(action),
        Commands::Shopping { action } => commands::shopping::run(action),
        Commands::Inventory { action } => commands::inventory::run(action),
        Commands::Plant { action } => commands::plant::run(action),
        Commands::Vendor { action } => commands::vendor::run(action),
        Commands::Badges { action } => commands::badges::run(action),
        Commands::Search { query } => commands::search::run(&query),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "hearth", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
