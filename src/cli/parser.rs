use crate::core::query::RoomFilter;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for linentrack
/// CLI application to track bed-linen changes per room with SQLite
#[derive(Parser)]
#[command(
    name = "linentrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track bed-linen change schedules per room: due dates, overdue rooms and the daily list",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or a second facility)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, no automatic backup)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use instead of $EDITOR")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal operations log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a room, or update it when the room number already exists
    Add {
        /// Room number (unique)
        room: String,

        #[arg(long = "resident", help = "Resident or guest name")]
        resident: Option<String>,

        #[arg(long = "note", help = "Free text note (allergies, extra pillows, ...)")]
        note: Option<String>,

        #[arg(
            long = "last",
            value_name = "YYYY-MM-DD",
            help = "Last change date (default: today)"
        )]
        last: Option<String>,

        #[arg(
            long = "interval",
            value_name = "DAYS",
            help = "Days between changes (default from config)"
        )]
        interval: Option<String>,
    },

    /// List rooms with their next change date
    List {
        #[arg(long, short, value_enum, default_value = "all")]
        filter: RoomFilter,

        #[arg(long, short, help = "Search room number, resident and note")]
        search: Option<String>,
    },

    /// Record that the linens of a room were changed
    Mark {
        room: String,

        #[arg(
            long = "date",
            value_name = "YYYY-MM-DD",
            conflicts_with = "yesterday",
            help = "Day of the change (not in the future)"
        )]
        date: Option<String>,

        #[arg(long = "yesterday", help = "The change happened yesterday")]
        yesterday: bool,
    },

    /// Push the next change of a room forward
    Postpone {
        room: String,

        #[arg(long = "days", help = "Days to postpone (default from config)")]
        days: Option<u32>,
    },

    /// Pause or resume tracking for a room
    Pause { room: String },

    /// Delete a room with its schedule and history
    Del {
        room: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Show the change history of a room
    History { room: String },

    /// Export today's due list
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(
            long,
            value_name = "FILE",
            help = "Output file (default: due_list_<date> in the export dir)"
        )]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Back up the database (rotation, or a copy to an explicit file)
    Backup {
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, requires = "file")]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

impl Commands {
    /// Commands that read or change rooms get the automatic daily backup.
    pub fn wants_daily_backup(&self) -> bool {
        !matches!(
            self,
            Commands::Init | Commands::Config { .. } | Commands::Backup { .. }
        )
    }
}
