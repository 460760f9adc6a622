use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use carbook_shared::{HomeOffice, IssueCategory, IssueSeverity, IssueStatus};

mod commands;
mod state;

use state::AppState;

#[derive(Parser)]
#[command(name = "carbook")]
#[command(author, version, about = "On-device car booking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,

        /// Full name
        #[arg(long)]
        name: String,

        /// Home office: dubai, al-ain or abu-dhabi
        #[arg(long, value_parser = parse_office)]
        office: HomeOffice,
    },

    /// Sign in by email
    Login {
        email: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Update the signed-in user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Show the phone number to approved ride mates
        #[arg(long)]
        share_phone: Option<bool>,

        #[arg(long)]
        team: Option<String>,

        #[arg(long, value_parser = parse_office)]
        office: Option<HomeOffice>,
    },

    /// List the fleet, or cars free for a window when --from/--to are given
    Cars {
        /// Window start (RFC 3339, e.g. 2026-09-01T09:00:00Z)
        #[arg(long, requires = "to")]
        from: Option<DateTime<Utc>>,

        /// Window end
        #[arg(long, requires = "from")]
        to: Option<DateTime<Utc>>,
    },

    /// Show one car with its live schedule
    Car {
        id: Uuid,
    },

    /// Reserve a car
    Book {
        #[arg(long)]
        car: Uuid,

        #[arg(long)]
        from: DateTime<Utc>,

        #[arg(long)]
        to: DateTime<Utc>,

        #[arg(long)]
        pickup: String,

        #[arg(long)]
        destination: String,

        #[arg(long)]
        purpose: Option<String>,

        #[arg(long, default_value_t = 1)]
        passengers: i32,
    },

    /// List your bookings, newest pickup first
    Bookings,

    /// Show one booking with car, booker, ride mates and handover
    Booking {
        id: Uuid,
    },

    /// Cancel a reserved booking
    Cancel {
        id: Uuid,
    },

    /// Pick the car up, recording odometer and fuel
    Checkout {
        id: Uuid,

        #[arg(long)]
        odometer: i64,

        #[arg(long)]
        fuel: String,
    },

    /// Bring the car back, recording odometer and fuel
    Return {
        id: Uuid,

        #[arg(long)]
        odometer: i64,

        #[arg(long)]
        fuel: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Ride-mate requests on bookings
    Ridemate {
        #[command(subcommand)]
        action: RidemateAction,
    },

    /// Car issue reports
    Issue {
        #[command(subcommand)]
        action: IssueAction,
    },

    /// Fetch the published car list (falls back to the local cache)
    SyncCars,

    /// Wipe the local store, seed data included
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RidemateAction {
    /// Ask to join someone's booking
    Request {
        booking: Uuid,

        #[arg(long)]
        message: Option<String>,
    },

    /// Approve a pending request
    Approve {
        request: Uuid,
    },

    /// Decline a pending request
    Decline {
        request: Uuid,
    },

    /// List requests on a booking
    List {
        booking: Uuid,
    },
}

#[derive(Subcommand)]
enum IssueAction {
    /// File a defect report against a car
    Report {
        #[arg(long)]
        car: Uuid,

        /// mechanical, electrical, cosmetic, cleanliness or other
        #[arg(long, value_parser = parse_category)]
        category: IssueCategory,

        /// low, medium, high or critical
        #[arg(long, value_parser = parse_severity)]
        severity: IssueSeverity,

        #[arg(long)]
        description: String,
    },

    /// Move an issue forward: in-progress or resolved
    Progress {
        id: Uuid,

        #[arg(value_parser = parse_issue_status)]
        status: IssueStatus,
    },

    /// List issues, optionally for one car
    List {
        #[arg(long)]
        car: Option<Uuid>,
    },
}

fn parse_office(s: &str) -> Result<HomeOffice, String> {
    match s.to_ascii_lowercase().as_str() {
        "dubai" => Ok(HomeOffice::Dubai),
        "al-ain" | "al ain" | "alain" => Ok(HomeOffice::AlAin),
        "abu-dhabi" | "abu dhabi" | "abudhabi" => Ok(HomeOffice::AbuDhabi),
        other => Err(format!("unknown office '{other}' (dubai, al-ain, abu-dhabi)")),
    }
}

fn parse_category(s: &str) -> Result<IssueCategory, String> {
    match s.to_ascii_lowercase().as_str() {
        "mechanical" => Ok(IssueCategory::Mechanical),
        "electrical" => Ok(IssueCategory::Electrical),
        "cosmetic" => Ok(IssueCategory::Cosmetic),
        "cleanliness" => Ok(IssueCategory::Cleanliness),
        "other" => Ok(IssueCategory::Other),
        other => Err(format!("unknown category '{other}'")),
    }
}

fn parse_severity(s: &str) -> Result<IssueSeverity, String> {
    match s.to_ascii_lowercase().as_str() {
        "low" => Ok(IssueSeverity::Low),
        "medium" => Ok(IssueSeverity::Medium),
        "high" => Ok(IssueSeverity::High),
        "critical" => Ok(IssueSeverity::Critical),
        other => Err(format!("unknown severity '{other}'")),
    }
}

fn parse_issue_status(s: &str) -> Result<IssueStatus, String> {
    match s.to_ascii_lowercase().as_str() {
        "in-progress" | "in_progress" => Ok(IssueStatus::InProgress),
        "resolved" => Ok(IssueStatus::Resolved),
        "open" => Ok(IssueStatus::Open),
        other => Err(format!("unknown status '{other}' (in-progress, resolved)")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carbook=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = carbook_store::app_config::Config::load()?;
    let state = AppState::init(&config).await?;

    commands::run(cli.command, &state).await
}
