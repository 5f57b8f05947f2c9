use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Command-line client for the Tabib appointment booking platform
#[derive(Parser)]
#[command(
    name = "tabib",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find doctors, book appointments and manage your practice from the terminal",
    long_about = None
)]
pub struct Cli {
    /// Override the backend URL (otherwise TABIB_API_URL)
    #[arg(global = true, long = "api-url")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account
    Signup {
        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: String,

        #[arg(long)]
        username: String,

        #[arg(long = "phone")]
        phone_number: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long = "confirm-password")]
        confirm_password: String,

        /// Register as a doctor instead of a patient
        #[arg(long = "doctor")]
        is_doctor: bool,
    },

    /// Log in and remember the session
    Login {
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in account
    Me,

    /// List doctors page by page
    Doctors {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Search doctors with filters
    Search {
        #[arg(long)]
        name: Option<String>,

        #[arg(long = "speciality")]
        specialite: Option<String>,

        #[arg(long = "location")]
        localization: Option<String>,

        #[arg(long)]
        assurance: Option<String>,

        /// Working day the doctor must be available on (e.g. Monday)
        #[arg(long = "day")]
        disponibilite: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// List the values accepted by the search filters
    SearchOptions,

    /// Show a doctor's profile, working days and next free dates
    Doctor {
        id: i64,

        /// How many upcoming bookable dates to show
        #[arg(long = "dates", default_value_t = 5)]
        dates: usize,
    },

    /// Print the dates a doctor cannot be booked on
    ExcludedDates {
        id: i64,

        /// First day of the window (YYYY-MM-DD or DD/MM/YYYY, default today)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
    },

    /// Book an appointment with a doctor
    Book {
        doctor_id: i64,

        /// Appointment date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Show a doctor's ratings and comments
    Reviews { doctor_id: i64 },

    /// Rate a doctor from 1 to 5
    Rate {
        doctor_id: i64,

        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        note: u8,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Manage your working days (doctors)
    WorkingDays {
        #[command(subcommand)]
        action: WorkingDayAction,
    },

    /// Show your appointments for a day (doctors)
    Agenda {
        /// Day to show (default today)
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Mark an appointment as completed (doctors)
    Complete {
        appointment_id: i64,

        /// Day of the appointment (default today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
pub enum WorkingDayAction {
    /// List working days (yours unless --doctor is given)
    List {
        #[arg(long)]
        doctor: Option<i64>,
    },

    /// Declare a new working day
    Add {
        /// Weekday name (Sunday .. Saturday)
        day: String,

        #[arg(long = "limit")]
        daily_limit: u32,

        #[arg(long = "start", help = "Opening time (HH:MM)")]
        start_time: String,

        #[arg(long = "end", help = "Closing time (HH:MM)")]
        end_time: String,
    },

    /// Remove a working day by id
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show,

    /// Change profile fields; the others keep their current value
    Edit {
        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long = "phone")]
        phone_number: Option<String>,

        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        street: Option<String>,

        #[arg(long = "languages")]
        spoken_languages: Option<String>,

        #[arg(long = "zoom-link")]
        zoom_link: Option<String>,

        #[arg(long = "price")]
        visit_price: Option<String>,

        #[arg(long = "experience-since")]
        experience_start_date: Option<i32>,

        #[arg(long = "speciality-id")]
        specialization_id: Option<i64>,

        /// Accepted insurance id (see `search-options`); repeat for each one
        #[arg(long = "assurance")]
        assurances: Vec<i64>,

        #[arg(long)]
        latitude: Option<f64>,

        #[arg(long)]
        longitude: Option<f64>,
    },

    /// Upload a new profile photo
    Photo { path: PathBuf },
}

/// Accepts ISO dates and the `dd/mm/yyyy` form shown by the calendar.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD or DD/MM/YYYY", raw))
}
