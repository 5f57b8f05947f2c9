use anyhow::Result;
use chrono::{Local, NaiveDate};

use shared_config::AppConfig;
use shared_utils::SessionStore;

use crate::cli::{Commands, ProfileAction, WorkingDayAction};

mod account;
mod booking;
mod doctors;
mod practice;
mod profile;

/// What every command needs: the configuration and where the session lives.
pub struct Context {
    pub config: AppConfig,
    pub sessions: SessionStore,
}

impl Context {
    pub fn new(config: AppConfig) -> Self {
        let sessions = SessionStore::from_config(&config);
        Self { config, sessions }
    }

    /// Token of the stored session, or an error asking to log in.
    pub fn token(&self) -> Result<String> {
        Ok(self.sessions.require()?)
    }

    /// Token when logged in; public pages work without one.
    pub fn optional_token(&self) -> Result<Option<String>> {
        Ok(self.sessions.token()?)
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub async fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Signup {
            first_name,
            last_name,
            username,
            phone_number,
            email,
            password,
            confirm_password,
            is_doctor,
        } => {
            let form = auth_cell::SignUpForm {
                first_name,
                last_name,
                username,
                phone_number,
                email,
                password,
                confirm_password,
                is_doctor,
            };
            account::signup(ctx, form).await
        }
        Commands::Login { username, password } => account::login(ctx, &username, &password).await,
        Commands::Logout => account::logout(ctx),
        Commands::Me => account::me(ctx).await,

        Commands::Doctors { page, limit } => doctors::list(ctx, page, limit).await,
        Commands::Search {
            name,
            specialite,
            localization,
            assurance,
            disponibilite,
            page,
            limit,
        } => {
            let filters = doctor_cell::DoctorSearchFilters {
                name: name.unwrap_or_default(),
                specialite: specialite.unwrap_or_default(),
                localization: localization.unwrap_or_default(),
                assurance: assurance.unwrap_or_default(),
                disponibilite: disponibilite.unwrap_or_default(),
                pagination: doctor_cell::Pagination::from_params(
                    Some(&page.to_string()),
                    Some(&limit.to_string()),
                ),
            };
            doctors::search(ctx, filters).await
        }
        Commands::SearchOptions => doctors::search_options(ctx).await,
        Commands::Doctor { id, dates } => doctors::show(ctx, id, dates).await,
        Commands::ExcludedDates { id, from } => doctors::excluded_dates(ctx, id, from).await,

        Commands::Book { doctor_id, date, reason } => booking::book(ctx, doctor_id, date, reason).await,
        Commands::Reviews { doctor_id } => booking::reviews(ctx, doctor_id).await,
        Commands::Rate { doctor_id, note, comment } => booking::rate(ctx, doctor_id, note, comment).await,

        Commands::WorkingDays { action } => match action {
            WorkingDayAction::List { doctor } => practice::list_working_days(ctx, doctor).await,
            WorkingDayAction::Add {
                day,
                daily_limit,
                start_time,
                end_time,
            } => practice::add_working_day(ctx, day, daily_limit, start_time, end_time).await,
            WorkingDayAction::Delete { id } => practice::delete_working_day(ctx, id).await,
        },
        Commands::Agenda { date } => practice::agenda(ctx, date).await,
        Commands::Complete { appointment_id, date } => {
            practice::complete(ctx, appointment_id, date).await
        }

        Commands::Profile { action } => match action {
            ProfileAction::Show => profile::show(ctx).await,
            ProfileAction::Edit {
                first_name,
                last_name,
                email,
                phone_number,
                state,
                city,
                street,
                spoken_languages,
                zoom_link,
                visit_price,
                experience_start_date,
                specialization_id,
                assurances,
                latitude,
                longitude,
            } => {
                let changes = profile_cell::ProfileUpdate {
                    first_name,
                    last_name,
                    email,
                    phone_number,
                    state,
                    city,
                    street,
                    spoken_languages,
                    zoom_link,
                    visit_price,
                    experience_start_date,
                    specialization_id,
                    assurances: (!assurances.is_empty())
                        .then(|| profile_cell::AssuranceEntry::selected(assurances)),
                    latitude,
                    longitude,
                    ..Default::default()
                };
                profile::edit(ctx, changes).await
            }
            ProfileAction::Photo { path } => profile::photo(ctx, &path).await,
        },
    }
}
