use chrono::NaiveTime;
use serde_json::json;
use tracing::{debug, info};

use shared_api::{ApiClient, Method};
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::WorkingDay;
use crate::services::availability::weekday_index;

pub struct WorkingDayService {
    api: ApiClient,
}

impl WorkingDayService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Working days declared by a doctor.
    pub async fn list(
        &self,
        doctor_id: i64,
        auth_token: Option<&str>,
    ) -> Result<Vec<WorkingDay>, AppError> {
        debug!("Fetching working days for doctor: {}", doctor_id);

        let path = format!("/working-days/{}", doctor_id);
        let days: Option<Vec<WorkingDay>> = self
            .api
            .request_optional(Method::GET, &path, auth_token, None, None)
            .await?;

        Ok(days.unwrap_or_default())
    }

    /// Declares a new working day for the logged-in doctor.
    pub async fn add(&self, day: &WorkingDay, auth_token: &str) -> Result<(), AppError> {
        validate_working_day(day)?;
        debug!("Adding working day {} ", day.day_of_week);

        // The endpoint takes a batch.
        self.api
            .send(
                Method::POST,
                "/working-days",
                Some(auth_token),
                None,
                Some(json!([day])),
            )
            .await?;

        info!("Working day {} added", day.day_of_week);
        Ok(())
    }

    pub async fn delete(&self, working_day_id: i64, auth_token: &str) -> Result<(), AppError> {
        debug!("Deleting working day: {}", working_day_id);

        let path = format!("/working-days/{}", working_day_id);
        self.api
            .send(Method::DELETE, &path, Some(auth_token), None, None)
            .await
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::ValidationError(format!("Invalid time {:?}, expected HH:MM", raw)))
}

pub fn validate_working_day(day: &WorkingDay) -> Result<(), AppError> {
    if weekday_index(&day.day_of_week).is_none() {
        return Err(AppError::ValidationError(format!(
            "Unknown day of week {:?}",
            day.day_of_week
        )));
    }

    if day.daily_appointment_limit == 0 {
        return Err(AppError::ValidationError(
            "Daily appointment limit must be at least 1".to_string(),
        ));
    }

    if day.hours.is_empty() {
        return Err(AppError::ValidationError(
            "At least one time window is required".to_string(),
        ));
    }

    for window in &day.hours {
        let start = parse_time(&window.start_time)?;
        let end = parse_time(&window.end_time)?;
        if start >= end {
            return Err(AppError::ValidationError(
                "Start time must be before end time".to_string(),
            ));
        }
    }

    Ok(())
}
