use chrono::NaiveDate;
use serde_json::json;
use tracing::{debug, info, warn};

use doctor_cell::services::BookingSelection;
use shared_api::{ApiClient, Method};
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{apply_status, Appointment, AppointmentStatus, BookAppointmentRequest, UpdateStatusRequest};

pub struct AppointmentService {
    api: ApiClient,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// The logged-in doctor's appointments on `date`.
    pub async fn appointments_for_day(
        &self,
        date: NaiveDate,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppError> {
        let formatted = date.format("%Y-%m-%d").to_string();
        debug!("Fetching appointments for {}", formatted);

        let appointments: Option<Vec<Appointment>> = self
            .api
            .request_optional(
                Method::GET,
                "/doctor/appointments/day",
                Some(auth_token),
                Some(&[("date", formatted)][..]),
                None,
            )
            .await?;

        Ok(appointments.unwrap_or_default())
    }

    pub async fn update_status(
        &self,
        appointment_id: i64,
        status: AppointmentStatus,
        auth_token: &str,
    ) -> Result<(), AppError> {
        if status == AppointmentStatus::Unknown {
            return Err(AppError::ValidationError(
                "Cannot set an unknown status".to_string(),
            ));
        }

        debug!("Setting appointment {} to {}", appointment_id, status);

        let path = format!("/doctor/appointments/{}/status", appointment_id);
        self.api
            .send(
                Method::PATCH,
                &path,
                Some(auth_token),
                None,
                Some(json!(UpdateStatusRequest { status })),
            )
            .await?;

        info!("Appointment {} is now {}", appointment_id, status);
        Ok(())
    }

    /// Marks an appointment completed and mirrors the change in `agenda`.
    ///
    /// The local copy is left untouched when the backend refuses the update.
    pub async fn complete(
        &self,
        agenda: &mut [Appointment],
        appointment_id: i64,
        auth_token: &str,
    ) -> Result<(), AppError> {
        self.update_status(appointment_id, AppointmentStatus::Completed, auth_token)
            .await?;

        if !apply_status(agenda, appointment_id, AppointmentStatus::Completed) {
            warn!("Appointment {} not present in local agenda", appointment_id);
        }
        Ok(())
    }

    /// Books the selected working day with the doctor.
    pub async fn book(
        &self,
        selection: &BookingSelection,
        reason: Option<String>,
        auth_token: &str,
    ) -> Result<(), AppError> {
        let request = BookAppointmentRequest {
            doctor_id: selection.doctor_id,
            appointment_date: selection.date,
            working_day_id: selection.day_index,
            reason: reason.filter(|r| !r.trim().is_empty()),
        };

        debug!(
            "Booking doctor {} on {} ({})",
            request.doctor_id,
            selection.display_date(),
            selection.weekday_name()
        );

        self.api
            .send(
                Method::POST,
                "/appointments",
                Some(auth_token),
                None,
                Some(serde_json::to_value(&request)?),
            )
            .await?;

        info!("Appointment booked for {}", selection.display_date());
        Ok(())
    }
}
