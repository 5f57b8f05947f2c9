use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub patient_first_name: String,
    #[serde(default)]
    pub patient_last_name: String,
    #[serde(default)]
    pub patient_phone_number: Option<String>,
    pub appointment_date: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn patient_name(&self) -> String {
        format!("{} {}", self.patient_first_name, self.patient_last_name)
    }

    pub fn reason_or_default(&self) -> &str {
        match self.reason.as_deref() {
            Some(reason) if !reason.trim().is_empty() => reason,
            _ => "No reason provided",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(format!("unknown appointment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

/// Body of `POST /appointments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookAppointmentRequest {
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub working_day_id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Replaces the status of one appointment in a locally held agenda.
pub fn apply_status(appointments: &mut [Appointment], appointment_id: i64, status: AppointmentStatus) -> bool {
    match appointments.iter_mut().find(|a| a.id == appointment_id) {
        Some(appointment) => {
            appointment.status = status;
            true
        }
        None => false,
    }
}
