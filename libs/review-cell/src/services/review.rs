use tracing::{debug, info, warn};

use shared_api::{ApiClient, Method};
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{Review, ReviewList, MAX_NOTE, MIN_NOTE};

pub struct ReviewService {
    api: ApiClient,
}

impl ReviewService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn reviews_for_doctor(
        &self,
        doctor_id: i64,
        auth_token: Option<&str>,
    ) -> Result<ReviewList, AppError> {
        debug!("Fetching reviews for doctor: {}", doctor_id);

        self.api
            .request(
                Method::GET,
                "/evaluate",
                auth_token,
                Some(&[("id_doctor", doctor_id.to_string())][..]),
                None,
            )
            .await
    }

    /// The patient's latest review of this doctor, if any.
    pub async fn last_review(
        &self,
        patient_id: i64,
        doctor_id: i64,
        auth_token: &str,
    ) -> Result<Option<Review>, AppError> {
        debug!("Fetching last review by patient {} for doctor {}", patient_id, doctor_id);

        let list: ReviewList = self
            .api
            .request(
                Method::GET,
                "/evaluate/patient",
                Some(auth_token),
                Some(&[
                    ("id_patient", patient_id.to_string()),
                    ("doctor_id", doctor_id.to_string()),
                ][..]),
                None,
            )
            .await?;

        Ok(list.latest().cloned())
    }

    /// Records a review, then asks the backend to recompute the doctor's average.
    ///
    /// A failed recomputation is logged; the review itself is already stored.
    pub async fn submit(&self, review: &Review, auth_token: &str) -> Result<(), AppError> {
        if !review.is_valid_note() {
            return Err(AppError::ValidationError(format!(
                "Rating must be between {} and {}",
                MIN_NOTE, MAX_NOTE
            )));
        }

        debug!(
            "Submitting rating {} for doctor {}",
            review.note, review.id_doctor
        );

        self.api
            .send(
                Method::POST,
                "/evaluate/create",
                Some(auth_token),
                None,
                Some(serde_json::to_value(review)?),
            )
            .await?;

        info!("Rating submitted for doctor {}", review.id_doctor);

        if let Err(e) = self.recalculate_rating(review.id_doctor).await {
            warn!("Failed to recalculate rating for doctor {}: {}", review.id_doctor, e);
        }

        Ok(())
    }

    pub async fn recalculate_rating(&self, doctor_id: i64) -> Result<(), AppError> {
        self.api
            .send(
                Method::PUT,
                "/evaluate/calculate_rating",
                None,
                Some(&[("id_doctor", doctor_id.to_string())][..]),
                None,
            )
            .await
    }
}
