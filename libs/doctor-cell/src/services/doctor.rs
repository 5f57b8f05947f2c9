use tracing::debug;

use shared_api::{ApiClient, Method};
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    Assurance, DoctorProfile, DoctorSearchFilters, DoctorSummary, Pagination, SearchOptions,
    SearchResults, Specialization,
};

pub struct DoctorService {
    api: ApiClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// One page of the full doctor directory.
    pub async fn list_doctors(&self, pagination: Pagination) -> Result<Vec<DoctorSummary>, AppError> {
        debug!("Listing doctors page {} (limit {})", pagination.page, pagination.limit);

        let doctors: Option<Vec<DoctorSummary>> = self
            .api
            .request_optional(
                Method::GET,
                "/doctors",
                None,
                Some(pagination.to_query().as_slice()),
                None,
            )
            .await?;

        Ok(doctors.unwrap_or_default())
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<DoctorProfile, AppError> {
        debug!("Fetching doctor profile: {}", doctor_id);

        let path = format!("/doctors/{}", doctor_id);
        self.api.request(Method::GET, &path, None, None, None).await
    }

    /// Advanced search by name, speciality, location, insurance and weekday.
    pub async fn search(&self, filters: &DoctorSearchFilters) -> Result<SearchResults, AppError> {
        debug!("Searching doctors with filters: {:?}", filters);

        let results: SearchResults = self
            .api
            .request(
                Method::GET,
                "/adv_search/search",
                None,
                Some(filters.to_query().as_slice()),
                None,
            )
            .await?;

        debug!(
            "Search returned {} doctors over {} pages",
            results.doctors.len(),
            results.total_pages
        );
        Ok(results)
    }

    pub async fn search_options(&self) -> Result<SearchOptions, AppError> {
        self.api
            .request(Method::GET, "/adv_search", None, None, None)
            .await
    }

    pub async fn specializations(&self) -> Result<Vec<Specialization>, AppError> {
        self.api
            .request(Method::GET, "/specializations", None, None, None)
            .await
    }

    pub async fn assurances(&self) -> Result<Vec<Assurance>, AppError> {
        self.api
            .request(Method::GET, "/assurances", None, None, None)
            .await
    }
}
