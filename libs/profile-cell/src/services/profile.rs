use std::path::Path;

use tracing::{debug, info};

use auth_cell::services::fetch_current_user;
use doctor_cell::models::DoctorProfile;
use shared_api::{ApiClient, Method};
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ProfileUpdate, ProfileView, PHOTO_EXTENSIONS};

pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self { api }
    }

    /// Account details, plus the practice profile when the account is a doctor's.
    pub async fn load(&self, auth_token: &str) -> Result<ProfileView, AppError> {
        let user = fetch_current_user(&self.api, auth_token).await?;
        debug!("Loaded account {} (doctor: {})", user.username, user.is_doctor);

        let doctor = if user.is_doctor {
            Some(self.doctor_profile(auth_token).await?)
        } else {
            None
        };

        Ok(ProfileView { user, doctor })
    }

    /// The logged-in doctor's own practice profile.
    pub async fn doctor_profile(&self, auth_token: &str) -> Result<DoctorProfile, AppError> {
        self.api
            .request(Method::GET, "/doctor", Some(auth_token), None, None)
            .await
    }

    pub async fn update(&self, update: &ProfileUpdate, auth_token: &str) -> Result<(), AppError> {
        let payload = update.prepare();
        debug!("Updating profile for {}", payload.username);

        self.api
            .send(
                Method::PUT,
                "/profile",
                Some(auth_token),
                None,
                Some(serde_json::to_value(&payload)?),
            )
            .await?;

        info!("Profile updated");
        Ok(())
    }

    /// Uploads a new profile photo read from `path`.
    pub async fn upload_photo(&self, path: &Path, auth_token: &str) -> Result<serde_json::Value, AppError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if !PHOTO_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Unsupported photo type {:?}, expected one of {}",
                extension,
                PHOTO_EXTENSIONS.join(", ")
            )));
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::BadRequest(format!("Cannot read {}: {}", path.display(), e)))?;

        debug!("Uploading photo {} ({} bytes)", file_name, bytes.len());

        // The backend route is spelled "updload".
        self.api
            .upload("/profile/updload", Some(auth_token), "photo", &file_name, bytes)
            .await
    }
}
