use serde_json::json;
use tracing::{debug, info};

use shared_api::{ApiClient, Method};
use shared_config::AppConfig;
use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_utils::session::{Session, SessionStore};

use crate::models::{LoginRequest, SignUpForm};

pub struct AuthService {
    api: ApiClient,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new(config)?,
            sessions: SessionStore::from_config(config),
        })
    }

    pub fn with_parts(api: ApiClient, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Validate the sign-up form locally, then create the account.
    pub async fn register(&self, form: &SignUpForm) -> Result<(), AppError> {
        let request = form
            .validate()
            .map_err(|errors| AppError::ValidationError(errors.to_string()))?;

        debug!("Registering account: {}", request.username);

        self.api
            .send(
                Method::POST,
                "/register",
                None,
                None,
                Some(serde_json::to_value(&request)?),
            )
            .await?;

        info!("Account {} registered", request.username);
        Ok(())
    }

    /// Exchange credentials for a token and remember it.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "username and password are required".to_string(),
            ));
        }

        debug!("Logging in as {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: TokenResponse = self
            .api
            .request(
                Method::POST,
                "/login",
                None,
                None,
                Some(json!(request)),
            )
            .await?;

        let session = self.sessions.save(&response.access_token, Some(username))?;
        info!("Logged in as {}", username);
        Ok(session)
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.sessions.clear()
    }

    pub async fn current_user(&self) -> Result<User, AppError> {
        let token = self.sessions.require()?;
        fetch_current_user(&self.api, &token).await
    }
}

/// `GET /users/me` for the given token.
pub async fn fetch_current_user(api: &ApiClient, auth_token: &str) -> Result<User, AppError> {
    api.request(Method::GET, "/users/me", Some(auth_token), None, None)
        .await
}
