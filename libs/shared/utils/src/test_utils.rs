use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub api_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::for_api_url(self.api_url.clone())
    }
}

pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub is_doctor: bool,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::patient("testuser")
    }
}

impl TestUser {
    pub fn new(username: &str, is_doctor: bool) -> Self {
        Self {
            id: if is_doctor { 7 } else { 42 },
            username: username.to_string(),
            is_doctor,
        }
    }

    pub fn doctor(username: &str) -> Self {
        Self::new(username, true)
    }

    pub fn patient(username: &str) -> Self {
        Self::new(username, false)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("{}@example.com", self.username),
            phone_number: Some("0550000000".to_string()),
            is_doctor: self.is_doctor,
            photo: None,
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.username,
            "role": if user.is_doctor { "doctor" } else { "patient" },
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Canned bodies in the shape the booking backend returns.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn user_response(user: &TestUser) -> Value {
        json!({
            "id": user.id,
            "username": user.username,
            "first_name": "Test",
            "last_name": "User",
            "email": format!("{}@example.com", user.username),
            "phone_number": "0550000000",
            "is_doctor": user.is_doctor,
            "photo": null
        })
    }

    pub fn doctor_response(doctor_id: i64) -> Value {
        json!({
            "id": doctor_id,
            "username": "dr.benali",
            "first_name": "Karim",
            "last_name": "Benali",
            "email": "k.benali@example.com",
            "photo": "/media/benali.png",
            "specialization_id": 3,
            "specialization_name": "Cardiology",
            "state": "Alger",
            "city": "Bab Ezzouar",
            "street": "12 rue des Freres",
            "latitude": 36.72,
            "longitude": 3.18,
            "rating": 3.6,
            "visit_price": 2500.0,
            "phone_number": "0551234567",
            "spoken_languages": "French, Arabic",
            "zoom_link": "",
            "experience_start_date": 2011,
            "assurances": ["CNAS", "CASNOS"]
        })
    }

    pub fn working_day_response(id: i64, day_of_week: &str) -> Value {
        json!({
            "id": id,
            "day_of_week": day_of_week,
            "daily_appointment_limit": 12,
            "hours": [
                { "hour_id": 1, "start_time": "09:00", "end_time": "13:00" }
            ]
        })
    }

    pub fn appointment_response(id: i64, status: &str) -> Value {
        json!({
            "id": id,
            "patient_first_name": "Lina",
            "patient_last_name": "Haddad",
            "patient_phone_number": "0667000000",
            "appointment_date": "2026-10-20",
            "reason": null,
            "status": status
        })
    }

    pub fn review_response(patient_id: i64, doctor_id: i64, note: u8, comment: &str) -> Value {
        json!({
            "id": patient_id * 100 + doctor_id,
            "id_doctor": doctor_id,
            "id_patient": patient_id,
            "note": note,
            "comment": comment
        })
    }

    pub fn error_response(detail: &str) -> Value {
        json!({ "detail": detail })
    }
}
