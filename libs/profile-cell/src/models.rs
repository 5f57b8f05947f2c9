use serde::{Deserialize, Serialize};

use doctor_cell::models::{DoctorProfile, GeoPoint};
use shared_models::auth::User;

pub const DEFAULT_SPECIALIZATION_ID: i64 = 1;

pub const PHOTO_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// What the profile page shows: the account, plus the practice for doctors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileView {
    pub user: User,
    pub doctor: Option<DoctorProfile>,
}

impl ProfileView {
    pub fn position(&self) -> Option<GeoPoint> {
        self.doctor.as_ref().map(DoctorProfile::position)
    }
}

/// One accepted insurance in the profile payload.
///
/// Prefilled entries keep the name the backend returned; entries picked by the
/// user are sent as `{"assurance_id": id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AssuranceEntry {
    Selected { assurance_id: i64 },
    Name(String),
}

impl AssuranceEntry {
    /// Entries for a fresh selection of assurance ids.
    pub fn selected(ids: impl IntoIterator<Item = i64>) -> Vec<Self> {
        ids.into_iter()
            .map(|assurance_id| AssuranceEntry::Selected { assurance_id })
            .collect()
    }
}

/// Editable profile fields. `None` means "not filled in".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
    pub experience_start_date: Option<i32>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub spoken_languages: Option<String>,
    pub zoom_link: Option<String>,
    pub visit_price: Option<String>,
    pub phone_number: Option<String>,
    pub specialization_id: Option<i64>,
    pub assurances: Option<Vec<AssuranceEntry>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Body of `PUT /profile`, every field present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfilePayload {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo: String,
    pub experience_start_date: i32,
    pub state: String,
    pub city: String,
    pub street: String,
    pub spoken_languages: String,
    pub zoom_link: String,
    pub visit_price: f64,
    pub phone_number: String,
    pub specialization_id: i64,
    pub assurances: Vec<AssuranceEntry>,
    pub latitude: f64,
    pub longitude: f64,
}

impl ProfileUpdate {
    /// Pre-fills the form from what the backend currently holds.
    pub fn from_view(view: &ProfileView) -> Self {
        let user = &view.user;
        let mut update = Self {
            username: Some(user.username.clone()),
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
            phone_number: user.phone_number.clone(),
            photo: user.photo.clone(),
            ..Self::default()
        };

        if let Some(doctor) = &view.doctor {
            update.experience_start_date = doctor.experience_start_date;
            update.state = doctor.state.clone();
            update.city = doctor.city.clone();
            update.street = doctor.street.clone();
            update.spoken_languages = doctor.spoken_languages.clone();
            update.zoom_link = doctor.zoom_link.clone();
            update.visit_price = doctor.visit_price.map(|p| p.to_string());
            update.specialization_id = doctor.specialization_id;
            update.assurances = Some(
                doctor
                    .assurances
                    .iter()
                    .cloned()
                    .map(AssuranceEntry::Name)
                    .collect(),
            );
            update.latitude = doctor.latitude;
            update.longitude = doctor.longitude;
            if doctor.photo.is_some() {
                update.photo = doctor.photo.clone();
            }
        }

        update
    }

    /// Fills the gaps the backend will not accept as missing.
    pub fn prepare(&self) -> ProfilePayload {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        ProfilePayload {
            username: text(&self.username),
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            email: text(&self.email),
            photo: text(&self.photo),
            experience_start_date: self.experience_start_date.unwrap_or(0),
            state: text(&self.state),
            city: text(&self.city),
            street: text(&self.street),
            spoken_languages: text(&self.spoken_languages),
            zoom_link: text(&self.zoom_link),
            visit_price: parse_price(self.visit_price.as_deref()),
            phone_number: text(&self.phone_number),
            specialization_id: self
                .specialization_id
                .filter(|id| *id != 0)
                .unwrap_or(DEFAULT_SPECIALIZATION_ID),
            assurances: self.assurances.clone().unwrap_or_default(),
            latitude: self.latitude.unwrap_or(0.0),
            longitude: self.longitude.unwrap_or(0.0),
        }
    }
}

/// Leading numeric part of a price, 0 when there is none.
pub fn parse_price(raw: Option<&str>) -> f64 {
    let raw = match raw {
        Some(r) => r.trim(),
        None => return 0.0,
    };

    let end = raw
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());

    let mut numeric = &raw[..end];
    while !numeric.is_empty() {
        if let Ok(value) = numeric.parse::<f64>() {
            return value;
        }
        numeric = &numeric[..numeric.len() - 1];
    }
    0.0
}
