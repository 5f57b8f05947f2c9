use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Map centre used when a doctor has not placed their practice (Algiers).
pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint {
    latitude: 36.752887,
    longitude: 3.042048,
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_RATING: u8 = 5;

/// Doctor as listed on result cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorSummary {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub specialization_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub visit_price: Option<f64>,
}

impl DoctorSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorProfile {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub specialization_id: Option<i64>,
    #[serde(default)]
    pub specialization_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub visit_price: Option<f64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub spoken_languages: Option<String>,
    #[serde(default)]
    pub zoom_link: Option<String>,
    #[serde(default)]
    pub experience_start_date: Option<i32>,
    #[serde(default, deserialize_with = "string_values")]
    pub assurances: Vec<String>,
}

impl DoctorProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::or_default(self.latitude, self.longitude)
    }

    pub fn address(&self) -> String {
        [&self.street, &self.city, &self.state]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Missing or zero coordinates fall back to [`DEFAULT_MAP_CENTER`].
    pub fn or_default(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let pick = |value: Option<f64>, fallback: f64| match value {
            Some(v) if v != 0.0 && v.is_finite() => v,
            _ => fallback,
        };

        Self {
            latitude: pick(latitude, DEFAULT_MAP_CENTER.latitude),
            longitude: pick(longitude, DEFAULT_MAP_CENTER.longitude),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub day_of_week: String,
    pub daily_appointment_limit: u32,
    #[serde(default)]
    pub hours: Vec<WorkingHours>,
}

impl WorkingDay {
    /// First declared window, formatted `start - end`.
    pub fn time_window(&self) -> Option<String> {
        self.hours
            .first()
            .map(|h| format!("{} - {}", h.start_time, h.end_time))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DoctorSearchFilters {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialite: String,
    #[serde(default)]
    pub localization: String,
    #[serde(default)]
    pub assurance: String,
    #[serde(default)]
    pub disponibilite: String,
    #[serde(default)]
    pub pagination: Pagination,
}

impl DoctorSearchFilters {
    /// Query pairs for `/adv_search/search`; empty filters are sent as empty
    /// strings, which the backend treats as "any".
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.pagination.to_query();
        query.extend([
            ("specialite", self.specialite.clone()),
            ("localization", self.localization.clone()),
            ("assurance", self.assurance.clone()),
            ("disponibilite", self.disponibilite.clone()),
            ("name", self.name.clone()),
        ]);
        query
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    #[serde(default)]
    pub doctors: Vec<DoctorSummary>,
    #[serde(default = "default_total_pages", rename = "totalPages")]
    pub total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}

/// Filter vocabularies returned by `/adv_search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchOptions {
    #[serde(default, deserialize_with = "string_values")]
    pub specialities: Vec<String>,
    #[serde(default, deserialize_with = "string_values")]
    pub assurances: Vec<String>,
    #[serde(default, deserialize_with = "string_values")]
    pub days_of_week: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specialization {
    pub id: i64,
    #[serde(alias = "specialization_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assurance {
    pub id: i64,
    #[serde(alias = "assurance_name")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    /// Builds from raw query values; anything unparsable or zero uses the default.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>, fallback: u32| {
            raw.and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(fallback)
        };

        Self {
            page: parse(page, DEFAULT_PAGE),
            limit: parse(limit, DEFAULT_PAGE_LIMIT),
        }
    }

    /// Moves to `page` when it lies within `1..=total_pages`.
    pub fn go_to(&self, page: u32, total_pages: u32) -> Option<Self> {
        if page >= 1 && page <= total_pages.max(1) {
            Some(Self { page, ..*self })
        } else {
            None
        }
    }

    pub fn next(&self, total_pages: u32) -> Option<Self> {
        self.go_to(self.page.checked_add(1)?, total_pages)
    }

    pub fn previous(&self, total_pages: u32) -> Option<Self> {
        self.go_to(self.page.saturating_sub(1), total_pages)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Star rendering of an average rating: floor of the rating filled, the rest empty.
pub fn rating_stars(rating: f64) -> String {
    let filled = if rating.is_finite() {
        rating.floor().clamp(0.0, MAX_RATING as f64) as usize
    } else {
        0
    };
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(MAX_RATING as usize - filled)
    )
}

// Accepts a list or an id-keyed object and keeps the display strings.
fn string_values<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    fn as_label(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    let value = Value::deserialize(deserializer)?;
    let labels = match value {
        Value::Array(items) => items.iter().filter_map(as_label).collect(),
        Value::Object(map) => map.values().filter_map(as_label).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    Ok(labels)
}
