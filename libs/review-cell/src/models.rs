use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_NOTE: u8 = 1;
pub const MAX_NOTE: u8 = 5;

/// A patient's rating of a doctor, with an optional comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub id_doctor: i64,
    pub id_patient: i64,
    pub note: u8,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment: String,
}

impl Review {
    pub fn new(id_doctor: i64, id_patient: i64, note: u8, comment: impl Into<String>) -> Self {
        Self {
            id: None,
            id_doctor,
            id_patient,
            note,
            comment: comment.into(),
        }
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }

    pub fn is_valid_note(&self) -> bool {
        (MIN_NOTE..=MAX_NOTE).contains(&self.note)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewList {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl ReviewList {
    /// Reviews worth showing as comments.
    pub fn comments(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter().filter(|r| r.has_comment())
    }

    /// Most recent entry; the backend returns the patient's reviews newest first.
    pub fn latest(&self) -> Option<&Review> {
        self.reviews.first()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
