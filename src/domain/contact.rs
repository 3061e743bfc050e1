use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::filter::{FieldKind, FieldRegistry, FieldSpec, MatchMode};

/// Filterable fields of a [`Contact`].
///
/// `id` is registered so its name is recognized but declared excluded: the
/// surrogate key never participates in query-by-example filtering. `email`
/// overrides the text default to exact matching, so a filter on it is an
/// address lookup rather than a substring search.
pub const FILTER_FIELDS: FieldRegistry = FieldRegistry::new(
    &[
        FieldSpec::new("id", FieldKind::Integer),
        FieldSpec::new("name", FieldKind::Text),
        FieldSpec::new("email", FieldKind::Text).with_match_mode(MatchMode::Exact),
        FieldSpec::new("phone", FieldKind::Text),
        FieldSpec::new("company", FieldKind::Text),
        FieldSpec::new("rating", FieldKind::Integer),
    ],
    &["id"],
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub rating: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub rating: i64,
}

impl NewContact {
    #[must_use]
    pub fn new(name: String, email: String, phone: String, company: String, rating: i64) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            company: company.trim().to_string(),
            rating,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub rating: i64,
}

impl UpdateContact {
    #[must_use]
    pub fn new(name: String, email: String, phone: String, company: String, rating: i64) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            company: company.trim().to_string(),
            rating,
        }
    }
}
