use crate::core::models::question::QuestionItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Survey {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyCreate {
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Body of a full update; name and description must be resent.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyReplace {
    pub name: String,
    pub description: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl From<SurveyReplace> for SurveyPatch {
    fn from(r: SurveyReplace) -> Self {
        Self {
            name: Some(r.name),
            description: Some(r.description),
            start_at: r.start_at,
            end_at: r.end_at,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Update {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub is_active_eq: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyListItem {
    pub id: i32,
    pub name: String,
}

impl From<Survey> for SurveyListItem {
    fn from(s: Survey) -> Self {
        Self { id: s.id, name: s.name }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyDetail {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<QuestionItem>,
}
