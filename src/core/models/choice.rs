use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Choice {
    pub id: i32,
    #[serde(rename = "question")]
    pub question_id: i32,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceCreate {
    pub question: i32,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoicePatch {
    pub question: Option<i32>,
    pub text: Option<String>,
}

impl From<ChoiceCreate> for ChoicePatch {
    fn from(c: ChoiceCreate) -> Self {
        Self {
            question: Some(c.question),
            text: Some(c.text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: i32,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Update {
    pub question_id: Option<i32>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub question_id_in: Option<Vec<i32>>,
    pub search: Option<String>,
}
