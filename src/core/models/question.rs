use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(sqlx::Type)]
#[sqlx(type_name = "question_type")]
#[sqlx(rename_all = "snake_case")]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    Text,
    Choice,
    MultiChoice,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Choice => "choice",
            QuestionType::MultiChoice => "multi_choice",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Question {
    pub id: i32,
    pub text: String,
    pub type_question: QuestionType,
    #[serde(rename = "survey")]
    pub survey_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionCreate {
    pub text: String,
    pub type_question: QuestionType,
    pub survey: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub type_question: Option<QuestionType>,
    pub survey: Option<i32>,
}

impl From<QuestionCreate> for QuestionPatch {
    fn from(c: QuestionCreate) -> Self {
        Self {
            text: Some(c.text),
            type_question: Some(c.type_question),
            survey: Some(c.survey),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub text: String,
    pub type_question: QuestionType,
    pub survey_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Update {
    pub text: Option<String>,
    pub type_question: Option<QuestionType>,
    pub survey_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub id_in: Option<Vec<i32>>,
    pub survey_id_eq: Option<i32>,
    /// Case-insensitive substring of the text, or the exact type name.
    pub search: Option<String>,
}

/// A question as listed, with the texts of its choices.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionItem {
    pub id: i32,
    pub text: String,
    pub type_question: QuestionType,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub id: i32,
    pub text: String,
    pub type_question: QuestionType,
    pub survey: i32,
    pub choices: Vec<String>,
}

impl QuestionDetail {
    pub fn new(question: Question, choices: Vec<String>) -> Self {
        Self {
            id: question.id,
            text: question.text,
            type_question: question.type_question,
            survey: question.survey_id,
            choices,
        }
    }
}

impl From<QuestionDetail> for QuestionItem {
    fn from(d: QuestionDetail) -> Self {
        Self {
            id: d.id,
            text: d.text,
            type_question: d.type_question,
            choices: d.choices,
        }
    }
}
