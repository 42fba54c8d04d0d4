use crate::core::models::question::QuestionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub static ANSWER_PLACEHOLDER: &str = "Enter your answer";

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Answer {
    pub id: i32,
    #[serde(rename = "user")]
    pub user_id: Option<i32>,
    pub anonymous_id: Option<i32>,
    #[serde(rename = "question")]
    pub question_id: i32,
    pub answer: String,
    pub submit_time: DateTime<Utc>,
}

/// Body of an answer submission. Anonymous respondents identify themselves with `user`.
#[derive(Debug, Clone, Deserialize)]
pub struct Submit {
    pub answer: String,
    #[serde(rename = "user")]
    pub anonymous_id: Option<i32>,
}

/// Who an answer is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Respondent {
    User(i32),
    Anonymous(i32),
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub respondent: Respondent,
    pub question_id: i32,
    pub answer: String,
}

impl Insert {
    pub fn user_id(&self) -> Option<i32> {
        match self.respondent {
            Respondent::User(id) => Some(id),
            Respondent::Anonymous(_) => None,
        }
    }

    pub fn anonymous_id(&self) -> Option<i32> {
        match self.respondent {
            Respondent::Anonymous(id) => Some(id),
            Respondent::User(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub user_id_eq: Option<i32>,
    pub anonymous_id_eq: Option<i32>,
}

/// What a respondent sees before answering a question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerPrompt {
    pub poll: String,
    pub question: String,
    pub type_question: QuestionType,
    pub choices: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnsweredQuestion {
    pub survey: i32,
    pub id: i32,
    pub text: String,
    pub type_question: QuestionType,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerItem {
    pub user: Option<i32>,
    pub anonymous_id: Option<i32>,
    pub question: AnsweredQuestion,
    pub answer: String,
    pub submit_time: DateTime<Utc>,
}
