use crate::core::models::question::QuestionType;
use crate::error::Error;
use chrono::{DateTime, Utc};

pub const MULTI_CHOICE_SEPARATOR: char = ',';
pub const ANSWER_MAX_LEN: usize = 300;
pub const SURVEY_NAME_MAX_LEN: usize = 255;
pub const SURVEY_DESCRIPTION_MAX_LEN: usize = 1000;
pub const QUESTION_TEXT_MAX_LEN: usize = 2000;
pub const CHOICE_TEXT_MAX_LEN: usize = 400;

fn invalid_answer() -> Error {
    Error::ValidationError("invalid answer".into())
}

/// Checks a submitted answer against the question it is meant for.
///
/// The candidate is trimmed first. For `choice` it must be one of `choices`;
/// for `multi_choice` every comma separated part must be. Returns the value
/// that should be stored.
pub fn validate_answer(candidate: &str, type_question: QuestionType, choices: &[String]) -> Result<String, Error> {
    let value = candidate.trim();
    if value.is_empty() {
        return Err(Error::ValidationError("answer may not be blank".into()));
    }
    if value.chars().count() > ANSWER_MAX_LEN {
        return Err(Error::ValidationError(format!("answer must be at most {} characters", ANSWER_MAX_LEN)));
    }
    let is_choice = |v: &str| choices.iter().any(|c| c == v);
    match type_question {
        QuestionType::Text => {}
        QuestionType::Choice => {
            if !is_choice(value) {
                return Err(invalid_answer());
            }
        }
        QuestionType::MultiChoice => {
            if !value.split(MULTI_CHOICE_SEPARATOR).all(is_choice) {
                return Err(invalid_answer());
            }
        }
    }
    Ok(value.to_owned())
}

/// Checks the time window of a survey. Each check runs only when the fields it
/// reads are given, so partial updates skip what they do not touch.
pub fn validate_window(start_at: Option<DateTime<Utc>>, end_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<(), Error> {
    if let (Some(start_at), Some(end_at)) = (start_at, end_at) {
        if end_at < start_at {
            return Err(Error::ValidationError("end date cannot be earlier than start date".into()));
        }
    }
    if let Some(end_at) = end_at {
        if end_at < now {
            return Err(Error::ValidationError("end date cannot be earlier than the current date".into()));
        }
    }
    Ok(())
}

pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::ValidationError(format!("{} may not be blank", field)));
    }
    if value.chars().count() > max_len {
        return Err(Error::ValidationError(format!("{} must be at most {} characters", field, max_len)));
    }
    Ok(())
}

pub fn validate_optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<(), Error> {
    match value {
        Some(v) => validate_text(field, v, max_len),
        None => Ok(()),
    }
}
