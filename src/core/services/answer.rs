use crate::core::models::{
    answer::{Answer, AnswerItem, AnswerPrompt, AnsweredQuestion, Insert as AnswerInsert, Query as AnswerQuery, Respondent, Submit, ANSWER_PLACEHOLDER},
    choice::Query as ChoiceQuery,
    common::Pagination,
    question::{Query as QuestionQuery, Question},
};
use crate::core::ports::repository::{AnswerCommon, ChoiceCommon, QuestionCommon, Store, SurveyCommon, TxStore};
use crate::core::validator::validate_answer;
use crate::error::Error;
use itertools::Itertools;
use std::collections::HashMap;

/// Loads a question, insisting it belongs to the survey named in the request.
async fn question_in_survey<S>(store: &mut S, survey_id: i32, question_id: i32) -> Result<Question, Error>
where
    S: Store,
{
    let question = QuestionCommon::get(store, question_id).await?;
    if question.survey_id != survey_id {
        return Err(Error::NotFound("question".into()));
    }
    Ok(question)
}

async fn choice_texts<S>(store: &mut S, question_id: i32) -> Result<Vec<String>, Error>
where
    S: Store,
{
    let choices = ChoiceCommon::query(
        store,
        &ChoiceQuery {
            question_id_in: Some(vec![question_id]),
            ..Default::default()
        },
        None,
    )
    .await?;
    Ok(choices.into_iter().map(|c| c.text).collect())
}

pub async fn prompt<S>(store: &mut S, survey_id: i32, question_id: i32) -> Result<AnswerPrompt, Error>
where
    S: Store,
{
    let question = question_in_survey(store, survey_id, question_id).await?;
    let survey = SurveyCommon::get(store, survey_id).await?;
    let choices = choice_texts(store, question_id).await?;
    Ok(AnswerPrompt {
        poll: survey.name,
        question: question.text,
        type_question: question.type_question,
        choices,
        answer: ANSWER_PLACEHOLDER.into(),
    })
}

/// Validates and stores an answer.
///
/// Authenticated respondents are recorded by their user id, anyone else by the
/// anonymous id they supply in the body.
pub async fn submit<T>(mut store: T, survey_id: i32, question_id: i32, user_id: Option<i32>, submit: Submit) -> Result<Answer, Error>
where
    T: TxStore,
{
    let question = question_in_survey(&mut store, survey_id, question_id).await?;
    let choices = choice_texts(&mut store, question_id).await?;
    let answer = validate_answer(&submit.answer, question.type_question, &choices)?;
    let respondent = match (user_id, submit.anonymous_id) {
        (Some(uid), _) => Respondent::User(uid),
        (None, Some(anonymous_id)) => Respondent::Anonymous(anonymous_id),
        (None, None) => return Err(Error::ValidationError("anonymous respondents must provide a user id".into())),
    };
    let id = AnswerCommon::insert(
        &mut store,
        AnswerInsert {
            respondent,
            question_id,
            answer,
        },
    )
    .await?;
    let answer = AnswerCommon::get(&mut store, id).await?;
    store.commit().await?;
    log::info!("answer {} submitted to question {} by {:?}", id, question_id, respondent);
    Ok(answer)
}

async fn answers_with_questions<S>(store: &mut S, query: AnswerQuery, pagination: Pagination) -> Result<(Vec<AnswerItem>, i64), Error>
where
    S: Store,
{
    let total = AnswerCommon::count(store, &query).await?;
    let answers = AnswerCommon::query(store, &query, Some(pagination)).await?;
    let question_ids: Vec<i32> = answers.iter().map(|a| a.question_id).unique().collect();
    let questions: HashMap<i32, Question> = QuestionCommon::query(
        store,
        &QuestionQuery {
            id_in: Some(question_ids.clone()),
            ..Default::default()
        },
        None,
    )
    .await?
    .into_iter()
    .map(|q| (q.id, q))
    .collect();
    let choices = ChoiceCommon::query(
        store,
        &ChoiceQuery {
            question_id_in: Some(question_ids),
            ..Default::default()
        },
        None,
    )
    .await?
    .into_iter()
    .map(|c| (c.question_id, c.text))
    .into_group_map();
    let mut items = Vec::with_capacity(answers.len());
    for a in answers {
        let question = questions.get(&a.question_id).ok_or_else(|| Error::NotFound("question".into()))?;
        items.push(AnswerItem {
            user: a.user_id,
            anonymous_id: a.anonymous_id,
            question: AnsweredQuestion {
                survey: question.survey_id,
                id: question.id,
                text: question.text.clone(),
                type_question: question.type_question,
                choices: choices.get(&question.id).cloned().unwrap_or_default(),
            },
            answer: a.answer,
            submit_time: a.submit_time,
        });
    }
    Ok((items, total))
}

pub async fn user_answers<S>(store: &mut S, user_id: i32, pagination: Pagination) -> Result<(Vec<AnswerItem>, i64), Error>
where
    S: Store,
{
    let query = AnswerQuery {
        user_id_eq: Some(user_id),
        ..Default::default()
    };
    answers_with_questions(store, query, pagination).await
}

pub async fn anonymous_answers<S>(store: &mut S, anonymous_id: i32, pagination: Pagination) -> Result<(Vec<AnswerItem>, i64), Error>
where
    S: Store,
{
    let query = AnswerQuery {
        anonymous_id_eq: Some(anonymous_id),
        ..Default::default()
    };
    answers_with_questions(store, query, pagination).await
}
