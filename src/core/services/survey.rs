use crate::core::models::{
    choice::Query as ChoiceQuery,
    common::Pagination,
    question::{Query as QuestionQuery, QuestionItem},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, SurveyCreate, SurveyDetail, SurveyListItem, SurveyPatch, Update as SurveyUpdate},
};
use crate::core::ports::repository::{ChoiceCommon, QuestionCommon, Store, SurveyCommon, TxStore};
use crate::core::validator::{validate_optional_text, validate_text, validate_window, SURVEY_DESCRIPTION_MAX_LEN, SURVEY_NAME_MAX_LEN};
use crate::error::Error;
use chrono::{DateTime, Utc};
use itertools::Itertools;

fn active() -> SurveyQuery {
    SurveyQuery { is_active_eq: Some(true) }
}

pub async fn create_survey<T>(mut store: T, survey: SurveyCreate, now: DateTime<Utc>) -> Result<Survey, Error>
where
    T: TxStore,
{
    validate_text("name", &survey.name, SURVEY_NAME_MAX_LEN)?;
    validate_text("description", &survey.description, SURVEY_DESCRIPTION_MAX_LEN)?;
    validate_window(Some(survey.start_at), Some(survey.end_at), now)?;
    let id = SurveyCommon::insert(
        &mut store,
        SurveyInsert {
            name: survey.name,
            description: survey.description,
            start_at: survey.start_at,
            end_at: survey.end_at,
            is_active: survey.is_active,
        },
    )
    .await?;
    let survey = SurveyCommon::get(&mut store, id).await?;
    store.commit().await?;
    log::info!("survey {} created", id);
    Ok(survey)
}

pub async fn update_survey<T>(mut store: T, id: i32, patch: SurveyPatch, now: DateTime<Utc>) -> Result<Survey, Error>
where
    T: TxStore,
{
    validate_optional_text("name", patch.name.as_deref(), SURVEY_NAME_MAX_LEN)?;
    validate_optional_text("description", patch.description.as_deref(), SURVEY_DESCRIPTION_MAX_LEN)?;
    validate_window(patch.start_at, patch.end_at, now)?;
    SurveyCommon::get(&mut store, id).await?;
    SurveyCommon::update(
        &mut store,
        id,
        SurveyUpdate {
            name: patch.name,
            description: patch.description,
            start_at: patch.start_at,
            end_at: patch.end_at,
            is_active: patch.is_active,
        },
    )
    .await?;
    let survey = SurveyCommon::get(&mut store, id).await?;
    store.commit().await?;
    Ok(survey)
}

pub async fn delete_survey<T>(mut store: T, id: i32) -> Result<(), Error>
where
    T: TxStore,
{
    SurveyCommon::get(&mut store, id).await?;
    SurveyCommon::delete(&mut store, id).await?;
    store.commit().await?;
    log::info!("survey {} deleted", id);
    Ok(())
}

pub async fn list_surveys<S>(store: &mut S, pagination: Pagination) -> Result<(Vec<SurveyListItem>, i64), Error>
where
    S: Store,
{
    let total = SurveyCommon::count(store, &active()).await?;
    let surveys = SurveyCommon::query(store, &active(), Some(pagination)).await?;
    Ok((surveys.into_iter().map(SurveyListItem::from).collect(), total))
}

pub async fn survey_detail<S>(store: &mut S, id: i32) -> Result<SurveyDetail, Error>
where
    S: Store,
{
    let survey = SurveyCommon::get(store, id).await?;
    if !survey.is_active {
        return Err(Error::NotFound("survey".into()));
    }
    let questions = QuestionCommon::query(
        store,
        &QuestionQuery {
            survey_id_eq: Some(id),
            ..Default::default()
        },
        None,
    )
    .await?;
    let mut choices = ChoiceCommon::query(
        store,
        &ChoiceQuery {
            question_id_in: Some(questions.iter().map(|q| q.id).collect()),
            ..Default::default()
        },
        None,
    )
    .await?
    .into_iter()
    .map(|c| (c.question_id, c.text))
    .into_group_map();
    Ok(SurveyDetail {
        id: survey.id,
        name: survey.name,
        description: survey.description,
        end_at: survey.end_at,
        created_at: survey.created_at,
        questions: questions
            .into_iter()
            .map(|q| QuestionItem {
                choices: choices.remove(&q.id).unwrap_or_default(),
                id: q.id,
                text: q.text,
                type_question: q.type_question,
            })
            .collect(),
    })
}
