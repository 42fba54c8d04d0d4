use crate::core::models::{
    choice::Query as ChoiceQuery,
    common::Pagination,
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question, QuestionCreate, QuestionDetail, QuestionItem, QuestionPatch, Update as QuestionUpdate},
};
use crate::core::ports::repository::{ChoiceCommon, QuestionCommon, Store, SurveyCommon, TxStore};
use crate::core::validator::{validate_optional_text, validate_text, QUESTION_TEXT_MAX_LEN};
use crate::error::Error;
use itertools::Itertools;

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

pub async fn create_question<T>(mut store: T, question: QuestionCreate) -> Result<Question, Error>
where
    T: TxStore,
{
    validate_text("text", &question.text, QUESTION_TEXT_MAX_LEN)?;
    SurveyCommon::get(&mut store, question.survey).await?;
    let id = QuestionCommon::insert(
        &mut store,
        QuestionInsert {
            text: question.text,
            type_question: question.type_question,
            survey_id: question.survey,
        },
    )
    .await?;
    let question = QuestionCommon::get(&mut store, id).await?;
    store.commit().await?;
    log::info!("question {} created in survey {}", id, question.survey_id);
    Ok(question)
}

pub async fn update_question<T>(mut store: T, id: i32, patch: QuestionPatch) -> Result<Question, Error>
where
    T: TxStore,
{
    validate_optional_text("text", patch.text.as_deref(), QUESTION_TEXT_MAX_LEN)?;
    QuestionCommon::get(&mut store, id).await?;
    if let Some(survey_id) = patch.survey {
        SurveyCommon::get(&mut store, survey_id).await?;
    }
    QuestionCommon::update(
        &mut store,
        id,
        QuestionUpdate {
            text: patch.text,
            type_question: patch.type_question,
            survey_id: patch.survey,
        },
    )
    .await?;
    let question = QuestionCommon::get(&mut store, id).await?;
    store.commit().await?;
    Ok(question)
}

pub async fn delete_question<T>(mut store: T, id: i32) -> Result<(), Error>
where
    T: TxStore,
{
    QuestionCommon::get(&mut store, id).await?;
    QuestionCommon::delete(&mut store, id).await?;
    store.commit().await?;
    log::info!("question {} deleted", id);
    Ok(())
}

pub async fn question_detail<S>(store: &mut S, id: i32) -> Result<QuestionDetail, Error>
where
    S: Store,
{
    let question = QuestionCommon::get(store, id).await?;
    let choices = choice_texts(store, id).await?;
    Ok(QuestionDetail::new(question, choices))
}

pub async fn list_questions<S>(store: &mut S, search: Option<String>, pagination: Pagination) -> Result<(Vec<QuestionItem>, i64), Error>
where
    S: Store,
{
    let query = QuestionQuery {
        search,
        ..Default::default()
    };
    let total = QuestionCommon::count(store, &query).await?;
    let questions = QuestionCommon::query(store, &query, Some(pagination)).await?;
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
    let items = questions
        .into_iter()
        .map(|q| {
            let texts = choices.remove(&q.id).unwrap_or_default();
            QuestionItem::from(QuestionDetail::new(q, texts))
        })
        .collect();
    Ok((items, total))
}
