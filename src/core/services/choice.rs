use crate::core::models::{
    choice::{Choice, ChoiceCreate, ChoicePatch, Insert as ChoiceInsert, Query as ChoiceQuery, Update as ChoiceUpdate},
    common::Pagination,
};
use crate::core::ports::repository::{ChoiceCommon, QuestionCommon, Store, TxStore};
use crate::core::validator::{validate_optional_text, validate_text, CHOICE_TEXT_MAX_LEN};
use crate::error::Error;

pub async fn create_choice<T>(mut store: T, choice: ChoiceCreate) -> Result<Choice, Error>
where
    T: TxStore,
{
    validate_text("text", &choice.text, CHOICE_TEXT_MAX_LEN)?;
    QuestionCommon::get(&mut store, choice.question).await?;
    let id = ChoiceCommon::insert(
        &mut store,
        ChoiceInsert {
            question_id: choice.question,
            text: choice.text,
        },
    )
    .await?;
    let choice = ChoiceCommon::get(&mut store, id).await?;
    store.commit().await?;
    Ok(choice)
}

pub async fn update_choice<T>(mut store: T, id: i32, patch: ChoicePatch) -> Result<Choice, Error>
where
    T: TxStore,
{
    validate_optional_text("text", patch.text.as_deref(), CHOICE_TEXT_MAX_LEN)?;
    ChoiceCommon::get(&mut store, id).await?;
    if let Some(question_id) = patch.question {
        QuestionCommon::get(&mut store, question_id).await?;
    }
    ChoiceCommon::update(
        &mut store,
        id,
        ChoiceUpdate {
            question_id: patch.question,
            text: patch.text,
        },
    )
    .await?;
    let choice = ChoiceCommon::get(&mut store, id).await?;
    store.commit().await?;
    Ok(choice)
}

pub async fn delete_choice<T>(mut store: T, id: i32) -> Result<(), Error>
where
    T: TxStore,
{
    ChoiceCommon::get(&mut store, id).await?;
    ChoiceCommon::delete(&mut store, id).await?;
    store.commit().await?;
    Ok(())
}

pub async fn choice_detail<S>(store: &mut S, id: i32) -> Result<Choice, Error>
where
    S: Store,
{
    ChoiceCommon::get(store, id).await
}

pub async fn list_choices<S>(store: &mut S, question_id: Option<i32>, search: Option<String>, pagination: Pagination) -> Result<(Vec<Choice>, i64), Error>
where
    S: Store,
{
    let query = ChoiceQuery {
        question_id_in: question_id.map(|id| vec![id]),
        search,
    };
    let total = ChoiceCommon::count(store, &query).await?;
    let choices = ChoiceCommon::query(store, &query, Some(pagination)).await?;
    Ok((choices, total))
}
