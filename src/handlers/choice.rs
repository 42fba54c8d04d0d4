use crate::actix_web::{
    http::StatusCode,
    web::{Data, Json, Path, Query},
    HttpResponse,
};
use crate::core::models::choice::{Choice, ChoiceCreate, ChoicePatch};
use crate::core::ports::repository::Manager;
use crate::core::services::choice;
use crate::error::Error;
use crate::request::ChoiceSearch;
use crate::response::List;

pub async fn list<M>(Query(search): Query<ChoiceSearch>, manager: Data<M>) -> Result<Json<List<Choice>>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let page = search.page();
    let choices = choice::list_choices(&mut db, search.question, search.search, page).await?;
    Ok(Json(choices.into()))
}

pub async fn detail<M>(choice_id: Path<(i32,)>, manager: Data<M>) -> Result<Json<Choice>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let choice = choice::choice_detail(&mut db, choice_id.into_inner().0).await?;
    Ok(Json(choice))
}

pub async fn create<M>(Json(body): Json<ChoiceCreate>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let choice = choice::create_choice(tx, body).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(choice))
}

pub async fn replace<M>(choice_id: Path<(i32,)>, Json(body): Json<ChoiceCreate>, manager: Data<M>) -> Result<Json<Choice>, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let choice = choice::update_choice(tx, choice_id.into_inner().0, ChoicePatch::from(body)).await?;
    Ok(Json(choice))
}

pub async fn patch<M>(choice_id: Path<(i32,)>, Json(body): Json<ChoicePatch>, manager: Data<M>) -> Result<Json<Choice>, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let choice = choice::update_choice(tx, choice_id.into_inner().0, body).await?;
    Ok(Json(choice))
}

pub async fn delete<M>(choice_id: Path<(i32,)>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    choice::delete_choice(tx, choice_id.into_inner().0).await?;
    Ok(HttpResponse::NoContent().finish())
}
