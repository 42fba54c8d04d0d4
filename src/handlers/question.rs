use crate::actix_web::{
    http::StatusCode,
    web::{Data, Json, Path, Query},
    HttpResponse,
};
use crate::core::models::question::{Question, QuestionCreate, QuestionDetail, QuestionItem, QuestionPatch};
use crate::core::ports::repository::Manager;
use crate::core::services::question;
use crate::error::Error;
use crate::request::Search;
use crate::response::List;

pub async fn list<M>(Query(search): Query<Search>, manager: Data<M>) -> Result<Json<List<QuestionItem>>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let page = search.page();
    let questions = question::list_questions(&mut db, search.search, page).await?;
    Ok(Json(questions.into()))
}

pub async fn detail<M>(question_id: Path<(i32,)>, manager: Data<M>) -> Result<Json<QuestionDetail>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let detail = question::question_detail(&mut db, question_id.into_inner().0).await?;
    Ok(Json(detail))
}

pub async fn create<M>(Json(body): Json<QuestionCreate>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let question = question::create_question(tx, body).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(question))
}

pub async fn replace<M>(question_id: Path<(i32,)>, Json(body): Json<QuestionCreate>, manager: Data<M>) -> Result<Json<Question>, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let question = question::update_question(tx, question_id.into_inner().0, QuestionPatch::from(body)).await?;
    Ok(Json(question))
}

pub async fn patch<M>(question_id: Path<(i32,)>, Json(body): Json<QuestionPatch>, manager: Data<M>) -> Result<Json<Question>, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let question = question::update_question(tx, question_id.into_inner().0, body).await?;
    Ok(Json(question))
}

pub async fn delete<M>(question_id: Path<(i32,)>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    question::delete_question(tx, question_id.into_inner().0).await?;
    Ok(HttpResponse::NoContent().finish())
}
