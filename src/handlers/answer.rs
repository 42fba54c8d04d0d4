use crate::actix_web::{
    http::StatusCode,
    web::{Data, Json, Path, Query},
    HttpResponse,
};
use crate::context::UserInfo;
use crate::core::models::answer::{AnswerItem, AnswerPrompt, Submit};
use crate::core::ports::repository::Manager;
use crate::core::services::answer;
use crate::error::Error;
use crate::request::Pagination;
use crate::response::List;

pub async fn prompt<M>(ids: Path<(i32, i32)>, manager: Data<M>) -> Result<Json<AnswerPrompt>, Error>
where
    M: Manager + 'static,
{
    let (survey_id, question_id) = ids.into_inner();
    let mut db = manager.db().await?;
    let prompt = answer::prompt(&mut db, survey_id, question_id).await?;
    Ok(Json(prompt))
}

pub async fn submit<M>(user_info: Option<UserInfo>, ids: Path<(i32, i32)>, Json(body): Json<Submit>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let (survey_id, question_id) = ids.into_inner();
    let tx = manager.tx().await?;
    let stored = answer::submit(tx, survey_id, question_id, user_info.map(|u| u.id), body).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(stored))
}

pub async fn user_answers<M>(user_id: Path<(i32,)>, Query(pagination): Query<Pagination>, manager: Data<M>) -> Result<Json<List<AnswerItem>>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let answers = answer::user_answers(&mut db, user_id.into_inner().0, pagination.page()).await?;
    Ok(Json(answers.into()))
}

pub async fn anonymous_answers<M>(anonymous_id: Path<(i32,)>, Query(pagination): Query<Pagination>, manager: Data<M>) -> Result<Json<List<AnswerItem>>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let answers = answer::anonymous_answers(&mut db, anonymous_id.into_inner().0, pagination.page()).await?;
    Ok(Json(answers.into()))
}
