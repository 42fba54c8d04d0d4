use crate::actix_web::{
    http::StatusCode,
    web::{Data, Json, Path, Query},
    HttpResponse,
};
use crate::core::models::survey::{Survey, SurveyCreate, SurveyDetail, SurveyListItem, SurveyPatch, SurveyReplace};
use crate::core::ports::repository::Manager;
use crate::core::services::survey;
use crate::error::Error;
use crate::request::Pagination;
use crate::response::List;
use chrono::Utc;

pub async fn list<M>(Query(pagination): Query<Pagination>, manager: Data<M>) -> Result<Json<List<SurveyListItem>>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let surveys = survey::list_surveys(&mut db, pagination.page()).await?;
    Ok(Json(surveys.into()))
}

pub async fn detail<M>(survey_id: Path<(i32,)>, manager: Data<M>) -> Result<Json<SurveyDetail>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let detail = survey::survey_detail(&mut db, survey_id.into_inner().0).await?;
    Ok(Json(detail))
}

pub async fn create<M>(Json(body): Json<SurveyCreate>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let survey = survey::create_survey(tx, body, Utc::now()).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(survey))
}

pub async fn replace<M>(survey_id: Path<(i32,)>, Json(body): Json<SurveyReplace>, manager: Data<M>) -> Result<Json<Survey>, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let survey = survey::update_survey(tx, survey_id.into_inner().0, SurveyPatch::from(body), Utc::now()).await?;
    Ok(Json(survey))
}

pub async fn patch<M>(survey_id: Path<(i32,)>, Json(body): Json<SurveyPatch>, manager: Data<M>) -> Result<Json<Survey>, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let survey = survey::update_survey(tx, survey_id.into_inner().0, body, Utc::now()).await?;
    Ok(Json(survey))
}

pub async fn delete<M>(survey_id: Path<(i32,)>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    survey::delete_survey(tx, survey_id.into_inner().0).await?;
    Ok(HttpResponse::NoContent().finish())
}
