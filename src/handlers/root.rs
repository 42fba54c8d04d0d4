use crate::actix_web::web::Json;
use crate::response::Root;

pub async fn api_root() -> Json<Root> {
    Json(Root(
        [("surveys", "/surveys"), ("signup", "/signup"), ("login", "/login"), ("admin", "/admin")]
            .into_iter()
            .collect(),
    ))
}

pub async fn admin_root() -> Json<Root> {
    Json(Root(
        [("surveys", "/surveys"), ("questions", "/questions"), ("choices", "/choices"), ("anonymous_answers", "/anonymous/{id}/answers"), ("user_answers", "/users/{id}/answers")]
            .into_iter()
            .collect(),
    ))
}
