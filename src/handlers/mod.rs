pub mod answer;
pub mod choice;
pub mod question;
pub mod root;
pub mod survey;
pub mod user;


use crate::actix_web::web::{delete, get, patch, post, put, resource, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use crate::core::access::Rule;
use crate::core::ports::repository::Manager;
use crate::error::Error;
use crate::middlewares::authorizer::Author;

/// Registers every resource of the API, backed by the store manager `M`.
pub fn configure<M>(cfg: &mut ServiceConfig)
where
    M: Manager + 'static,
{
    cfg.app_data(JsonConfig::default().error_handler(|err, _| Error::ValidationError(err.to_string()).into()))
        .app_data(QueryConfig::default().error_handler(|err, _| Error::ValidationError(err.to_string()).into()))
        .app_data(PathConfig::default().error_handler(|_, req| Error::NotFound(req.path().to_owned()).into()))
        .service(resource("/").route(get().to(root::api_root)))
        .service(resource("/admin").route(get().to(root::admin_root)).wrap(Author::new(Rule::AdminOnly)))
        .service(resource("/signup").route(post().to(user::signup::<M>)))
        .service(resource("/login").route(post().to(user::login::<M>)))
        .service(
            resource("/surveys")
                .route(get().to(survey::list::<M>))
                .route(post().to(survey::create::<M>))
                .wrap(Author::new(Rule::AdminWriteElseReadOnly)),
        )
        .service(
            resource("/surveys/{id}")
                .route(get().to(survey::detail::<M>))
                .route(put().to(survey::replace::<M>))
                .route(patch().to(survey::patch::<M>))
                .route(delete().to(survey::delete::<M>))
                .wrap(Author::new(Rule::AdminWriteElseReadOnly)),
        )
        .service(
            resource("/surveys/{survey_id}/{question_id}")
                .route(get().to(answer::prompt::<M>))
                .route(post().to(answer::submit::<M>)),
        )
        .service(
            resource("/questions")
                .route(get().to(question::list::<M>))
                .route(post().to(question::create::<M>))
                .wrap(Author::new(Rule::AdminOnly)),
        )
        .service(
            resource("/questions/{id}")
                .route(get().to(question::detail::<M>))
                .route(put().to(question::replace::<M>))
                .route(patch().to(question::patch::<M>))
                .route(delete().to(question::delete::<M>))
                .wrap(Author::new(Rule::AdminOnly)),
        )
        .service(
            resource("/choices")
                .route(get().to(choice::list::<M>))
                .route(post().to(choice::create::<M>))
                .wrap(Author::new(Rule::AdminOnly)),
        )
        .service(
            resource("/choices/{id}")
                .route(get().to(choice::detail::<M>))
                .route(put().to(choice::replace::<M>))
                .route(patch().to(choice::patch::<M>))
                .route(delete().to(choice::delete::<M>))
                .wrap(Author::new(Rule::AdminOnly)),
        )
        .service(
            resource("/users/{id}/answers")
                .route(get().to(answer::user_answers::<M>))
                .wrap(Author::new(Rule::AdminOrSelf).target("id")),
        )
        .service(
            resource("/anonymous/{id}/answers")
                .route(get().to(answer::anonymous_answers::<M>))
                .wrap(Author::new(Rule::AdminOnly)),
        );
}
