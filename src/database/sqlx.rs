use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    choice::{Choice, Insert as ChoiceInsert, Query as ChoiceQuery, Update as ChoiceUpdate},
    common::Pagination,
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question, Update as QuestionUpdate},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, Update as SurveyUpdate},
    user::{Insert as UserInsert, User},
};
use crate::core::ports::repository::{AnswerCommon, ChoiceCommon, Common, Manager, QuestionCommon, Store, SurveyCommon, TxStore, UserCommon};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgConnection;
use sqlx::{query, query_as, query_scalar, PgPool, Postgres, QueryBuilder, Transaction};
use std::ops::DerefMut;

pub struct PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

fn like(s: &str) -> String {
    format!("%{}%", s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_"))
}

fn push_pagination(stmt: &mut QueryBuilder<'_, Postgres>, pagination: Option<Pagination>) {
    if let Some(p) = pagination {
        stmt.push(" LIMIT ").push_bind(p.limit());
        stmt.push(" OFFSET ").push_bind(p.offset());
    }
}

fn ensure_affected(rows: u64, what: &str) -> Result<(), Error> {
    if rows == 0 {
        return Err(Error::NotFound(what.into()));
    }
    Ok(())
}

fn push_survey_filter(stmt: &mut QueryBuilder<'_, Postgres>, query: &SurveyQuery) {
    stmt.push(" WHERE 1 = 1");
    if let Some(is_active) = query.is_active_eq {
        stmt.push(" AND is_active = ").push_bind(is_active);
    }
}

impl<E> SurveyCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, survey: SurveyInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO surveys (name, description, start_at, end_at, is_active) VALUES ($1, $2, $3, $4, $5) RETURNING id")
            .bind(survey.name)
            .bind(survey.description)
            .bind(survey.start_at)
            .bind(survey.end_at)
            .bind(survey.is_active)
            .fetch_one(&mut *self.executor)
            .await?;
        Ok(id)
    }

    async fn update(&mut self, id: i32, survey: SurveyUpdate) -> Result<(), Error> {
        let res = query(
            "UPDATE surveys SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                start_at = COALESCE($3, start_at),
                end_at = COALESCE($4, end_at),
                is_active = COALESCE($5, is_active)
            WHERE id = $6",
        )
        .bind(survey.name)
        .bind(survey.description)
        .bind(survey.start_at)
        .bind(survey.end_at)
        .bind(survey.is_active)
        .bind(id)
        .execute(&mut *self.executor)
        .await?;
        ensure_affected(res.rows_affected(), "survey")
    }

    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM surveys");
        push_survey_filter(&mut stmt, query);
        stmt.push(" ORDER BY created_at DESC, id DESC");
        push_pagination(&mut stmt, pagination);
        let surveys = stmt.build_query_as().fetch_all(&mut *self.executor).await?;
        Ok(surveys)
    }

    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error> {
        let mut stmt = QueryBuilder::new("SELECT COUNT(*) FROM surveys");
        push_survey_filter(&mut stmt, query);
        let (n,): (i64,) = stmt.build_query_as().fetch_one(&mut *self.executor).await?;
        Ok(n)
    }

    async fn get(&mut self, id: i32) -> Result<Survey, Error> {
        query_as("SELECT * FROM surveys WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.executor)
            .await?
            .ok_or_else(|| Error::NotFound("survey".into()))
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        let res = query("DELETE FROM surveys WHERE id = $1").bind(id).execute(&mut *self.executor).await?;
        ensure_affected(res.rows_affected(), "survey")
    }
}

fn push_question_filter(stmt: &mut QueryBuilder<'_, Postgres>, query: &QuestionQuery) {
    stmt.push(" WHERE 1 = 1");
    if let Some(ids) = &query.id_in {
        stmt.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
    }
    if let Some(survey_id) = query.survey_id_eq {
        stmt.push(" AND survey_id = ").push_bind(survey_id);
    }
    if let Some(search) = &query.search {
        stmt.push(" AND (text ILIKE ")
            .push_bind(like(search))
            .push(" OR type_question::text = ")
            .push_bind(search.clone())
            .push(")");
    }
}

impl<E> QuestionCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO questions (text, type_question, survey_id) VALUES ($1, $2, $3) RETURNING id")
            .bind(question.text)
            .bind(question.type_question)
            .bind(question.survey_id)
            .fetch_one(&mut *self.executor)
            .await?;
        Ok(id)
    }

    async fn update(&mut self, id: i32, question: QuestionUpdate) -> Result<(), Error> {
        let res = query(
            "UPDATE questions SET
                text = COALESCE($1, text),
                type_question = COALESCE($2, type_question),
                survey_id = COALESCE($3, survey_id)
            WHERE id = $4",
        )
        .bind(question.text)
        .bind(question.type_question)
        .bind(question.survey_id)
        .bind(id)
        .execute(&mut *self.executor)
        .await?;
        ensure_affected(res.rows_affected(), "question")
    }

    async fn query(&mut self, query: &QuestionQuery, pagination: Option<Pagination>) -> Result<Vec<Question>, Error> {
        let mut stmt = QueryBuilder::new("SELECT id, text, type_question, survey_id FROM questions");
        push_question_filter(&mut stmt, query);
        stmt.push(" ORDER BY survey_id DESC, id");
        push_pagination(&mut stmt, pagination);
        let questions = stmt.build_query_as().fetch_all(&mut *self.executor).await?;
        Ok(questions)
    }

    async fn count(&mut self, query: &QuestionQuery) -> Result<i64, Error> {
        let mut stmt = QueryBuilder::new("SELECT COUNT(*) FROM questions");
        push_question_filter(&mut stmt, query);
        let (n,): (i64,) = stmt.build_query_as().fetch_one(&mut *self.executor).await?;
        Ok(n)
    }

    async fn get(&mut self, id: i32) -> Result<Question, Error> {
        query_as("SELECT id, text, type_question, survey_id FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.executor)
            .await?
            .ok_or_else(|| Error::NotFound("question".into()))
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        let res = query("DELETE FROM questions WHERE id = $1").bind(id).execute(&mut *self.executor).await?;
        ensure_affected(res.rows_affected(), "question")
    }
}

fn push_choice_filter(stmt: &mut QueryBuilder<'_, Postgres>, query: &ChoiceQuery) {
    stmt.push(" WHERE 1 = 1");
    if let Some(ids) = &query.question_id_in {
        stmt.push(" AND question_id = ANY(").push_bind(ids.clone()).push(")");
    }
    if let Some(search) = &query.search {
        stmt.push(" AND text ILIKE ").push_bind(like(search));
    }
}

impl<E> ChoiceCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO choices (question_id, text) VALUES ($1, $2) RETURNING id")
            .bind(choice.question_id)
            .bind(choice.text)
            .fetch_one(&mut *self.executor)
            .await?;
        Ok(id)
    }

    async fn update(&mut self, id: i32, choice: ChoiceUpdate) -> Result<(), Error> {
        let res = query("UPDATE choices SET question_id = COALESCE($1, question_id), text = COALESCE($2, text) WHERE id = $3")
            .bind(choice.question_id)
            .bind(choice.text)
            .bind(id)
            .execute(&mut *self.executor)
            .await?;
        ensure_affected(res.rows_affected(), "choice")
    }

    async fn query(&mut self, query: &ChoiceQuery, pagination: Option<Pagination>) -> Result<Vec<Choice>, Error> {
        let mut stmt = QueryBuilder::new("SELECT id, question_id, text FROM choices");
        push_choice_filter(&mut stmt, query);
        stmt.push(" ORDER BY question_id DESC, id");
        push_pagination(&mut stmt, pagination);
        let choices = stmt.build_query_as().fetch_all(&mut *self.executor).await?;
        Ok(choices)
    }

    async fn count(&mut self, query: &ChoiceQuery) -> Result<i64, Error> {
        let mut stmt = QueryBuilder::new("SELECT COUNT(*) FROM choices");
        push_choice_filter(&mut stmt, query);
        let (n,): (i64,) = stmt.build_query_as().fetch_one(&mut *self.executor).await?;
        Ok(n)
    }

    async fn get(&mut self, id: i32) -> Result<Choice, Error> {
        query_as("SELECT id, question_id, text FROM choices WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.executor)
            .await?
            .ok_or_else(|| Error::NotFound("choice".into()))
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        let res = query("DELETE FROM choices WHERE id = $1").bind(id).execute(&mut *self.executor).await?;
        ensure_affected(res.rows_affected(), "choice")
    }
}

fn push_answer_filter(stmt: &mut QueryBuilder<'_, Postgres>, query: &AnswerQuery) {
    stmt.push(" WHERE 1 = 1");
    if let Some(uid) = query.user_id_eq {
        stmt.push(" AND user_id = ").push_bind(uid);
    }
    if let Some(aid) = query.anonymous_id_eq {
        stmt.push(" AND anonymous_id = ").push_bind(aid);
    }
}

impl<E> AnswerCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO answers (user_id, anonymous_id, question_id, answer) VALUES ($1, $2, $3, $4) RETURNING id")
            .bind(answer.user_id())
            .bind(answer.anonymous_id())
            .bind(answer.question_id)
            .bind(answer.answer)
            .fetch_one(&mut *self.executor)
            .await?;
        Ok(id)
    }

    async fn query(&mut self, query: &AnswerQuery, pagination: Option<Pagination>) -> Result<Vec<Answer>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM answers");
        push_answer_filter(&mut stmt, query);
        stmt.push(" ORDER BY submit_time DESC, id DESC");
        push_pagination(&mut stmt, pagination);
        let answers = stmt.build_query_as().fetch_all(&mut *self.executor).await?;
        Ok(answers)
    }

    async fn count(&mut self, query: &AnswerQuery) -> Result<i64, Error> {
        let mut stmt = QueryBuilder::new("SELECT COUNT(*) FROM answers");
        push_answer_filter(&mut stmt, query);
        let (n,): (i64,) = stmt.build_query_as().fetch_one(&mut *self.executor).await?;
        Ok(n)
    }

    async fn get(&mut self, id: i32) -> Result<Answer, Error> {
        query_as("SELECT * FROM answers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.executor)
            .await?
            .ok_or_else(|| Error::NotFound("answer".into()))
    }
}

impl<E> UserCommon for PgSqlx<E>
where
    E: DerefMut<Target = PgConnection>,
{
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO users (username, password, salt, is_staff) VALUES ($1, $2, $3, $4) RETURNING id")
            .bind(user.username)
            .bind(user.password)
            .bind(user.salt)
            .bind(user.is_staff)
            .fetch_one(&mut *self.executor)
            .await?;
        Ok(id)
    }

    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *self.executor)
            .await?;
        Ok(user)
    }

    async fn set_staff(&mut self, id: i32, is_staff: bool) -> Result<(), Error> {
        let res = query("UPDATE users SET is_staff = $1 WHERE id = $2")
            .bind(is_staff)
            .bind(id)
            .execute(&mut *self.executor)
            .await?;
        ensure_affected(res.rows_affected(), "user")
    }
}

impl Common for PgSqlx<PoolConnection<Postgres>> {}
impl Common for PgSqlx<Transaction<'static, Postgres>> {}
impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl Store for PgSqlx<Transaction<'static, Postgres>> {}

impl TxStore for PgSqlx<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type TxStore = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }
}
