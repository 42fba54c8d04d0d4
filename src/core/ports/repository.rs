use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    choice::{Choice, Insert as ChoiceInsert, Query as ChoiceQuery, Update as ChoiceUpdate},
    common::Pagination,
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question, Update as QuestionUpdate},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, Update as SurveyUpdate},
    user::{Insert as UserInsert, User},
};
use crate::error::Error;

// Lookups by id fail with `Error::NotFound` when the row is absent.

pub trait SurveyCommon {
    async fn insert(&mut self, survey: SurveyInsert) -> Result<i32, Error>;
    async fn update(&mut self, id: i32, survey: SurveyUpdate) -> Result<(), Error>;
    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error>;
    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error>;
    async fn get(&mut self, id: i32) -> Result<Survey, Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
}

pub trait QuestionCommon {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error>;
    async fn update(&mut self, id: i32, question: QuestionUpdate) -> Result<(), Error>;
    async fn query(&mut self, query: &QuestionQuery, pagination: Option<Pagination>) -> Result<Vec<Question>, Error>;
    async fn count(&mut self, query: &QuestionQuery) -> Result<i64, Error>;
    async fn get(&mut self, id: i32) -> Result<Question, Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
}

pub trait ChoiceCommon {
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i32, Error>;
    async fn update(&mut self, id: i32, choice: ChoiceUpdate) -> Result<(), Error>;
    async fn query(&mut self, query: &ChoiceQuery, pagination: Option<Pagination>) -> Result<Vec<Choice>, Error>;
    async fn count(&mut self, query: &ChoiceQuery) -> Result<i64, Error>;
    async fn get(&mut self, id: i32) -> Result<Choice, Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
}

pub trait AnswerCommon {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error>;
    async fn query(&mut self, query: &AnswerQuery, pagination: Option<Pagination>) -> Result<Vec<Answer>, Error>;
    async fn count(&mut self, query: &AnswerQuery) -> Result<i64, Error>;
    async fn get(&mut self, id: i32) -> Result<Answer, Error>;
}

pub trait UserCommon {
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error>;
    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error>;
    async fn set_staff(&mut self, id: i32, is_staff: bool) -> Result<(), Error>;
}

pub trait Common: SurveyCommon + QuestionCommon + ChoiceCommon + AnswerCommon + UserCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    /// Dropping an uncommitted store discards its writes.
    async fn commit(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type TxStore: TxStore;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
