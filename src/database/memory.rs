//! In-process store used by the handler and service tests.
//!
//! `db()` works on the shared state directly. `tx()` works on a private copy
//! that replaces the shared state on commit and is discarded when the store is dropped uncommitted.

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
use chrono::Utc;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct State {
    surveys: Vec<Survey>,
    questions: Vec<Question>,
    choices: Vec<Choice>,
    answers: Vec<Answer>,
    users: Vec<User>,
    seqs: [i32; 5],
}

impl State {
    fn next_id(&mut self, table: usize) -> i32 {
        self.seqs[table] += 1;
        self.seqs[table]
    }

    fn cascade_question(&mut self, question_id: i32) {
        self.choices.retain(|c| c.question_id != question_id);
        self.answers.retain(|a| a.question_id != question_id);
    }
}

const SURVEYS: usize = 0;
const QUESTIONS: usize = 1;
const CHOICES: usize = 2;
const ANSWERS: usize = 3;
const USERS: usize = 4;

fn paginate<T>(items: Vec<T>, pagination: Option<Pagination>) -> Vec<T> {
    match pagination {
        Some(p) => p.apply(items),
        None => items,
    }
}

fn not_found(what: &str) -> Error {
    Error::NotFound(what.into())
}

fn duplicate() -> Error {
    Error::ValidationError("record already exists".into())
}

#[derive(Clone, Default)]
pub struct MemoryManager {
    state: Arc<Mutex<State>>,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryStore {
    shared: Arc<Mutex<State>>,
    snapshot: Option<State>,
}

impl MemoryStore {
    fn with<R>(&mut self, f: impl FnOnce(&mut State) -> R) -> R {
        match &mut self.snapshot {
            Some(state) => f(state),
            None => f(&mut *self.shared.lock().unwrap()),
        }
    }
}

fn survey_matches(s: &Survey, query: &SurveyQuery) -> bool {
    query.is_active_eq.map_or(true, |v| s.is_active == v)
}

impl SurveyCommon for MemoryStore {
    async fn insert(&mut self, survey: SurveyInsert) -> Result<i32, Error> {
        Ok(self.with(|st| {
            let id = st.next_id(SURVEYS);
            st.surveys.push(Survey {
                id,
                name: survey.name,
                description: survey.description,
                start_at: survey.start_at,
                end_at: survey.end_at,
                created_at: Utc::now(),
                is_active: survey.is_active,
            });
            id
        }))
    }

    async fn update(&mut self, id: i32, survey: SurveyUpdate) -> Result<(), Error> {
        self.with(|st| {
            let s = st.surveys.iter_mut().find(|s| s.id == id).ok_or_else(|| not_found("survey"))?;
            if let Some(name) = survey.name {
                s.name = name;
            }
            if let Some(description) = survey.description {
                s.description = description;
            }
            if let Some(start_at) = survey.start_at {
                s.start_at = start_at;
            }
            if let Some(end_at) = survey.end_at {
                s.end_at = end_at;
            }
            if let Some(is_active) = survey.is_active {
                s.is_active = is_active;
            }
            Ok(())
        })
    }

    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error> {
        let mut surveys: Vec<Survey> = self.with(|st| st.surveys.iter().filter(|s| survey_matches(s, query)).cloned().collect());
        surveys.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(surveys, pagination))
    }

    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error> {
        Ok(self.with(|st| st.surveys.iter().filter(|s| survey_matches(s, query)).count() as i64))
    }

    async fn get(&mut self, id: i32) -> Result<Survey, Error> {
        self.with(|st| st.surveys.iter().find(|s| s.id == id).cloned()).ok_or_else(|| not_found("survey"))
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.with(|st| {
            let before = st.surveys.len();
            st.surveys.retain(|s| s.id != id);
            if st.surveys.len() == before {
                return Err(not_found("survey"));
            }
            let question_ids: Vec<i32> = st.questions.iter().filter(|q| q.survey_id == id).map(|q| q.id).collect();
            st.questions.retain(|q| q.survey_id != id);
            for qid in question_ids {
                st.cascade_question(qid);
            }
            Ok(())
        })
    }
}

fn question_matches(q: &Question, query: &QuestionQuery) -> bool {
    query.id_in.as_ref().map_or(true, |ids| ids.contains(&q.id))
        && query.survey_id_eq.map_or(true, |sid| q.survey_id == sid)
        && query
            .search
            .as_ref()
            .map_or(true, |s| q.text.to_lowercase().contains(&s.to_lowercase()) || q.type_question.as_str() == s)
}

impl QuestionCommon for MemoryStore {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error> {
        self.with(|st| {
            if !st.surveys.iter().any(|s| s.id == question.survey_id) {
                return Err(not_found("referenced record"));
            }
            let id = st.next_id(QUESTIONS);
            st.questions.push(Question {
                id,
                text: question.text,
                type_question: question.type_question,
                survey_id: question.survey_id,
            });
            Ok(id)
        })
    }

    async fn update(&mut self, id: i32, question: QuestionUpdate) -> Result<(), Error> {
        self.with(|st| {
            if let Some(sid) = question.survey_id {
                if !st.surveys.iter().any(|s| s.id == sid) {
                    return Err(not_found("referenced record"));
                }
            }
            let q = st.questions.iter_mut().find(|q| q.id == id).ok_or_else(|| not_found("question"))?;
            if let Some(text) = question.text {
                q.text = text;
            }
            if let Some(type_question) = question.type_question {
                q.type_question = type_question;
            }
            if let Some(survey_id) = question.survey_id {
                q.survey_id = survey_id;
            }
            Ok(())
        })
    }

    async fn query(&mut self, query: &QuestionQuery, pagination: Option<Pagination>) -> Result<Vec<Question>, Error> {
        let mut questions: Vec<Question> = self.with(|st| st.questions.iter().filter(|q| question_matches(q, query)).cloned().collect());
        questions.sort_by(|a, b| b.survey_id.cmp(&a.survey_id).then(a.id.cmp(&b.id)));
        Ok(paginate(questions, pagination))
    }

    async fn count(&mut self, query: &QuestionQuery) -> Result<i64, Error> {
        Ok(self.with(|st| st.questions.iter().filter(|q| question_matches(q, query)).count() as i64))
    }

    async fn get(&mut self, id: i32) -> Result<Question, Error> {
        self.with(|st| st.questions.iter().find(|q| q.id == id).cloned()).ok_or_else(|| not_found("question"))
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.with(|st| {
            let before = st.questions.len();
            st.questions.retain(|q| q.id != id);
            if st.questions.len() == before {
                return Err(not_found("question"));
            }
            st.cascade_question(id);
            Ok(())
        })
    }
}

fn choice_matches(c: &Choice, query: &ChoiceQuery) -> bool {
    query.question_id_in.as_ref().map_or(true, |ids| ids.contains(&c.question_id))
        && query.search.as_ref().map_or(true, |s| c.text.to_lowercase().contains(&s.to_lowercase()))
}

impl ChoiceCommon for MemoryStore {
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i32, Error> {
        self.with(|st| {
            if !st.questions.iter().any(|q| q.id == choice.question_id) {
                return Err(not_found("referenced record"));
            }
            let id = st.next_id(CHOICES);
            st.choices.push(Choice {
                id,
                question_id: choice.question_id,
                text: choice.text,
            });
            Ok(id)
        })
    }

    async fn update(&mut self, id: i32, choice: ChoiceUpdate) -> Result<(), Error> {
        self.with(|st| {
            if let Some(qid) = choice.question_id {
                if !st.questions.iter().any(|q| q.id == qid) {
                    return Err(not_found("referenced record"));
                }
            }
            let c = st.choices.iter_mut().find(|c| c.id == id).ok_or_else(|| not_found("choice"))?;
            if let Some(question_id) = choice.question_id {
                c.question_id = question_id;
            }
            if let Some(text) = choice.text {
                c.text = text;
            }
            Ok(())
        })
    }

    async fn query(&mut self, query: &ChoiceQuery, pagination: Option<Pagination>) -> Result<Vec<Choice>, Error> {
        let mut choices: Vec<Choice> = self.with(|st| st.choices.iter().filter(|c| choice_matches(c, query)).cloned().collect());
        choices.sort_by(|a, b| b.question_id.cmp(&a.question_id).then(a.id.cmp(&b.id)));
        Ok(paginate(choices, pagination))
    }

    async fn count(&mut self, query: &ChoiceQuery) -> Result<i64, Error> {
        Ok(self.with(|st| st.choices.iter().filter(|c| choice_matches(c, query)).count() as i64))
    }

    async fn get(&mut self, id: i32) -> Result<Choice, Error> {
        self.with(|st| st.choices.iter().find(|c| c.id == id).cloned()).ok_or_else(|| not_found("choice"))
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.with(|st| {
            let before = st.choices.len();
            st.choices.retain(|c| c.id != id);
            if st.choices.len() == before {
                return Err(not_found("choice"));
            }
            Ok(())
        })
    }
}

fn answer_matches(a: &Answer, query: &AnswerQuery) -> bool {
    query.user_id_eq.map_or(true, |uid| a.user_id == Some(uid)) && query.anonymous_id_eq.map_or(true, |aid| a.anonymous_id == Some(aid))
}

impl AnswerCommon for MemoryStore {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i32, Error> {
        let user_id = answer.user_id();
        let anonymous_id = answer.anonymous_id();
        self.with(|st| {
            if !st.questions.iter().any(|q| q.id == answer.question_id) {
                return Err(not_found("referenced record"));
            }
            if st
                .answers
                .iter()
                .any(|a| a.answer == answer.answer && a.question_id == answer.question_id && a.user_id == user_id && a.anonymous_id == anonymous_id)
            {
                return Err(duplicate());
            }
            let id = st.next_id(ANSWERS);
            st.answers.push(Answer {
                id,
                user_id,
                anonymous_id,
                question_id: answer.question_id,
                answer: answer.answer,
                submit_time: Utc::now(),
            });
            Ok(id)
        })
    }

    async fn query(&mut self, query: &AnswerQuery, pagination: Option<Pagination>) -> Result<Vec<Answer>, Error> {
        let mut answers: Vec<Answer> = self.with(|st| st.answers.iter().filter(|a| answer_matches(a, query)).cloned().collect());
        answers.sort_by(|a, b| b.submit_time.cmp(&a.submit_time).then(b.id.cmp(&a.id)));
        Ok(paginate(answers, pagination))
    }

    async fn count(&mut self, query: &AnswerQuery) -> Result<i64, Error> {
        Ok(self.with(|st| st.answers.iter().filter(|a| answer_matches(a, query)).count() as i64))
    }

    async fn get(&mut self, id: i32) -> Result<Answer, Error> {
        self.with(|st| st.answers.iter().find(|a| a.id == id).cloned()).ok_or_else(|| not_found("answer"))
    }
}

impl UserCommon for MemoryStore {
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error> {
        self.with(|st| {
            if st.users.iter().any(|u| u.username == user.username) {
                return Err(duplicate());
            }
            let id = st.next_id(USERS);
            st.users.push(User {
                id,
                username: user.username,
                password: user.password,
                salt: user.salt,
                is_staff: user.is_staff,
            });
            Ok(id)
        })
    }

    async fn get_by_username(&mut self, username: &str) -> Result<Option<User>, Error> {
        Ok(self.with(|st| st.users.iter().find(|u| u.username == username).cloned()))
    }

    async fn set_staff(&mut self, id: i32, is_staff: bool) -> Result<(), Error> {
        self.with(|st| {
            let u = st.users.iter_mut().find(|u| u.id == id).ok_or_else(|| not_found("user"))?;
            u.is_staff = is_staff;
            Ok(())
        })
    }
}

impl Common for MemoryStore {}
impl Store for MemoryStore {}

impl TxStore for MemoryStore {
    async fn commit(self) -> Result<(), Error> {
        if let Some(state) = self.snapshot {
            *self.shared.lock().unwrap() = state;
        }
        Ok(())
    }
}

impl Manager for MemoryManager {
    type Store = MemoryStore;
    type TxStore = MemoryStore;

    async fn db(&self) -> Result<Self::Store, Error> {
        Ok(MemoryStore {
            shared: self.state.clone(),
            snapshot: None,
        })
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let snapshot = self.state.lock().unwrap().clone();
        Ok(MemoryStore {
            shared: self.state.clone(),
            snapshot: Some(snapshot),
        })
    }
}
