use crate::serde::Serialize;

#[derive(Debug, Serialize)]
pub struct List<T> {
    list: Vec<T>,
    total: i64,
}

impl<T> List<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        List { list, total }
    }
}

impl<T> From<(Vec<T>, i64)> for List<T> {
    fn from((list, total): (Vec<T>, i64)) -> Self {
        List::new(list, total)
    }
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: i32,
}

/// Entry points advertised by the API roots, keyed by name.
#[derive(Debug, Serialize)]
pub struct Root(pub std::collections::BTreeMap<&'static str, &'static str>);
