use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;
use crate::utils::date::DATE_FMT;

// Page size used when a caller wants every matching row.
pub const SCAN_PAGE_SIZE: usize = 200;

// FieldValue is a single column value as seen by the storage gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Timestamp(NaiveDateTime),
    Null,
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Timestamp(t) => write!(f, "{}", t.format(DATE_FMT)),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(t: NaiveDateTime) -> Self {
        FieldValue::Timestamp(t)
    }
}

impl From<Option<NaiveDateTime>> for FieldValue {
    fn from(t: Option<NaiveDateTime>) -> Self {
        t.map(FieldValue::Timestamp).unwrap_or(FieldValue::Null)
    }
}

pub type Fields = BTreeMap<String, FieldValue>;

pub fn fields<const N: usize>(pairs: [(&str, FieldValue); N]) -> Fields {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

// Filter predicates; a query matches rows satisfying all of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(String, FieldValue),
    // case-insensitive substring match on a text column
    ILike(String, String),
    IsNull(String),
}

impl Predicate {
    pub fn equals<V: Into<FieldValue>>(field: &str, value: V) -> Self {
        Predicate::Equals(field.to_string(), value.into())
    }

    pub fn ilike(field: &str, term: &str) -> Self {
        Predicate::ILike(field.to_string(), term.to_string())
    }

    pub fn is_null(field: &str) -> Self {
        Predicate::IsNull(field.to_string())
    }

    pub fn matches<E: Row>(&self, row: &E) -> LibraryResult<bool> {
        match self {
            Predicate::Equals(field, expected) => {
                Ok(row.field(field)? == *expected)
            }
            Predicate::ILike(field, term) => {
                match row.field(field)? {
                    FieldValue::Text(value) => Ok(value.to_lowercase().contains(term.to_lowercase().as_str())),
                    _ => Ok(false),
                }
            }
            Predicate::IsNull(field) => {
                Ok(row.field(field)? == FieldValue::Null)
            }
        }
    }
}

pub fn matches_all<E: Row>(predicates: &[Predicate], row: &E) -> LibraryResult<bool> {
    for predicate in predicates {
        if !predicate.matches(row)? {
            return Ok(false);
        }
    }
    Ok(true)
}

// Row maps a typed entity onto the named columns of its table.
pub trait Row: Identifiable + Serialize + DeserializeOwned + Clone + 'static {
    const TABLE: &'static str;
    const ID_FIELD: &'static str;

    fn assign_id(&mut self, id: i64);

    fn field(&self, name: &str) -> LibraryResult<FieldValue>;

    fn set_field(&mut self, name: &str, value: FieldValue) -> LibraryResult<()>;

    fn unknown_field(name: &str) -> LibraryError {
        LibraryError::validation(format!("unknown field {} on {}", name, Self::TABLE).as_str(), Some("400".to_string()))
    }

    fn type_mismatch(name: &str, value: &FieldValue) -> LibraryError {
        LibraryError::validation(format!("invalid value {:?} for {}.{}", value, Self::TABLE, name).as_str(), Some("400".to_string()))
    }

    // applies all changes or none of them
    fn apply(&self, changes: &Fields) -> LibraryResult<Self> {
        let mut updated = self.clone();
        for (name, value) in changes {
            updated.set_field(name, value.clone())?;
        }
        Ok(updated)
    }

    fn satisfies(&self, expected: &Fields) -> LibraryResult<bool> {
        for (name, value) in expected {
            if self.field(name)? != *value {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum UpdateOutcome {
    Updated,
    // the row is missing or its current values did not match the expectation
    NoChange,
}

#[async_trait]
pub trait Repository<Entity: Row>: Sync + Send {
    // create an entity, the store assigns its id
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // sets the given fields, optionally only if the current values match `expected`
    async fn update(&self, id: i64, changes: &Fields, expected: Option<&Fields>) -> LibraryResult<UpdateOutcome>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    // find rows matching all predicates; `page` is the token returned by the previous page
    async fn query(&self, predicates: &[Predicate],
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;

    async fn query_all(&self, predicates: &[Predicate]) -> LibraryResult<Vec<Entity>> {
        let mut records = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.query(predicates, next_page.as_deref(), SCAN_PAGE_SIZE).await?;
            records.extend(res.records);
            match res.next_page {
                Some(page) => next_page = Some(page),
                None => break,
            }
        }
        Ok(records)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia {
        match self {
            RepositoryStore::DynamoDB => { GatewayPublisherVia::Sns }
            RepositoryStore::LocalDynamoDB => { GatewayPublisherVia::LocalDynamoDB }
            RepositoryStore::Memory => { GatewayPublisherVia::Logs }
        }
    }
}
