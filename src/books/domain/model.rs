use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::LibraryResult;
use crate::core::repository::{FieldValue, Row};
use crate::utils::date::{now, serializer};

// BookEntity is a catalog title; `stock` counts the copies currently on the shelf.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub stock: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(title: &str, author: &str, category: &str, stock: i64) -> Self {
        Self {
            book_id: 0,
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            stock,
            created_at: now(),
            updated_at: now(),
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookEntity {
    fn stock(&self) -> i64 {
        self.stock
    }
}

impl Row for BookEntity {
    const TABLE: &'static str = "books";
    const ID_FIELD: &'static str = "book_id";

    fn assign_id(&mut self, id: i64) {
        self.book_id = id;
    }

    fn field(&self, name: &str) -> LibraryResult<FieldValue> {
        match name {
            "book_id" => Ok(FieldValue::Int(self.book_id)),
            "title" => Ok(FieldValue::Text(self.title.to_string())),
            "author" => Ok(FieldValue::Text(self.author.to_string())),
            "category" => Ok(FieldValue::Text(self.category.to_string())),
            "stock" => Ok(FieldValue::Int(self.stock)),
            "created_at" => Ok(FieldValue::Timestamp(self.created_at)),
            "updated_at" => Ok(FieldValue::Timestamp(self.updated_at)),
            _ => Err(Self::unknown_field(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> LibraryResult<()> {
        match (name, value) {
            ("title", FieldValue::Text(s)) => self.title = s,
            ("author", FieldValue::Text(s)) => self.author = s,
            ("category", FieldValue::Text(s)) => self.category = s,
            ("stock", FieldValue::Int(n)) => self.stock = n,
            ("updated_at", FieldValue::Timestamp(t)) => self.updated_at = t,
            ("book_id" | "title" | "author" | "category" | "stock" | "created_at" | "updated_at", other) => {
                return Err(Self::type_mismatch(name, &other));
            }
            _ => return Err(Self::unknown_field(name)),
        }
        Ok(())
    }
}
