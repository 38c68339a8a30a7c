use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookDto is a data transfer object for the Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
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

impl BookDto {
    pub fn new(title: &str, author: &str, category: &str, stock: i64) -> BookDto {
        BookDto::from(&BookEntity::new(title, author, category, stock))
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookDto {
    fn stock(&self) -> i64 {
        self.stock
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            category: other.category.to_string(),
            stock: other.stock,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            category: other.category.to_string(),
            stock: other.stock,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::Book;
    use crate::books::domain::model::BookEntity;
    use crate::books::dto::BookDto;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookDto::new("Dune", "Frank Herbert", "SciFi", 1);
        assert_eq!("Dune", book.title.as_str());
        assert_eq!("SciFi", book.category.as_str());
        assert!(book.is_available());
    }

    #[tokio::test]
    async fn test_should_convert_entity() {
        let mut entity = BookEntity::new("Dune", "Frank Herbert", "SciFi", 0);
        entity.book_id = 42;
        let dto = BookDto::from(&entity);
        assert_eq!(42, dto.book_id);
        assert!(!dto.is_available());
        assert_eq!(entity, BookEntity::from(&dto));
    }
}
