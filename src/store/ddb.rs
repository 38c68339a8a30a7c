use std::cmp;
use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use tracing::debug;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{matches_all, FieldValue, Fields, Predicate, Repository, Row, UpdateOutcome};
use crate::utils::ddb::{field_to_attribute, item_to_value, parse_item, parse_number_attribute, SEQUENCE_KEY};

// DDBRepository stores one entity table in DynamoDB. Ids come from an atomic
// counter kept in the sequences table, one counter per entity table.
#[derive(Debug)]
pub struct DDBRepository<E: Row> {
    client: Client,
    table_name: String,
    sequence_table: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Row> DDBRepository<E> {
    pub(crate) fn new(client: Client, table_name: &str, sequence_table: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            sequence_table: sequence_table.to_string(),
            _entity: PhantomData,
        }
    }

    async fn next_id(&self) -> LibraryResult<i64> {
        let res = self.client
            .update_item()
            .table_name(self.sequence_table.as_str())
            .key(SEQUENCE_KEY, AttributeValue::S(self.table_name.to_string()))
            .update_expression("ADD next_id :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await?;
        res.attributes()
            .and_then(|attrs| parse_number_attribute("next_id", attrs))
            .ok_or_else(|| LibraryError::internal(
                format!("no id allocated for {}", self.table_name).as_str(), None))
    }

    fn id_key(id: i64) -> AttributeValue {
        AttributeValue::N(id.to_string())
    }
}

#[async_trait]
impl<E: Row> Repository<E> for DDBRepository<E> {
    async fn create(&self, entity: &E) -> LibraryResult<E> {
        let id = self.next_id().await?;
        let mut row = entity.clone();
        row.assign_id(id);
        let val = serde_json::to_value(&row)?;
        let res = self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", E::ID_FIELD)
            .set_item(Some(parse_item(val)?))
            .send()
            .await;
        match res {
            Ok(_) => {
                debug!(table = E::TABLE, id, "inserted row");
                Ok(row)
            }
            Err(SdkError::ServiceError(ref ctx)) if matches!(ctx.err(), PutItemError::ConditionalCheckFailedException(_)) => {
                Err(LibraryError::internal(format!("duplicate {} id {}", E::TABLE, id).as_str(), None))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn update(&self, id: i64, changes: &Fields, expected: Option<&Fields>) -> LibraryResult<UpdateOutcome> {
        if changes.is_empty() {
            return Err(LibraryError::validation(
                format!("no changes given for {} {}", E::TABLE, id).as_str(), Some("400".to_string())));
        }
        let mut request = self.client
            .update_item()
            .table_name(self.table_name.as_str())
            .key(E::ID_FIELD, Self::id_key(id))
            .expression_attribute_names("#pk", E::ID_FIELD);

        let mut assignments = vec![];
        for (i, (name, value)) in changes.iter().enumerate() {
            assignments.push(format!("#s{} = :s{}", i, i));
            request = request
                .expression_attribute_names(format!("#s{}", i), name)
                .expression_attribute_values(format!(":s{}", i), field_to_attribute(value));
        }

        let mut conditions = vec!["attribute_exists(#pk)".to_string()];
        for (i, (name, value)) in expected.into_iter().flatten().enumerate() {
            request = request.expression_attribute_names(format!("#e{}", i), name);
            match value {
                FieldValue::Null => {
                    conditions.push(format!("(attribute_not_exists(#e{}) OR attribute_type(#e{}, :e{}))", i, i, i));
                    request = request.expression_attribute_values(format!(":e{}", i), AttributeValue::S("NULL".to_string()));
                }
                other => {
                    conditions.push(format!("#e{} = :e{}", i, i));
                    request = request.expression_attribute_values(format!(":e{}", i), field_to_attribute(other));
                }
            }
        }

        let res = request
            .update_expression(format!("SET {}", assignments.join(", ")))
            .condition_expression(conditions.join(" AND "))
            .send()
            .await;
        match res {
            Ok(_) => Ok(UpdateOutcome::Updated),
            Err(SdkError::ServiceError(ref ctx)) if matches!(ctx.err(), UpdateItemError::ConditionalCheckFailedException(_)) => {
                debug!(table = E::TABLE, id, "conditional update not applied");
                Ok(UpdateOutcome::NoChange)
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<E> {
        let res = self.client
            .get_item()
            .table_name(self.table_name.as_str())
            .key(E::ID_FIELD, Self::id_key(id))
            .consistent_read(true)
            .send()
            .await?;
        match res.item() {
            Some(item) => map_to_row(item),
            None => Err(LibraryError::not_found(format!("{} not found for {}", E::TABLE, id).as_str())),
        }
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let res = self.client
            .delete_item()
            .table_name(self.table_name.as_str())
            .key(E::ID_FIELD, Self::id_key(id))
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#pk", E::ID_FIELD)
            .send()
            .await;
        match res {
            Ok(_) => Ok(1),
            Err(SdkError::ServiceError(ref ctx)) if matches!(ctx.err(), DeleteItemError::ConditionalCheckFailedException(_)) => {
                Err(LibraryError::not_found(format!("{} not found for {}", E::TABLE, id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    // Predicates are evaluated on the scanned page, so a page may hold fewer
    // than page_size matches while next_page is still set.
    async fn query(&self, predicates: &[Predicate],
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<E>> {
        let exclusive_start_key = match page {
            Some(token) => {
                let id = token.parse::<i64>().map_err(|_|
                    LibraryError::validation(format!("invalid page token {}", token).as_str(), Some("400".to_string())))?;
                Some(HashMap::from([(E::ID_FIELD.to_string(), Self::id_key(id))]))
            }
            None => None,
        };
        let res = self.client
            .scan()
            .table_name(self.table_name.as_str())
            .consistent_read(true)
            .set_exclusive_start_key(exclusive_start_key)
            .limit(cmp::min(page_size.max(1), 500) as i32)
            .send()
            .await?;
        let mut records = vec![];
        for item in res.items().unwrap_or_default() {
            let row: E = map_to_row(item)?;
            if matches_all(predicates, &row)? {
                records.push(row);
            }
        }
        let next_page = res.last_evaluated_key()
            .and_then(|key| parse_number_attribute(E::ID_FIELD, key))
            .map(|id| id.to_string());
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

fn map_to_row<E: Row>(map: &HashMap<String, AttributeValue>) -> LibraryResult<E> {
    Ok(serde_json::from_value(item_to_value(map))?)
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use aws_sdk_dynamodb::types::ScalarAttributeType;
    use lazy_static::lazy_static;
    use crate::books::domain::model::BookEntity;
    use crate::core::repository::{fields, FieldValue, Predicate, Repository, RepositoryStore, UpdateOutcome};
    use crate::loans::domain::model::BorrowRecordEntity;
    use crate::store::ddb::DDBRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table, SEQUENCES_TABLE, SEQUENCE_KEY};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                for (table, pk) in [("books", "book_id"), ("borrow_records", "record_id")] {
                    let _ = delete_table(&client, table).await;
                    let _ = create_table(&client, table, pk, ScalarAttributeType::N).await;
                }
                let _ = create_table(&client, SEQUENCES_TABLE, SEQUENCE_KEY, ScalarAttributeType::S).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires a local DynamoDB"]
    async fn test_should_create_update_query_books() {
        let books_repo = DDBRepository::<BookEntity>::new(CLIENT.get().await.clone(), "books", SEQUENCES_TABLE);
        let book = books_repo.create(&BookEntity::new("Dune", "Frank Herbert", "SciFi", 2)).await.expect("should create book");
        assert!(book.book_id > 0);

        let res = books_repo.update(book.book_id, &fields([("stock", FieldValue::Int(1))]),
                                    Some(&fields([("stock", FieldValue::Int(9))]))).await.expect("should run update");
        assert_eq!(UpdateOutcome::NoChange, res);
        let res = books_repo.update(book.book_id, &fields([("stock", FieldValue::Int(1))]),
                                    Some(&fields([("stock", FieldValue::Int(2))]))).await.expect("should run update");
        assert_eq!(UpdateOutcome::Updated, res);
        assert_eq!(1, books_repo.get(book.book_id).await.expect("should get book").stock);

        let found = books_repo.query_all(&[Predicate::ilike("author", "herbert")]).await.expect("should query");
        assert!(found.iter().any(|b| b.book_id == book.book_id));

        assert_eq!(1, books_repo.delete(book.book_id).await.expect("should delete"));
        assert!(books_repo.delete(book.book_id).await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires a local DynamoDB"]
    async fn test_should_close_record_once() {
        let records_repo = DDBRepository::<BorrowRecordEntity>::new(CLIENT.get().await.clone(), "borrow_records", SEQUENCES_TABLE);
        let record = records_repo.create(&BorrowRecordEntity::new(1, 1)).await.expect("should create record");
        let close = fields([("return_date", FieldValue::Timestamp(record.borrow_date))]);
        let open = fields([("return_date", FieldValue::Null)]);
        assert_eq!(UpdateOutcome::Updated, records_repo.update(record.record_id, &close, Some(&open)).await.expect("close"));
        assert_eq!(UpdateOutcome::NoChange, records_repo.update(record.record_id, &close, Some(&open)).await.expect("close again"));
        let loaded = records_repo.get(record.record_id).await.expect("should get record");
        assert!(!loaded.is_open());
    }
}
