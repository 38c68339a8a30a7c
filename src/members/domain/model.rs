use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LibraryResult;
use crate::core::repository::{FieldValue, Row};
use crate::utils::date::{now, serializer};

// MemberEntity abstracts a registered library member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberEntity {
    pub member_id: i64,
    pub name: String,
    pub email: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            member_id: 0,
            name: name.to_string(),
            email: email.to_string(),
            created_at: now(),
            updated_at: now(),
        }
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> i64 {
        self.member_id
    }
}

impl Row for MemberEntity {
    const TABLE: &'static str = "members";
    const ID_FIELD: &'static str = "member_id";

    fn assign_id(&mut self, id: i64) {
        self.member_id = id;
    }

    fn field(&self, name: &str) -> LibraryResult<FieldValue> {
        match name {
            "member_id" => Ok(FieldValue::Int(self.member_id)),
            "name" => Ok(FieldValue::Text(self.name.to_string())),
            "email" => Ok(FieldValue::Text(self.email.to_string())),
            "created_at" => Ok(FieldValue::Timestamp(self.created_at)),
            "updated_at" => Ok(FieldValue::Timestamp(self.updated_at)),
            _ => Err(Self::unknown_field(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> LibraryResult<()> {
        match (name, value) {
            ("name", FieldValue::Text(s)) => self.name = s,
            ("email", FieldValue::Text(s)) => self.email = s,
            ("updated_at", FieldValue::Timestamp(t)) => self.updated_at = t,
            ("member_id" | "name" | "email" | "created_at" | "updated_at", other) => {
                return Err(Self::type_mismatch(name, &other));
            }
            _ => return Err(Self::unknown_field(name)),
        }
        Ok(())
    }
}
