use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;

pub type MemberRepository = dyn Repository<MemberEntity>;
