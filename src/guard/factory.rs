use crate::guard::domain::DeletionGuard;
use crate::guard::domain::service::DeletionGuardImpl;
use crate::store::factory::Repositories;

pub(crate) fn create_deletion_guard(repos: &Repositories) -> Box<dyn DeletionGuard> {
    Box::new(DeletionGuardImpl::new(repos.borrow_records.clone()))
}
