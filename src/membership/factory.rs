use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::gateway::events::EventPublisher;
use crate::guard::factory::create_deletion_guard;
use crate::membership::domain::MembershipService;
use crate::membership::domain::service::MembershipServiceImpl;
use crate::store::factory::Repositories;

pub fn create_membership_service(config: &Configuration, repos: &Repositories,
                                 publisher: Arc<dyn EventPublisher>) -> Box<dyn MembershipService> {
    Box::new(MembershipServiceImpl::new(config, repos.members.clone(), repos.borrow_records.clone(),
                                        create_deletion_guard(repos), publisher))
}
