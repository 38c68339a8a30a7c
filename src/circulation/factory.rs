use std::sync::Arc;
use crate::circulation::domain::CirculationService;
use crate::circulation::domain::service::CirculationServiceImpl;
use crate::core::domain::Configuration;
use crate::gateway::events::EventPublisher;
use crate::store::factory::Repositories;

pub fn create_circulation_service(config: &Configuration, repos: &Repositories,
                                  publisher: Arc<dyn EventPublisher>) -> Box<dyn CirculationService> {
    Box::new(CirculationServiceImpl::new(config, repos.books.clone(), repos.members.clone(),
                                         repos.borrow_records.clone(), publisher))
}
