use std::sync::Arc;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::gateway::events::EventPublisher;
use crate::guard::factory::create_deletion_guard;
use crate::store::factory::Repositories;

pub fn create_catalog_service(config: &Configuration, repos: &Repositories,
                              publisher: Arc<dyn EventPublisher>) -> Box<dyn CatalogService> {
    let deletion_guard = create_deletion_guard(repos);
    Box::new(CatalogServiceImpl::new(config, repos.books.clone(), deletion_guard, publisher))
}
