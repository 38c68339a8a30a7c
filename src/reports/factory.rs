use crate::core::domain::Configuration;
use crate::reports::domain::ReportingService;
use crate::reports::domain::service::ReportingServiceImpl;
use crate::store::factory::Repositories;

pub fn create_reporting_service(config: &Configuration, repos: &Repositories) -> Box<dyn ReportingService> {
    Box::new(ReportingServiceImpl::new(config, repos.books.clone(), repos.members.clone(),
                                       repos.borrow_records.clone()))
}
