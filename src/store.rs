pub mod ddb;
pub mod factory;
pub mod memory;
#[cfg(test)]
pub(crate) mod flaky;
