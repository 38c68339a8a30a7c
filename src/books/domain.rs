use crate::core::domain::Identifiable;

pub mod model;

pub trait Book: Identifiable {
    fn stock(&self) -> i64;
    fn is_available(&self) -> bool {
        self.stock() > 0
    }
}
