pub mod approval;
pub mod catalog;
pub mod snapshot;
