pub mod comment;
pub mod outcome;
pub mod ticket;
pub mod transition;
