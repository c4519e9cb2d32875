pub mod approve;
pub mod session;
