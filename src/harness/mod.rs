pub mod context;
pub mod runner;
pub mod scenario;
pub mod session;
