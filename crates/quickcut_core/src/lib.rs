pub mod editing;
pub mod error;
pub mod session;
pub mod suggest;
pub mod types;
