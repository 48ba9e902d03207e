pub mod catalog;
pub mod core;
pub mod lessons;
pub mod norms;
pub mod setup;
