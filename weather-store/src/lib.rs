pub mod db;
pub mod domain;

pub use db::{connect, connect_in_memory};
pub use domain::{DailySummary, Reading};
