pub mod sqlite;

pub use sqlite::SqliteSummarySink;
