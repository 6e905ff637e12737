pub mod context;
pub mod prediction;
pub mod query;
pub mod schema;
