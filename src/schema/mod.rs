pub mod links;
pub mod schema_model;
