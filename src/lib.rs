pub mod cli;
pub mod client;
pub mod error;
pub mod events;
pub mod form;
pub mod schema;
pub mod session;
pub mod trace;
pub mod validation;
pub mod view;
pub mod wizard;
