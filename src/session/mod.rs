pub mod form_session;
