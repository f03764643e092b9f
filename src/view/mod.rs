pub mod buttons_view;
pub mod console;
pub mod form_view;
pub mod html;
pub mod lifecycle;
