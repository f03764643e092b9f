pub mod navigator;
pub mod wizard_model;
