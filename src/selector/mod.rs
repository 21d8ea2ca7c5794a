pub mod filters;
pub mod resolver;
pub mod selector_model;
