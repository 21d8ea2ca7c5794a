pub mod diff_model;
pub mod structural;
pub mod style;
