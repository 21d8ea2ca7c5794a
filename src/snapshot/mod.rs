pub mod capture;
pub mod snapshot_model;
