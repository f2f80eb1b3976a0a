pub mod status;
pub mod toolbar;
pub mod viewer;
