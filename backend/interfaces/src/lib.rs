pub mod api;
pub mod connector_types;
pub mod verification;
