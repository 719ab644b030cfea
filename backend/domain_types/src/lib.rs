pub mod errors;
pub mod payment_method_data;
pub mod router_data;
pub mod router_request_types;
pub mod router_response_types;
pub mod types;
pub mod utils;
