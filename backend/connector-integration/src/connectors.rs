pub mod ipgconnect;
pub use self::ipgconnect::{HostedRedirect, Webservice};
