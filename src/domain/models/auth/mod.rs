pub mod authenticated_user;
pub mod authentication_request;
pub mod principal_resolver;

pub use authenticated_user::*;
pub use authentication_request::*;
pub use principal_resolver::*;
