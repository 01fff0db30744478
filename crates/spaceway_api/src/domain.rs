mod access;
mod binding_resolver;
mod projection;
mod workspace_service;

pub use access::*;
pub use binding_resolver::*;
pub use projection::*;
pub use workspace_service::*;
