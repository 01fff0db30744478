mod error;
mod workspace_handler;

pub use error::*;
pub use workspace_handler::*;
