mod cluster;
mod result;
mod signup;
mod space;
mod workspace;

pub use cluster::*;
pub use result::*;
pub use signup::*;
pub use space::*;
pub use workspace::*;
