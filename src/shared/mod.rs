pub mod error;
pub mod result;
pub mod security;

pub use error::{AssemblyError, AssemblyResult, ErrorKind};
pub use result::Result;
