pub mod error;
pub mod tag;
pub mod types;
pub mod value;

pub use error::{ErrorKind, HtmlFillError};
pub use tag::*;
pub use types::*;
pub use value::*;
