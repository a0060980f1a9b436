pub mod error;
pub mod inspections;
pub mod properties;
pub mod templates;
pub mod validate;

pub use error::*;
pub use inspections::*;
pub use properties::*;
pub use templates::*;
pub use validate::*;
