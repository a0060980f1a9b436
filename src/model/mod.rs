pub mod common;
pub mod inspection;
pub mod property;
pub mod template;

pub use common::*;
pub use inspection::*;
pub use property::*;
pub use template::*;
