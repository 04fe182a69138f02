pub mod backend;
pub mod error;
pub mod fonts;
pub mod form;
pub mod label;
pub mod logging;
pub mod nutrition;
pub mod style;
pub mod xml;

pub use error::{LabelError, LabelResult};
