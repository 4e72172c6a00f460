//! Report link domain entities.

pub mod issued;
pub mod model;

pub use issued::IssuedLink;
pub use model::ReportLink;
