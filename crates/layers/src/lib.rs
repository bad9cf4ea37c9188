pub mod labels;
pub mod layer;
pub mod objects;
pub mod query;
pub mod symbology;
pub mod user_position;

pub use layer::*;
