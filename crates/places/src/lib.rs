pub mod dataset;
pub mod loader;
pub mod place;
pub mod schema;
pub mod store;

pub use dataset::*;
pub use loader::*;
pub use place::*;
pub use schema::*;
pub use store::*;
