pub mod error;
pub mod model;
pub mod page;
pub mod value_object;
