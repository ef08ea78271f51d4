mod json;
mod valid;

pub use json::{Json, Path, Query};
pub use valid::Valid;
