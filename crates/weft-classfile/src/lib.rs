#![forbid(unsafe_code)]

mod descriptor;
mod error;

pub use crate::descriptor::{parse_param_types, remap_descriptor, simple_class_name};
pub use crate::error::{Error, Result};
