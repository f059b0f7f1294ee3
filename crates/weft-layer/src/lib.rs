//! Merges community argument and local variable names into the official mappings.
//!
//! [`CorrelationLayer`] joins the official and community mappings through their shared
//! intermediary names and emits, for every class and method both sides know, the community
//! argument and variable names. Argument names that merely restate their type are renamed to
//! follow the official class name of that type (see [`ClassCrossReference`]).

mod args;
mod layer;
mod names;
mod vars;
mod xref;

pub use crate::layer::{CorrelationLayer, CorrelationStats};
pub use crate::names::{lower_camel_case, split_words, strip_numeric_suffix};
pub use crate::xref::ClassCrossReference;
pub use weft_config::LayerConfig;
