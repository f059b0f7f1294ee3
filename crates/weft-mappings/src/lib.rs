//! In-memory mapping model shared by the weft crates.
//!
//! Mappings flow through the push-style [`MappingVisitor`] contract: a [`MappingSource`] replays
//! its contents into any visitor, and [`MemoryMappingTree`] is both (it can be populated by a
//! visitor pass and replayed afterwards).

mod error;
mod namespace;
mod recording;
mod tiny;
mod tree;
mod visitor;

pub use crate::error::{MappingError, Result};
pub use crate::namespace::{NamespaceId, INTERMEDIARY, NAMED, OFFICIAL};
pub use crate::recording::{MappingEvent, RecordingVisitor};
pub use crate::tiny::TinyV2Writer;
pub use crate::tree::{
    ClassMapping, FieldMapping, MemoryMappingTree, MethodArgMapping, MethodMapping,
    MethodVarMapping,
};
pub use crate::visitor::{MappedElementKind, MappingSource, MappingVisitor};
