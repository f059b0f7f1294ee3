use crate::visitor::MappedElementKind;

pub type Result<T> = std::result::Result<T, MappingError>;

/// Errors raised while visiting, storing or writing mappings.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("source namespace mismatch: expected {expected}, found {found}")]
    NamespaceMismatch { expected: String, found: String },

    #[error("{tree} mappings do not declare the {namespace} namespace")]
    MissingNamespace {
        tree: &'static str,
        namespace: &'static str,
    },

    #[error("namespaces must be declared before visiting elements")]
    NamespacesNotDeclared,

    #[error("destination namespace {0} was not declared")]
    UnknownNamespace(usize),

    #[error("no {0:?} is currently being visited")]
    NoElement(MappedElementKind),

    #[error(transparent)]
    Descriptor(#[from] weft_classfile::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
