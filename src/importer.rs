/// Defines the format options of the different import kinds
pub mod format;

/// Defines the mapping items and the resolution of their indices
pub mod mapping;

/// Validates import formats against their mapping items
pub mod validation;

/// Compiles import configurations into transform sequences
pub mod compiler;

/// Defines the import configuration and its compiled form
pub mod config;

/// Defines the serializable configuration document
pub mod document;
