#![warn(missing_docs)]

//! Configuration driven import transforms for robot telemetry.
//!
//! Provides validation of declarative import configurations that map raw telemetry channels
//! (joint positions, velocities, torques, end-effector poses and gripper channels) onto
//! semantic joints, and compiles those configurations into ordered chains of numeric
//! transforms that convert the raw vendor specific values into canonical units.

use thiserror::Error;

/// Defines the joint position limits used to rebind late-bound transforms
pub mod joint_limits;

/// Defines the transform primitives, transform sequences and the pose decomposer
pub mod transforms;

/// Provides the import configuration, its validation and the pipeline compiler
pub mod importer;

/// Defines the different errors for the import transform crate.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Returned when some, but not all, mapping items in a mapping list have an index.
    #[error("All or none of the mapping items in {config_name} must have an 'index' specified")]
    MappingIndexInconsistency {
        /// The name of the configuration that holds the mapping list.
        config_name: String,
    },

    /// Returned when an import mode requires a specific number of mapping items.
    #[error("{reason}: expected {expected} mapping item(s), got {actual}")]
    MappingCardinality {
        /// The number of mapping items that is allowed.
        expected: usize,
        /// The number of mapping items that was provided.
        actual: usize,
        /// A description of the constraint that was violated.
        reason: String,
    },

    /// Returned when a field that is required by another configuration choice is missing.
    #[error("Missing required field '{field}': {reason}")]
    MissingRequiredField {
        /// The name of the missing field.
        field: String,
        /// The configuration choice that requires the field.
        reason: String,
    },

    /// Returned when the length of an index range does not match the rotation kind.
    #[error("Index range length must be {expected} for orientation type {rotation_kind}, got {actual}")]
    IndexRangeLengthMismatch {
        /// The rotation kind that determines the expected length.
        rotation_kind: String,
        /// The expected length of the index range.
        expected: usize,
        /// The length of the index range that was provided.
        actual: usize,
    },

    /// Returned when an index range does not have an end that is larger than the start.
    #[error("Index range end ({end}) must be larger than the start ({start})")]
    InvalidIndexRange {
        /// The start of the range.
        start: usize,
        /// The end of the range.
        end: usize,
    },

    /// Returned when an enumerated configuration value is not recognised.
    #[error("Invalid value '{value}' for {field}")]
    InvalidFormatKind {
        /// The name of the configuration field.
        field: String,
        /// The value that was not recognised.
        value: String,
    },

    /// Returned when the rotation kind of an orientation is not recognised.
    #[error("Unsupported orientation type: {value}")]
    UnsupportedRotationKind {
        /// The rotation kind that was not recognised.
        value: String,
    },

    /// Returned when normalizing with a range that has equal minimum and maximum values.
    #[error("Cannot normalize with equal minimum and maximum ({value})")]
    DivideByZero {
        /// The value of both the minimum and the maximum.
        value: f64,
    },

    /// Returned when a sample does not have the number of elements a transform requires.
    #[error("Expected a sample with {expected} element(s), got {actual}")]
    ArityMismatch {
        /// The number of elements that was expected.
        expected: String,
        /// The number of elements in the sample.
        actual: usize,
    },

    /// Returned when a transform sequence produced an array where a scalar was required.
    #[error("Expected a scalar output, got an array with {len} element(s)")]
    NonScalarOutput {
        /// The number of elements in the array.
        len: usize,
    },

    /// Returned when a mapping item refers to data outside the bounds of a raw row.
    #[error("Index {index} is out of bounds for a row with {len} value(s)")]
    IndexOutOfBounds {
        /// The first index that could not be read.
        index: usize,
        /// The number of values in the row.
        len: usize,
    },

    /// Returned when the orientation part of a pose does not describe a rotation.
    #[error("Invalid rotation: {reason}")]
    InvalidRotation {
        /// A description of the problem.
        reason: String,
    },

    /// Returned when no mapping item with the given name exists.
    #[error("No mapping item with name '{name}'")]
    UnknownMappingItem {
        /// The name of the mapping item.
        name: String,
    },

    /// Returned when binding joint limits to a mapping item that has no pending joint limits.
    #[error("Mapping item '{name}' has no pending joint limits")]
    NoPendingJointLimits {
        /// The name of the mapping item.
        name: String,
    },

    /// Returned when two mapping items in a mapping list have the same name.
    #[error("The mapping items in {config_name} must have unique names, '{name}' is used more than once")]
    DuplicateMappingName {
        /// The name of the configuration that holds the mapping list.
        config_name: String,
        /// The name that is used more than once.
        name: String,
    },

    /// Returned when the gripper normalization bounds are not finite numbers.
    #[error("Normalization bounds must be finite, got min {min} and max {max}")]
    InvalidNormalizationBounds {
        /// The value that maps to 0.0.
        min: f64,
        /// The value that maps to 1.0.
        max: f64,
    },

    /// Returned when a set of joint limits has a lower limit that is larger than the upper limit.
    #[error("Joint lower limit ({lower}) must not be larger than the upper limit ({upper})")]
    InvalidJointLimits {
        /// The lower limit.
        lower: f64,
        /// The upper limit.
        upper: f64,
    },

    /// Returned when a configuration document could not be deserialized.
    #[error("Failed to read the import configuration: {message}")]
    Deserialization {
        /// The message of the deserialization error.
        message: String,
    },
}
