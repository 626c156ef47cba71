//! Defines the import configuration and its compiled form.
//!
//! An [ImportConfig] can only be created from a valid format and mapping list. Compiling it
//! produces a [CompiledImportConfig] that owns a copy of the mapping items, each with its own
//! transform sequence. Compiling the same configuration again produces a new, independent
//! [CompiledImportConfig].

use serde::Serialize;
use tracing::debug;

use crate::{
    importer::{
        compiler::compile,
        document::ImportConfigDocument,
        format::{DataKind, ImportFormat},
        mapping::MappingItem,
        validation::validate,
    },
    joint_limits::JointLimits,
    transforms::sample::Sample,
    Error,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

/// A validated import configuration for one kind of data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportConfig {
    /// The format of the recorded data.
    format: ImportFormat,

    /// The output channels, in order.
    mapping: Vec<MappingItem>,
}

impl ImportConfig {
    /// Compiles the configuration into a transform sequence for every mapping item.
    ///
    /// ## Errors
    ///
    /// * [Error::MissingRequiredField] - Returned when an end-effector pose with position and
    ///   orientation has no orientation format.
    pub fn compile(&self) -> Result<CompiledImportConfig, Error> {
        let sequences = compile(&self.format, &self.mapping)?;

        let mut items = self.mapping.clone();
        for (item, sequence) in items.iter_mut().zip(sequences) {
            item.set_transforms(sequence);
        }

        Ok(CompiledImportConfig {
            format: self.format,
            items,
        })
    }

    /// Returns the format of the recorded data.
    pub fn format(&self) -> &ImportFormat {
        &self.format
    }

    /// Creates a new [ImportConfig] from a configuration document.
    ///
    /// ## Parameters
    ///
    /// * 'data_kind' - The kind of data the document describes
    /// * 'document' - The document
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidFormatKind] - Returned when an enumerated value is not recognised.
    /// * [Error::UnsupportedRotationKind] - Returned when the orientation type is not recognised.
    /// * [Error::InvalidIndexRange] - Returned when an index range is empty.
    ///
    /// All validation errors of [ImportConfig::new] can also be returned.
    pub fn from_document(data_kind: DataKind, document: ImportConfigDocument) -> Result<Self, Error> {
        let (format, mapping) = document.into_parts(data_kind)?;
        Self::new(format, mapping)
    }

    /// Creates a new [ImportConfig] from a JSON configuration document.
    ///
    /// ## Errors
    ///
    /// * [Error::Deserialization] - Returned when the JSON does not describe a configuration
    ///   document.
    ///
    /// All errors of [ImportConfig::from_document] can also be returned.
    pub fn from_json_str(data_kind: DataKind, json: &str) -> Result<Self, Error> {
        let document: ImportConfigDocument =
            serde_json::from_str(json).map_err(|e| Error::Deserialization {
                message: e.to_string(),
            })?;

        Self::from_document(data_kind, document)
    }

    /// Returns the mapping items, in order.
    pub fn mapping(&self) -> &[MappingItem] {
        &self.mapping
    }

    /// Creates a new [ImportConfig] after validating the mapping items against the format.
    ///
    /// Mapping items without an index are assigned the index of their position in the list,
    /// except for gripper visual joints which require explicit indices.
    ///
    /// ## Errors
    ///
    /// * [Error::DuplicateMappingName] - Returned when two mapping items have the same name.
    /// * [Error::MappingIndexInconsistency] - Returned when some, but not all, mapping items
    ///   have an index.
    /// * [Error::MappingCardinality] - Returned when an end-effector pose is mapped by anything
    ///   other than exactly one mapping item.
    /// * [Error::MissingRequiredField] - Returned when a field required by the format is missing.
    /// * [Error::IndexRangeLengthMismatch] - Returned when the index range of a pose doesn't
    ///   match the orientation format.
    /// * [Error::InvalidNormalizationBounds] - Returned when the gripper normalization bounds
    ///   are not finite.
    /// * [Error::DivideByZero] - Returned when the gripper normalization bounds are equal.
    pub fn new(format: ImportFormat, mut mapping: Vec<MappingItem>) -> Result<Self, Error> {
        validate(&format, &mut mapping)?;
        Ok(Self { format, mapping })
    }
}

/// An import configuration in which every mapping item holds its compiled transforms.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompiledImportConfig {
    /// The format of the recorded data.
    format: ImportFormat,

    /// The output channels with their compiled transforms, in order.
    items: Vec<MappingItem>,
}

impl CompiledImportConfig {
    /// Converts one row of raw data into a sample per mapping item, in mapping order.
    ///
    /// ## Errors
    ///
    /// * [Error::IndexOutOfBounds] - Returned when the row is too short for a mapping item.
    ///
    /// Other errors are produced by the transforms. See
    /// [TransformSequence::apply](crate::transforms::sequence::TransformSequence::apply).
    pub fn apply(&self, row: &[f64]) -> Result<Vec<Sample>, Error> {
        self.items.iter().map(|item| item.apply_row(row)).collect()
    }

    /// Binds the joint limits of a joint to the pending joint limits of its mapping item.
    ///
    /// This is required for gripper visual joints, where the gripper open amount is scaled to
    /// the range of the joint once the joint limits are known.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the mapping item
    /// * 'limits' - The limits of the joint
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownMappingItem] - Returned when there is no mapping item with the name.
    /// * [Error::NoPendingJointLimits] - Returned when the mapping item has no pending joint
    ///   limits, either because it never had them or because they have already been bound.
    pub fn bind_joint_limits(&mut self, name: &str, limits: &JointLimits) -> Result<(), Error> {
        let item = match self.items.iter_mut().find(|item| item.name() == name) {
            Some(item) => item,
            None => {
                return Err(Error::UnknownMappingItem {
                    name: name.to_string(),
                })
            }
        };

        if !item.transforms_mut().bind_joint_limits(limits) {
            return Err(Error::NoPendingJointLimits {
                name: name.to_string(),
            });
        }

        debug!(
            item = name,
            lower = limits.lower(),
            upper = limits.upper(),
            "Bound joint limits"
        );

        Ok(())
    }

    /// Returns the format of the recorded data.
    pub fn format(&self) -> &ImportFormat {
        &self.format
    }

    /// Returns the mapping item with the given name, if it exists.
    pub fn item(&self, name: &str) -> Option<&MappingItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Returns the mapping items with their compiled transforms, in order.
    pub fn items(&self) -> &[MappingItem] {
        &self.items
    }

    /// Returns the names of the mapping items that still wait for their joint limits.
    pub fn pending_joint_limits(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.transforms().has_pending())
            .map(|item| item.name())
            .collect()
    }
}
