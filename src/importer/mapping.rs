//! Defines the mapping items that connect raw data channels to semantic joints.

use std::ops::Range;

use serde::Serialize;

use crate::{
    transforms::{pose::PoseComponent, sample::Sample, sequence::TransformSequence},
    Error,
};

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod mapping_tests;

/// A half-open range `[start, end)` of indices into a raw data row.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct IndexRange {
    /// The first index in the range.
    start: usize,

    /// The index one past the last index in the range.
    end: usize,
}

impl IndexRange {
    /// Returns the range as a standard range.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the index one past the last index in the range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Always returns `false`. A range holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the number of indices in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Creates a new [IndexRange].
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidIndexRange] - Returned when the end is not larger than the start.
    pub fn new(start: usize, end: usize) -> Result<Self, Error> {
        if end <= start {
            return Err(Error::InvalidIndexRange { start, end });
        }

        Ok(Self { start, end })
    }

    /// Returns the first index in the range.
    pub fn start(&self) -> usize {
        self.start
    }
}

/// Describes one output channel of an import configuration.
///
/// The item names the semantic joint, the location of the raw data for the joint, and the
/// per-channel adjustments. Once the configuration is compiled the item also holds the
/// [TransformSequence] that converts the raw data into canonical units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MappingItem {
    /// The name of the joint the item produces data for.
    name: String,

    /// The index of the raw value.
    index: Option<usize>,

    /// The range of raw values, used for multi-value channels like poses.
    index_range: Option<IndexRange>,

    /// Indicates that the sign of the raw value should be flipped.
    inverted: bool,

    /// The value added to the raw value after unit conversion and inversion.
    offset: f64,

    /// The compiled transforms. Empty until the configuration is compiled.
    transforms: TransformSequence,
}

impl MappingItem {
    /// Applies the compiled transforms of the item to a raw sample.
    ///
    /// ## Errors
    ///
    /// Returns the errors produced by the transforms. See [TransformSequence::apply].
    pub fn apply(&self, sample: Sample) -> Result<Sample, Error> {
        self.transforms.apply(sample)
    }

    /// Extracts the raw sample of the item from the row and applies the compiled transforms
    /// to it.
    ///
    /// ## Errors
    ///
    /// * [Error::IndexOutOfBounds] - Returned when the row is too short for the item.
    ///
    /// Other errors are produced by the transforms. See [TransformSequence::apply].
    pub fn apply_row(&self, row: &[f64]) -> Result<Sample, Error> {
        self.apply(self.extract(row)?)
    }

    /// Applies the compiled transforms of the item to a raw sample and returns the scalar result.
    ///
    /// ## Errors
    ///
    /// * [Error::NonScalarOutput] - Returned when the transforms produce an array.
    ///
    /// Other errors are produced by the transforms. See [TransformSequence::apply].
    pub fn apply_scalar(&self, sample: Sample) -> Result<f64, Error> {
        self.transforms.apply_scalar(sample)
    }

    /// Returns the raw sample for the item from a row of raw data.
    ///
    /// An index range produces an array sample, a single index produces a scalar sample. Items
    /// with neither use the complete row, which is the case for matrix poses.
    ///
    /// ## Errors
    ///
    /// * [Error::IndexOutOfBounds] - Returned when the row is too short for the item.
    pub fn extract(&self, row: &[f64]) -> Result<Sample, Error> {
        if let Some(range) = &self.index_range {
            return match row.get(range.as_range()) {
                Some(values) => Ok(Sample::from(values)),
                None => Err(Error::IndexOutOfBounds {
                    index: range.end() - 1,
                    len: row.len(),
                }),
            };
        }

        match self.index {
            Some(index) => match row.get(index) {
                Some(value) => Ok(Sample::Scalar(*value)),
                None => Err(Error::IndexOutOfBounds {
                    index,
                    len: row.len(),
                }),
            },
            None => Ok(Sample::from(row)),
        }
    }

    /// Returns the index of the raw value, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the range of raw values, if any.
    pub fn index_range(&self) -> Option<&IndexRange> {
        self.index_range.as_ref()
    }

    /// Returns a value indicating if the sign of the raw value is flipped.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Returns the name of the joint.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Creates a new [MappingItem] without an index, inversion or offset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            index_range: None,
            inverted: false,
            offset: 0.0,
            transforms: TransformSequence::default(),
        }
    }

    /// Returns the offset added to the raw value.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the transforms for a single component of the decomposed pose.
    ///
    /// Returns `None` if the compiled transforms of the item don't decompose a pose.
    pub fn pose_channel(&self, component: PoseComponent) -> Option<TransformSequence> {
        self.transforms.select_pose_component(component)
    }

    /// Returns the compiled transforms of the item.
    pub fn transforms(&self) -> &TransformSequence {
        &self.transforms
    }

    /// Returns the item with the given index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Returns the item with the given index range.
    pub fn with_index_range(mut self, index_range: IndexRange) -> Self {
        self.index_range = Some(index_range);
        self
    }

    /// Returns the item with the given inversion flag.
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Returns the item with the given offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = Some(index);
    }

    pub(crate) fn set_transforms(&mut self, transforms: TransformSequence) {
        self.transforms = transforms;
    }

    pub(crate) fn transforms_mut(&mut self) -> &mut TransformSequence {
        &mut self.transforms
    }
}

/// Validates the indices of a mapping list and assigns indices when none are specified.
///
/// Either all or none of the items should have an index. When none of the items have an index
/// each item is given the index of its position in the list. Duplicate indices are not
/// rejected.
///
/// ## Parameters
///
/// * 'mapping' - The mapping items
/// * 'config_name' - The name of the configuration, used in the error message
///
/// ## Errors
///
/// * [Error::MappingIndexInconsistency] - Returned when some, but not all, items have an index.
pub fn resolve_mapping_indexes(mapping: &mut [MappingItem], config_name: &str) -> Result<(), Error> {
    let with_index = mapping.iter().filter(|item| item.index.is_some()).count();
    if with_index == mapping.len() {
        return Ok(());
    }

    if with_index > 0 {
        return Err(Error::MappingIndexInconsistency {
            config_name: config_name.to_string(),
        });
    }

    for (i, item) in mapping.iter_mut().enumerate() {
        item.set_index(i);
    }

    Ok(())
}
