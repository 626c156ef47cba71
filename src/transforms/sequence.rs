//! Defines ordered sequences of transform primitives.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    joint_limits::JointLimits,
    transforms::{pose::PoseComponent, primitive::Transform, sample::Sample},
    Error,
};

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod sequence_tests;

/// An ordered list of [Transform] primitives that converts the raw samples of one channel.
///
/// The primitives are applied strictly in order, the output of one primitive is the input of
/// the next one. A sequence is owned by a single mapping item. Sequences compiled from a shared
/// list of primitives each hold their own copy of that list.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransformSequence {
    transforms: Vec<Transform>,
}

impl TransformSequence {
    /// Applies all primitives, in order, to the sample.
    ///
    /// ## Errors
    ///
    /// Returns the first error produced by any of the primitives. See [Transform::apply].
    pub fn apply(&self, sample: Sample) -> Result<Sample, Error> {
        self.transforms
            .iter()
            .try_fold(sample, |current, transform| transform.apply(current))
    }

    /// Applies all primitives to each of the samples.
    ///
    /// ## Errors
    ///
    /// Returns the first error produced for any of the samples. See [Transform::apply].
    pub fn apply_all<I>(&self, samples: I) -> Result<Vec<Sample>, Error>
    where
        I: IntoIterator<Item = Sample>,
    {
        samples
            .into_iter()
            .map(|sample| self.apply(sample))
            .collect()
    }

    /// Applies all primitives to the sample and returns the resulting scalar.
    ///
    /// ## Errors
    ///
    /// * [Error::NonScalarOutput] - Returned when the sequence produces an array.
    ///
    /// Other errors are produced by the primitives. See [Transform::apply].
    pub fn apply_scalar(&self, sample: Sample) -> Result<f64, Error> {
        self.apply(sample)?.into_scalar()
    }

    /// Replaces the pending joint limits placeholder with an [Transform::Unnormalize] to the
    /// given joint limits.
    ///
    /// Returns `true` if a placeholder was replaced and `false` if the sequence didn't hold
    /// a placeholder.
    pub fn bind_joint_limits(&mut self, limits: &JointLimits) -> bool {
        let mut bound = false;
        for transform in self.transforms.iter_mut().filter(|t| t.is_pending()) {
            *transform = Transform::Unnormalize {
                min: limits.lower(),
                max: limits.upper(),
            };
            bound = true;
        }

        bound
    }

    /// Returns a value indicating if the sequence still holds a placeholder that needs
    /// late-bound parameters.
    pub fn has_pending(&self) -> bool {
        self.transforms.iter().any(|t| t.is_pending())
    }

    /// Returns a value indicating if the sequence holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Returns the number of primitives in the sequence.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Creates a new [TransformSequence] from the given primitives.
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    /// Returns a copy of the sequence in which every pose decomposition emits only the given
    /// component of the canonical pose.
    ///
    /// Returns `None` if the sequence does not contain a pose decomposition.
    pub fn select_pose_component(&self, component: PoseComponent) -> Option<TransformSequence> {
        if !self
            .transforms
            .iter()
            .any(|t| matches!(t, Transform::Pose(_)))
        {
            return None;
        }

        let transforms = self
            .transforms
            .iter()
            .map(|t| match t {
                Transform::Pose(decomposition) => {
                    Transform::Pose(decomposition.with_component(component))
                }
                other => other.clone(),
            })
            .collect();

        Some(Self { transforms })
    }

    /// Returns the primitives in the order in which they are applied.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }
}

impl Display for TransformSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, transform) in self.transforms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{}", transform)?;
        }

        write!(f, "]")
    }
}
