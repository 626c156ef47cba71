//! Defines the transform primitives.
//!
//! A transform primitive is a single numeric conversion step, e.g. a unit conversion or the
//! inversion of a channel. Primitives only hold their own parameters and never share state,
//! so applying a primitive to a sample has no side effects.

use std::{f64::consts::PI, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{
    transforms::{pose::PoseDecomposition, sample::Sample},
    Error,
};

#[cfg(test)]
#[path = "primitive_tests.rs"]
mod primitive_tests;

/// A single numeric conversion step.
///
/// Element-wise primitives apply to every value of an array sample. [Transform::NumpyToScalar]
/// and [Transform::Pose] change the shape of the sample.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Transform {
    /// `out = in * factor`
    Scale {
        /// The factor to multiply with.
        factor: f64,
    },

    /// `out = in + value`
    Offset {
        /// The value to add.
        value: f64,
    },

    /// `out = -in`
    FlipSign,

    /// `out = in * PI / 180`
    DegreesToRadians,

    /// `out = (in - min) / (max - min)`
    Normalize {
        /// The value that maps to 0.0
        min: f64,
        /// The value that maps to 1.0
        max: f64,
    },

    /// `out = in * (max - min) + min`
    Unnormalize {
        /// The value that 0.0 maps to
        min: f64,
        /// The value that 1.0 maps to
        max: f64,
    },

    /// `out = max(min, min(in, max))`
    Clip {
        /// The lower bound
        min: f64,
        /// The upper bound
        max: f64,
    },

    /// Reduces a single element array to a scalar.
    NumpyToScalar,

    /// Decomposes a packed pose.
    Pose(PoseDecomposition),

    /// The placeholder for an [Transform::Unnormalize] to the joint limits of a gripper joint.
    ///
    /// The joint limits are only known once the robot description has been loaded. Until then
    /// the placeholder acts as `Unnormalize { min: 0.0, max: 1.0 }`. The placeholder is replaced
    /// by binding the joint limits to the transform sequence that holds it.
    PendingJointLimits,
}

impl Transform {
    /// Applies the primitive to a sample.
    ///
    /// ## Errors
    ///
    /// * [Error::DivideByZero] - Returned by [Transform::Normalize] if the minimum and maximum
    ///   are equal.
    /// * [Error::ArityMismatch] - Returned by [Transform::NumpyToScalar] for arrays that do not
    ///   have exactly one element, and by [Transform::Pose] when the sample doesn't match the
    ///   pose layout.
    /// * [Error::InvalidRotation] - Returned by [Transform::Pose] when the orientation is invalid.
    pub fn apply(&self, sample: Sample) -> Result<Sample, Error> {
        match self {
            Transform::Scale { factor } => Ok(sample.map(|v| v * factor)),
            Transform::Offset { value } => Ok(sample.map(|v| v + value)),
            Transform::FlipSign => Ok(sample.map(|v| -v)),
            Transform::DegreesToRadians => Ok(sample.map(|v| v * (PI / 180.0))),
            Transform::Normalize { min, max } => {
                if max == min {
                    return Err(Error::DivideByZero { value: *min });
                }

                let range = max - min;
                Ok(sample.map(|v| (v - min) / range))
            }
            Transform::Unnormalize { min, max } => Ok(unnormalize(sample, *min, *max)),
            Transform::Clip { min, max } => Ok(sample.map(|v| v.min(*max).max(*min))),
            Transform::NumpyToScalar => match sample {
                Sample::Scalar(_) => Ok(sample),
                Sample::Array(values) if values.len() == 1 => Ok(Sample::Scalar(values[0])),
                Sample::Array(values) => Err(Error::ArityMismatch {
                    expected: "1".to_string(),
                    actual: values.len(),
                }),
            },
            Transform::Pose(decomposition) => decomposition.apply(sample),
            Transform::PendingJointLimits => Ok(unnormalize(sample, 0.0, 1.0)),
        }
    }

    /// Returns a value indicating if the primitive is a placeholder waiting for late-bound
    /// parameters.
    pub fn is_pending(&self) -> bool {
        matches!(self, Transform::PendingJointLimits)
    }
}

impl Display for Transform {
    #[cfg_attr(test, mutants::skip)] // Diagnostics only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transform::Scale { factor } => write!(f, "Scale({})", factor),
            Transform::Offset { value } => write!(f, "Offset({})", value),
            Transform::FlipSign => write!(f, "FlipSign"),
            Transform::DegreesToRadians => write!(f, "DegreesToRadians"),
            Transform::Normalize { min, max } => write!(f, "Normalize({}, {})", min, max),
            Transform::Unnormalize { min, max } => write!(f, "Unnormalize({}, {})", min, max),
            Transform::Clip { min, max } => write!(f, "Clip({}, {})", min, max),
            Transform::NumpyToScalar => write!(f, "NumpyToScalar"),
            Transform::Pose(decomposition) => write!(f, "{}", decomposition),
            Transform::PendingJointLimits => write!(f, "Unnormalize(<joint limits>)"),
        }
    }
}

fn unnormalize(sample: Sample, min: f64, max: f64) -> Sample {
    let range = max - min;
    sample.map(|v| v * range + min)
}
