//! Defines the position limits of a joint.
//!
//! Joint limits are normally read from a robot description (for instance a URDF file) while
//! the data is being imported. They are used to turn a normalized gripper open amount into
//! the position of the visual gripper joint.

use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "joint_limits_tests.rs"]
mod joint_limits_tests;

/// Stores the minimum and maximum position for a joint.
///
/// The limits are expressed in the canonical units of the joint, i.e. radians for revolute
/// joints and meters for prismatic joints.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "JointLimitsDocument")]
pub struct JointLimits {
    /// The minimum position of the joint.
    lower: f64,

    /// The maximum position of the joint.
    upper: f64,
}

impl JointLimits {
    /// Returns the maximum position of the joint.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns the minimum position of the joint.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the distance between the lower and the upper limit.
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Creates a new [JointLimits] instance.
    ///
    /// ## Parameters
    ///
    /// * 'lower' - The minimum position of the joint
    /// * 'upper' - The maximum position of the joint
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidJointLimits] - Returned when the lower limit is larger than the upper
    ///   limit, or when either of the limits is not a finite number.
    pub fn new(lower: f64, upper: f64) -> Result<Self, Error> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(Error::InvalidJointLimits { lower, upper });
        }

        Ok(Self { lower, upper })
    }
}

/// The unvalidated form of [JointLimits] as it appears in a document.
#[derive(Deserialize)]
struct JointLimitsDocument {
    lower: f64,
    upper: f64,
}

impl TryFrom<JointLimitsDocument> for JointLimits {
    type Error = Error;

    fn try_from(value: JointLimitsDocument) -> Result<Self, Self::Error> {
        JointLimits::new(value.lower, value.upper)
    }
}
