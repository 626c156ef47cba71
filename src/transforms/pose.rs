//! Provides the decomposition of packed poses into a position and an orientation.
//!
//! A pose can be recorded as a homogeneous transformation matrix, or as a position followed
//! by an orientation in one of the supported rotation representations. The decomposition
//! converts any of these into the canonical pose `[x, y, z, qx, qy, qz, qw]`, where the
//! orientation is a unit quaternion with a non-negative scalar part.

use std::fmt::Display;

use nalgebra::{
    Isometry3, Matrix3, Quaternion, Rotation3, Translation3, UnitQuaternion, Vector3,
};
use serde::{Deserialize, Serialize};

use crate::{
    importer::format::{
        AngleUnits, EulerOrder, PoseKind, QuaternionOrder, RotationKind, POSITION_LEN,
    },
    transforms::sample::Sample,
    Error,
};

#[cfg(test)]
#[path = "pose_tests.rs"]
mod pose_tests;

/// The number of values in a homogeneous transformation matrix.
const HOMOGENEOUS_MATRIX_LEN: usize = 16;

/// The number of values in the upper three rows of a homogeneous transformation matrix.
const AFFINE_MATRIX_LEN: usize = 12;

/// The smallest determinant or norm that is accepted for a rotation.
const MINIMUM_ROTATION_SCALE: f64 = 1e-9;

/// Identifies a single scalar of the canonical pose `[x, y, z, qx, qy, qz, qw]`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseComponent {
    /// The X position
    X,
    /// The Y position
    Y,
    /// The Z position
    Z,
    /// The X component of the orientation quaternion
    Qx,
    /// The Y component of the orientation quaternion
    Qy,
    /// The Z component of the orientation quaternion
    Qz,
    /// The scalar component of the orientation quaternion
    Qw,
}

impl PoseComponent {
    /// All components in the order of the canonical pose.
    pub const ALL: [PoseComponent; 7] = [
        PoseComponent::X,
        PoseComponent::Y,
        PoseComponent::Z,
        PoseComponent::Qx,
        PoseComponent::Qy,
        PoseComponent::Qz,
        PoseComponent::Qw,
    ];

    /// Returns the position of the component in the canonical pose.
    pub fn index(&self) -> usize {
        match self {
            PoseComponent::X => 0,
            PoseComponent::Y => 1,
            PoseComponent::Z => 2,
            PoseComponent::Qx => 3,
            PoseComponent::Qy => 4,
            PoseComponent::Qz => 5,
            PoseComponent::Qw => 6,
        }
    }
}

/// The order in which the values of an orientation are recorded.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationSequence {
    /// The component order of a quaternion.
    Quaternion(QuaternionOrder),
    /// The axis sequence of a set of Euler angles.
    Euler(EulerOrder),
}

impl Default for RotationSequence {
    fn default() -> Self {
        RotationSequence::Quaternion(QuaternionOrder::Xyzw)
    }
}

impl Display for RotationSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationSequence::Quaternion(order) => f.write_str(order.as_str()),
            RotationSequence::Euler(order) => write!(f, "{}", order),
        }
    }
}

/// Describes how a pose is packed in the recorded data.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "pose_type", rename_all = "snake_case")]
pub enum PoseLayout {
    /// A homogeneous transformation matrix in row-major order. Either all 16 values or only
    /// the upper 12 values are recorded.
    Matrix,
    /// A position followed by an orientation.
    PositionOrientation {
        /// The representation of the orientation.
        rotation_kind: RotationKind,
        /// The units of the angles for Euler angle and axis-angle orientations.
        angle_units: AngleUnits,
        /// The order of the orientation values.
        sequence: RotationSequence,
    },
}

impl PoseLayout {
    /// Returns the pose kind of the layout.
    pub fn pose_kind(&self) -> PoseKind {
        match self {
            PoseLayout::Matrix => PoseKind::Matrix,
            PoseLayout::PositionOrientation { .. } => PoseKind::PositionOrientation,
        }
    }
}

/// Decomposes a packed pose and emits either the canonical pose or a single scalar from it.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct PoseDecomposition {
    /// The packing of the pose.
    layout: PoseLayout,

    /// The scalar of the canonical pose that should be emitted. If not set the complete
    /// canonical pose is emitted.
    component: Option<PoseComponent>,
}

impl PoseDecomposition {
    /// Returns the component of the canonical pose that is emitted, if any.
    pub fn component(&self) -> Option<PoseComponent> {
        self.component
    }

    /// Returns the layout of the recorded pose.
    pub fn layout(&self) -> &PoseLayout {
        &self.layout
    }

    /// Creates a new [PoseDecomposition] that emits the complete canonical pose.
    pub fn new(layout: PoseLayout) -> Self {
        Self {
            layout,
            component: None,
        }
    }

    /// Returns a copy of the decomposition that emits only the given component.
    pub fn with_component(&self, component: PoseComponent) -> Self {
        Self {
            layout: self.layout,
            component: Some(component),
        }
    }

    /// Applies the decomposition to a sample.
    ///
    /// ## Errors
    ///
    /// * [Error::ArityMismatch] - Returned when the sample does not hold the number of values
    ///   required by the layout.
    /// * [Error::InvalidRotation] - Returned when the orientation cannot be turned into a
    ///   rotation.
    pub fn apply(&self, sample: Sample) -> Result<Sample, Error> {
        let values = match &sample {
            Sample::Array(values) => values.as_slice(),
            Sample::Scalar(_) => return Err(self.arity_error(1)),
        };

        let pose = self.canonical_pose(values)?;
        match self.component {
            Some(component) => Ok(Sample::Scalar(pose[component.index()])),
            None => Ok(Sample::Array(pose.to_vec())),
        }
    }

    /// Returns the canonical pose `[x, y, z, qx, qy, qz, qw]` for the packed pose values.
    ///
    /// ## Errors
    ///
    /// * [Error::ArityMismatch] - Returned when the number of values does not match the layout.
    /// * [Error::InvalidRotation] - Returned when the orientation cannot be turned into a
    ///   rotation.
    pub fn canonical_pose(&self, values: &[f64]) -> Result<[f64; 7], Error> {
        let isometry = self.decompose(values)?;

        let t = isometry.translation.vector;
        let mut q = isometry.rotation.into_inner().coords;

        // q and -q describe the same rotation
        if q.w < 0.0 {
            q = -q;
        }

        Ok([t.x, t.y, t.z, q.x, q.y, q.z, q.w])
    }

    /// Returns the rigid body transform described by the packed pose values.
    ///
    /// ## Errors
    ///
    /// * [Error::ArityMismatch] - Returned when the number of values does not match the layout.
    /// * [Error::InvalidRotation] - Returned when the orientation cannot be turned into a
    ///   rotation.
    pub fn decompose(&self, values: &[f64]) -> Result<Isometry3<f64>, Error> {
        match &self.layout {
            PoseLayout::Matrix => {
                if values.len() != HOMOGENEOUS_MATRIX_LEN && values.len() != AFFINE_MATRIX_LEN {
                    return Err(self.arity_error(values.len()));
                }

                // The upper three rows are [R | t] for both the full and the affine matrix
                let rotation = Matrix3::new(
                    values[0], values[1], values[2], values[4], values[5], values[6], values[8],
                    values[9], values[10],
                );
                let translation = Translation3::new(values[3], values[7], values[11]);

                Ok(Isometry3::from_parts(
                    translation,
                    rotation_from_matrix(&rotation)?,
                ))
            }
            PoseLayout::PositionOrientation {
                rotation_kind,
                angle_units,
                sequence,
            } => {
                let orientation_len = rotation_kind.orientation_len();
                let (translation, orientation) = if values.len() == POSITION_LEN + orientation_len
                {
                    (
                        Translation3::new(values[0], values[1], values[2]),
                        &values[POSITION_LEN..],
                    )
                } else if *rotation_kind == RotationKind::Matrix && values.len() == orientation_len
                {
                    // A bare rotation matrix, the position is at the origin
                    (Translation3::identity(), values)
                } else {
                    return Err(self.arity_error(values.len()));
                };

                let rotation = match rotation_kind {
                    RotationKind::Quaternion => {
                        let order = match sequence {
                            RotationSequence::Quaternion(order) => *order,
                            RotationSequence::Euler(_) => QuaternionOrder::Xyzw,
                        };
                        rotation_from_quaternion(orientation, order)?
                    }
                    RotationKind::Euler => {
                        let order = match sequence {
                            RotationSequence::Euler(order) => order,
                            RotationSequence::Quaternion(_) => {
                                return Err(Error::InvalidRotation {
                                    reason: "Euler angles require an Euler axis sequence"
                                        .to_string(),
                                })
                            }
                        };
                        let angles = [
                            to_radians(orientation[0], *angle_units),
                            to_radians(orientation[1], *angle_units),
                            to_radians(orientation[2], *angle_units),
                        ];
                        rotation_from_euler(order, angles)
                    }
                    RotationKind::AxisAngle => {
                        let scaled_axis = Vector3::new(
                            to_radians(orientation[0], *angle_units),
                            to_radians(orientation[1], *angle_units),
                            to_radians(orientation[2], *angle_units),
                        );
                        UnitQuaternion::from_scaled_axis(scaled_axis)
                    }
                    RotationKind::Matrix => {
                        rotation_from_matrix(&Matrix3::from_row_slice(orientation))?
                    }
                };

                Ok(Isometry3::from_parts(translation, rotation))
            }
        }
    }

    fn arity_error(&self, actual: usize) -> Error {
        let expected = match self.layout {
            PoseLayout::Matrix => format!("{} or {}", HOMOGENEOUS_MATRIX_LEN, AFFINE_MATRIX_LEN),
            PoseLayout::PositionOrientation {
                rotation_kind: RotationKind::Matrix,
                ..
            } => format!(
                "{} or {}",
                RotationKind::Matrix.orientation_len(),
                POSITION_LEN + RotationKind::Matrix.orientation_len()
            ),
            PoseLayout::PositionOrientation { rotation_kind, .. } => {
                (POSITION_LEN + rotation_kind.orientation_len()).to_string()
            }
        };

        Error::ArityMismatch { expected, actual }
    }
}

impl Display for PoseDecomposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.layout {
            PoseLayout::Matrix => write!(f, "Pose(matrix")?,
            PoseLayout::PositionOrientation {
                rotation_kind,
                angle_units,
                sequence,
            } => write!(
                f,
                "Pose(position_orientation, {}, {}, {}",
                rotation_kind,
                angle_units.as_str(),
                sequence
            )?,
        }

        match self.component {
            Some(component) => write!(f, ", {:?})", component),
            None => write!(f, ")"),
        }
    }
}

/// Returns the rotation for the given Euler angles in radians.
///
/// Extrinsic sequences rotate around the fixed axes, so each new rotation is applied on the
/// left. Intrinsic sequences rotate around the axes of the rotating frame, so each new rotation
/// is applied on the right.
pub fn rotation_from_euler(order: &EulerOrder, angles: [f64; 3]) -> UnitQuaternion<f64> {
    order
        .axes()
        .iter()
        .zip(angles)
        .map(|(axis, angle)| UnitQuaternion::from_axis_angle(&axis.unit_vector(), angle))
        .fold(UnitQuaternion::identity(), |acc, rotation| {
            if order.is_intrinsic() {
                acc * rotation
            } else {
                rotation * acc
            }
        })
}

fn rotation_from_matrix(matrix: &Matrix3<f64>) -> Result<UnitQuaternion<f64>, Error> {
    if !matrix.iter().all(|v| v.is_finite()) || matrix.determinant() < MINIMUM_ROTATION_SCALE {
        return Err(Error::InvalidRotation {
            reason: "the rotation matrix must be finite with a positive determinant".to_string(),
        });
    }

    // Recorded matrices are rarely exactly orthonormal, so the quaternion is renormalized
    let rotation = Rotation3::from_matrix_unchecked(*matrix);
    let q = UnitQuaternion::from_rotation_matrix(&rotation).into_inner();
    Ok(UnitQuaternion::new_normalize(q))
}

fn rotation_from_quaternion(
    values: &[f64],
    order: QuaternionOrder,
) -> Result<UnitQuaternion<f64>, Error> {
    let q = match order {
        QuaternionOrder::Xyzw => Quaternion::new(values[3], values[0], values[1], values[2]),
        QuaternionOrder::Wxyz => Quaternion::new(values[0], values[1], values[2], values[3]),
    };

    if !q.norm().is_finite() || q.norm() < MINIMUM_ROTATION_SCALE {
        return Err(Error::InvalidRotation {
            reason: "the quaternion must have a finite, non-zero norm".to_string(),
        });
    }

    Ok(UnitQuaternion::from_quaternion(q))
}

fn to_radians(value: f64, units: AngleUnits) -> f64 {
    match units {
        AngleUnits::Degrees => value.to_radians(),
        AngleUnits::Radians => value,
    }
}
