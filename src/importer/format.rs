//! Defines the format options of the different import kinds.
//!
//! Every enumerated option that can appear in an import configuration is modelled as an enum.
//! Strings are only turned into these enums at the configuration boundary through their
//! [FromStr] implementations, which is the only place where an unknown value can show up.

use std::{fmt::Display, str::FromStr};

use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;

/// Defines the units in which angles are recorded.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnits {
    /// Angles are recorded in degrees.
    Degrees,
    /// Angles are recorded in radians.
    #[default]
    Radians,
}

impl AngleUnits {
    /// Returns the configuration name of the units.
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleUnits::Degrees => "degrees",
            AngleUnits::Radians => "radians",
        }
    }
}

impl FromStr for AngleUnits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degrees" => Ok(AngleUnits::Degrees),
            "radians" => Ok(AngleUnits::Radians),
            _ => Err(invalid_kind("angle_units", s)),
        }
    }
}

/// Defines the units in which torques are recorded. The unit names are not case sensitive.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum TorqueUnits {
    /// Newton meters.
    #[default]
    Nm,
    /// Newton centimeters.
    Ncm,
}

impl TorqueUnits {
    /// Returns the configuration name of the units.
    pub fn as_str(&self) -> &'static str {
        match self {
            TorqueUnits::Nm => "Nm",
            TorqueUnits::Ncm => "Ncm",
        }
    }
}

impl FromStr for TorqueUnits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("nm") {
            Ok(TorqueUnits::Nm)
        } else if s.eq_ignore_ascii_case("ncm") {
            Ok(TorqueUnits::Ncm)
        } else {
            Err(invalid_kind("torque_units", s))
        }
    }
}

impl TryFrom<String> for TorqueUnits {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TorqueUnits> for String {
    fn from(value: TorqueUnits) -> Self {
        value.as_str().to_string()
    }
}

/// Defines how joint positions are recorded.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JointPositionKind {
    /// Every joint position is recorded in its own channel.
    #[default]
    Custom,
    /// The pose of the end-effector (tool center point) is recorded instead of the joint
    /// positions.
    EndEffector,
}

impl JointPositionKind {
    /// Returns the configuration name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            JointPositionKind::Custom => "custom",
            JointPositionKind::EndEffector => "end_effector",
        }
    }
}

impl FromStr for JointPositionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(JointPositionKind::Custom),
            "end_effector" => Ok(JointPositionKind::EndEffector),
            _ => Err(invalid_kind("joint_position_type", s)),
        }
    }
}

/// Defines how a pose is packed into the recorded data.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseKind {
    /// The pose is recorded as a homogeneous transformation matrix.
    Matrix,
    /// The pose is recorded as a position followed by an orientation.
    #[default]
    PositionOrientation,
}

impl PoseKind {
    /// Returns the configuration name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PoseKind::Matrix => "matrix",
            PoseKind::PositionOrientation => "position_orientation",
        }
    }
}

impl FromStr for PoseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matrix" => Ok(PoseKind::Matrix),
            "position_orientation" => Ok(PoseKind::PositionOrientation),
            _ => Err(invalid_kind("pose_type", s)),
        }
    }
}

/// Defines how the orientation part of a pose is recorded.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationKind {
    /// A unit quaternion.
    Quaternion,
    /// Three Euler angles.
    Euler,
    /// A rotation vector, i.e. the rotation axis scaled by the rotation angle.
    AxisAngle,
    /// A 3x3 rotation matrix in row-major order.
    Matrix,
}

impl RotationKind {
    /// Returns the configuration name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationKind::Quaternion => "quaternion",
            RotationKind::Euler => "euler",
            RotationKind::AxisAngle => "axis_angle",
            RotationKind::Matrix => "matrix",
        }
    }

    /// Returns the required length of the index range of an end-effector pose with an
    /// orientation of the current kind.
    ///
    /// Quaternion, Euler angle and axis-angle poses are a position followed by the orientation.
    /// Rotation matrix poses are read as the 9 values of the matrix in row-major order.
    pub fn index_range_len(&self) -> usize {
        match self {
            RotationKind::Quaternion => POSITION_LEN + 4,
            RotationKind::Euler | RotationKind::AxisAngle => POSITION_LEN + 3,
            RotationKind::Matrix => 9,
        }
    }

    /// Returns the number of values that make up an orientation of the current kind.
    pub fn orientation_len(&self) -> usize {
        match self {
            RotationKind::Quaternion => 4,
            RotationKind::Euler | RotationKind::AxisAngle => 3,
            RotationKind::Matrix => 9,
        }
    }
}

impl Display for RotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quaternion" => Ok(RotationKind::Quaternion),
            "euler" => Ok(RotationKind::Euler),
            "axis_angle" => Ok(RotationKind::AxisAngle),
            "matrix" => Ok(RotationKind::Matrix),
            _ => Err(Error::UnsupportedRotationKind {
                value: s.to_string(),
            }),
        }
    }
}

/// The number of values used to store a position.
pub const POSITION_LEN: usize = 3;

/// Defines the order in which the components of a quaternion are recorded.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuaternionOrder {
    /// The vector part first, followed by the scalar part.
    #[default]
    Xyzw,
    /// The scalar part first, followed by the vector part.
    Wxyz,
}

impl QuaternionOrder {
    /// Returns the configuration name of the order.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuaternionOrder::Xyzw => "xyzw",
            QuaternionOrder::Wxyz => "wxyz",
        }
    }
}

impl FromStr for QuaternionOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xyzw" => Ok(QuaternionOrder::Xyzw),
            "wxyz" => Ok(QuaternionOrder::Wxyz),
            _ => Err(invalid_kind("quaternion_order", s)),
        }
    }
}

/// Defines one of the three coordinate axes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis {
    /// The X-axis
    X,
    /// The Y-axis
    Y,
    /// The Z-axis
    Z,
}

impl Axis {
    /// Returns the unit vector along the axis.
    pub fn unit_vector(&self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    fn as_char(&self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

/// Defines the axis sequence of a set of Euler angles.
///
/// The sequence is written as three axis letters. Lower case letters (e.g. `xyz`) indicate
/// extrinsic rotations, i.e. rotations around the axes of the fixed frame. Upper case letters
/// (e.g. `ZYX`) indicate intrinsic rotations, i.e. rotations around the axes of the rotating
/// frame. Two consecutive axes may not be the same.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct EulerOrder {
    /// The axes in the order in which the angles are recorded.
    axes: [Axis; 3],

    /// Indicates if the rotations are intrinsic or extrinsic.
    intrinsic: bool,
}

impl EulerOrder {
    /// Returns the axes in the order in which the angles are recorded.
    pub fn axes(&self) -> &[Axis; 3] {
        &self.axes
    }

    /// Returns a value indicating if the rotations are around the axes of the rotating frame.
    pub fn is_intrinsic(&self) -> bool {
        self.intrinsic
    }

    /// Creates a new [EulerOrder].
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidFormatKind] - Returned when two consecutive axes are the same.
    pub fn new(axes: [Axis; 3], intrinsic: bool) -> Result<Self, Error> {
        let order = Self { axes, intrinsic };
        if axes[0] == axes[1] || axes[1] == axes[2] {
            return Err(invalid_kind("euler_order", &order.to_string()));
        }

        Ok(order)
    }
}

impl Display for EulerOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for axis in self.axes.iter() {
            let c = axis.as_char();
            if self.intrinsic {
                write!(f, "{}", c.to_ascii_uppercase())?;
            } else {
                write!(f, "{}", c)?;
            }
        }

        Ok(())
    }
}

impl FromStr for EulerOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 3 {
            return Err(invalid_kind("euler_order", s));
        }

        let intrinsic = chars.iter().all(|c| c.is_ascii_uppercase());
        let extrinsic = chars.iter().all(|c| c.is_ascii_lowercase());
        if !intrinsic && !extrinsic {
            return Err(invalid_kind("euler_order", s));
        }

        let mut axes = [Axis::X; 3];
        for (axis, c) in axes.iter_mut().zip(chars.iter()) {
            *axis = match c.to_ascii_lowercase() {
                'x' => Axis::X,
                'y' => Axis::Y,
                'z' => Axis::Z,
                _ => return Err(invalid_kind("euler_order", s)),
            };
        }

        EulerOrder::new(axes, intrinsic)
    }
}

impl TryFrom<String> for EulerOrder {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EulerOrder> for String {
    fn from(value: EulerOrder) -> Self {
        value.to_string()
    }
}

/// Defines how visual joints are recorded.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualJointKind {
    /// The open amount of a gripper is recorded and converted into joint positions from the
    /// joint limits of the gripper.
    Gripper,
    /// Every visual joint position is recorded in its own channel.
    #[default]
    Custom,
}

impl VisualJointKind {
    /// Returns the configuration name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualJointKind::Gripper => "gripper",
            VisualJointKind::Custom => "custom",
        }
    }
}

impl FromStr for VisualJointKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gripper" => Ok(VisualJointKind::Gripper),
            "custom" => Ok(VisualJointKind::Custom),
            _ => Err(invalid_kind("visual_joint_type", s)),
        }
    }
}

/// Defines the different kinds of data that can be imported.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Joint positions, either per joint or derived from an end-effector pose.
    JointPositions,
    /// Joint velocities.
    JointVelocities,
    /// Joint torques.
    JointTorques,
    /// Positions of joints that are only used for visualization, e.g. gripper fingers.
    VisualJointPositions,
}

impl DataKind {
    /// Returns the name used for configurations of the current kind in error messages.
    pub fn config_name(&self) -> &'static str {
        match self {
            DataKind::JointPositions => "JointPositionsDataImportConfig",
            DataKind::JointVelocities => "JointVelocitiesDataImportConfig",
            DataKind::JointTorques => "JointTorquesDataImportConfig",
            DataKind::VisualJointPositions => "VisualJointPositionsDataImportConfig",
        }
    }
}

impl FromStr for DataKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "joint_positions" => Ok(DataKind::JointPositions),
            "joint_velocities" => Ok(DataKind::JointVelocities),
            "joint_torques" => Ok(DataKind::JointTorques),
            "visual_joint_positions" => Ok(DataKind::VisualJointPositions),
            _ => Err(invalid_kind("data_kind", s)),
        }
    }
}

/// Describes how the orientation part of a pose is recorded.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct OrientationFormat {
    /// The representation of the orientation.
    pub rotation_kind: RotationKind,

    /// The units of the angles for Euler angle and axis-angle orientations.
    pub angle_units: AngleUnits,

    /// The component order. Required for quaternion orientations.
    pub quaternion_order: Option<QuaternionOrder>,

    /// The axis sequence. Required for Euler angle orientations.
    pub euler_order: Option<EulerOrder>,
}

impl OrientationFormat {
    /// Creates a new [OrientationFormat] for the given rotation kind with angles in radians and
    /// no component orders.
    pub fn new(rotation_kind: RotationKind) -> Self {
        Self {
            rotation_kind,
            angle_units: AngleUnits::Radians,
            quaternion_order: None,
            euler_order: None,
        }
    }
}

/// The value range used to normalize a gripper open amount.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct NormalizationBounds {
    /// The recorded value that corresponds to 0.0.
    pub min: f64,

    /// The recorded value that corresponds to 1.0.
    pub max: f64,
}

/// The format of imported joint positions.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct JointPositionsFormat {
    /// Indicates if joint positions or an end-effector pose is recorded.
    pub joint_position_kind: JointPositionKind,

    /// The units of recorded joint angles.
    pub angle_units: AngleUnits,

    /// The packing of an end-effector pose.
    pub pose_kind: PoseKind,

    /// The orientation format of an end-effector pose. Required for
    /// [PoseKind::PositionOrientation] poses.
    pub orientation: Option<OrientationFormat>,
}

/// The format of imported joint velocities.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct JointVelocitiesFormat {
    /// The angle units of the recorded angular velocities (per second).
    pub angle_units: AngleUnits,
}

/// The format of imported joint torques.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct JointTorquesFormat {
    /// The units of the recorded torques.
    pub torque_units: TorqueUnits,
}

/// The format of imported visual joint positions.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct VisualJointPositionsFormat {
    /// Indicates if a gripper open amount or the joint positions are recorded.
    pub visual_joint_kind: VisualJointKind,

    /// The units of recorded joint angles.
    pub angle_units: AngleUnits,

    /// The range of the recorded gripper open amount. If not provided the open amount is
    /// assumed to be recorded in the range [0, 1].
    pub normalize: Option<NormalizationBounds>,

    /// Indicates that the recorded value is a close amount rather than an open amount.
    pub invert_gripper_amount: bool,
}

/// The format of one import configuration.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportFormat {
    /// The format for joint positions.
    JointPositions(JointPositionsFormat),
    /// The format for joint velocities.
    JointVelocities(JointVelocitiesFormat),
    /// The format for joint torques.
    JointTorques(JointTorquesFormat),
    /// The format for visual joint positions.
    VisualJointPositions(VisualJointPositionsFormat),
}

impl ImportFormat {
    /// Returns the name used for the configuration in error messages.
    pub fn config_name(&self) -> &'static str {
        self.data_kind().config_name()
    }

    /// Returns the kind of data the format describes.
    pub fn data_kind(&self) -> DataKind {
        match self {
            ImportFormat::JointPositions(_) => DataKind::JointPositions,
            ImportFormat::JointVelocities(_) => DataKind::JointVelocities,
            ImportFormat::JointTorques(_) => DataKind::JointTorques,
            ImportFormat::VisualJointPositions(_) => DataKind::VisualJointPositions,
        }
    }
}

fn invalid_kind(field: &str, value: &str) -> Error {
    Error::InvalidFormatKind {
        field: field.to_string(),
        value: value.to_string(),
    }
}
