//! Compiles a validated import configuration into a transform sequence per mapping item.
//!
//! The unit conversions of a configuration apply to all mapping items. They are collected once
//! into a shared prefix. Each mapping item receives its own copy of that prefix, followed by
//! the transforms for the item itself.

use tracing::debug;

use crate::{
    importer::{
        format::{
            AngleUnits, ImportFormat, JointPositionKind, JointPositionsFormat, PoseKind,
            QuaternionOrder, RotationKind, TorqueUnits, VisualJointKind,
            VisualJointPositionsFormat,
        },
        mapping::MappingItem,
        validation::required_orientation,
    },
    transforms::{
        pose::{PoseDecomposition, PoseLayout, RotationSequence},
        primitive::Transform,
        sequence::TransformSequence,
    },
    Error,
};

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod compiler_tests;

/// The factor that converts Newton centimeters to Newton meters.
const NCM_TO_NM: f64 = 0.01;

/// Returns the transform sequence for each of the mapping items, in mapping order.
///
/// The mapping items are expected to have been validated against the format.
///
/// ## Errors
///
/// * [Error::MissingRequiredField] - Returned when an end-effector pose with position and
///   orientation has no orientation format.
pub fn compile(
    format: &ImportFormat,
    mapping: &[MappingItem],
) -> Result<Vec<TransformSequence>, Error> {
    let sequences = match format {
        ImportFormat::JointPositions(f) => match f.joint_position_kind {
            JointPositionKind::Custom => {
                common_item_sequences(&angle_prefix(f.angle_units), mapping)
            }
            JointPositionKind::EndEffector => {
                let pose = Transform::Pose(PoseDecomposition::new(pose_layout(f)?));
                mapping
                    .iter()
                    .map(|_| TransformSequence::new(vec![pose.clone()]))
                    .collect()
            }
        },
        ImportFormat::JointVelocities(f) => {
            common_item_sequences(&angle_prefix(f.angle_units), mapping)
        }
        ImportFormat::JointTorques(f) => {
            let prefix = match f.torque_units {
                TorqueUnits::Nm => vec![],
                TorqueUnits::Ncm => vec![Transform::Scale { factor: NCM_TO_NM }],
            };
            common_item_sequences(&prefix, mapping)
        }
        ImportFormat::VisualJointPositions(f) => {
            let prefix = match f.visual_joint_kind {
                VisualJointKind::Gripper => gripper_prefix(f),
                VisualJointKind::Custom => angle_prefix(f.angle_units),
            };
            common_item_sequences(&prefix, mapping)
        }
    };

    for (item, sequence) in mapping.iter().zip(sequences.iter()) {
        debug!(
            config = format.config_name(),
            item = item.name(),
            transforms = %sequence,
            "Compiled mapping item transforms"
        );
    }

    Ok(sequences)
}

fn angle_prefix(angle_units: AngleUnits) -> Vec<Transform> {
    match angle_units {
        AngleUnits::Degrees => vec![Transform::DegreesToRadians],
        AngleUnits::Radians => vec![],
    }
}

/// Returns a copy of the shared prefix followed by the inversion, offset and scalar conversion
/// of the mapping item.
fn common_item_sequence(prefix: &[Transform], item: &MappingItem) -> TransformSequence {
    let mut transforms = prefix.to_vec();
    if item.is_inverted() {
        transforms.push(Transform::FlipSign);
    }

    if item.offset() != 0.0 {
        transforms.push(Transform::Offset {
            value: item.offset(),
        });
    }

    transforms.push(Transform::NumpyToScalar);
    TransformSequence::new(transforms)
}

fn common_item_sequences(prefix: &[Transform], mapping: &[MappingItem]) -> Vec<TransformSequence> {
    mapping
        .iter()
        .map(|item| common_item_sequence(prefix, item))
        .collect()
}

/// Returns the transforms that turn a gripper open amount into the position of a gripper joint.
fn gripper_prefix(format: &VisualJointPositionsFormat) -> Vec<Transform> {
    let mut transforms = vec![];
    if let Some(bounds) = &format.normalize {
        transforms.push(Transform::Normalize {
            min: bounds.min,
            max: bounds.max,
        });
    }

    transforms.push(Transform::Clip { min: 0.0, max: 1.0 });

    // A close amount is turned into an open amount
    if format.invert_gripper_amount {
        transforms.push(Transform::FlipSign);
        transforms.push(Transform::Offset { value: 1.0 });
    }

    transforms.push(Transform::PendingJointLimits);
    transforms
}

fn pose_layout(format: &JointPositionsFormat) -> Result<PoseLayout, Error> {
    match format.pose_kind {
        PoseKind::Matrix => Ok(PoseLayout::Matrix),
        PoseKind::PositionOrientation => {
            let orientation = required_orientation(format)?;
            let sequence = match (orientation.rotation_kind, orientation.euler_order) {
                (RotationKind::Quaternion, _) => RotationSequence::Quaternion(
                    orientation.quaternion_order.unwrap_or(QuaternionOrder::Xyzw),
                ),
                (RotationKind::Euler, Some(order)) => RotationSequence::Euler(order),
                _ => RotationSequence::default(),
            };

            Ok(PoseLayout::PositionOrientation {
                rotation_kind: orientation.rotation_kind,
                angle_units: orientation.angle_units,
                sequence,
            })
        }
    }
}
