//! Validates that the format of an import configuration is consistent with its mapping items.
//!
//! Validation fails on the first problem that is found. The mapping items are only changed,
//! by assigning indices, when the configuration is valid.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    importer::{
        format::{
            ImportFormat, JointPositionKind, JointPositionsFormat, OrientationFormat, PoseKind,
            RotationKind, VisualJointKind, VisualJointPositionsFormat,
        },
        mapping::{resolve_mapping_indexes, MappingItem},
    },
    Error,
};

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;

/// Validates the mapping items against the format and assigns indices to the mapping items
/// where required.
///
/// ## Errors
///
/// * [Error::DuplicateMappingName] - Returned when two mapping items have the same name.
/// * [Error::MappingIndexInconsistency] - Returned when some, but not all, mapping items have
///   an index.
/// * [Error::MappingCardinality] - Returned when an end-effector pose is mapped by anything
///   other than exactly one mapping item.
/// * [Error::MissingRequiredField] - Returned when a field required by the format is missing.
/// * [Error::IndexRangeLengthMismatch] - Returned when the index range of a pose doesn't match
///   the orientation format.
/// * [Error::InvalidNormalizationBounds] - Returned when the gripper normalization bounds are
///   not finite.
/// * [Error::DivideByZero] - Returned when the gripper normalization bounds are equal.
pub fn validate(format: &ImportFormat, mapping: &mut [MappingItem]) -> Result<(), Error> {
    let config_name = format.config_name();
    let result = validate_unique_names(mapping, config_name).and_then(|_| match format {
        ImportFormat::JointPositions(f) => validate_joint_positions(f, mapping, config_name),
        ImportFormat::JointVelocities(_) | ImportFormat::JointTorques(_) => {
            resolve_mapping_indexes(mapping, config_name)
        }
        ImportFormat::VisualJointPositions(f) => {
            validate_visual_joint_positions(f, mapping, config_name)
        }
    });

    if let Err(e) = &result {
        debug!(config = config_name, error = %e, "Rejected import configuration");
    }

    result
}

/// Returns the orientation format of an end-effector pose with position and orientation.
///
/// ## Errors
///
/// * [Error::MissingRequiredField] - Returned when the orientation is missing, or when the
///   component order required by the rotation kind is missing.
pub(crate) fn required_orientation(
    format: &JointPositionsFormat,
) -> Result<&OrientationFormat, Error> {
    let orientation = match &format.orientation {
        Some(o) => o,
        None => {
            return Err(missing_field(
                "orientation",
                "required when pose_type is 'position_orientation'",
            ))
        }
    };

    match orientation.rotation_kind {
        RotationKind::Quaternion if orientation.quaternion_order.is_none() => Err(missing_field(
            "quaternion_order",
            "required when the orientation type is 'quaternion'",
        )),
        RotationKind::Euler if orientation.euler_order.is_none() => Err(missing_field(
            "euler_order",
            "required when the orientation type is 'euler'",
        )),
        _ => Ok(orientation),
    }
}

fn missing_field(field: &str, reason: &str) -> Error {
    Error::MissingRequiredField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_end_effector(
    format: &JointPositionsFormat,
    mapping: &[MappingItem],
) -> Result<(), Error> {
    if format.pose_kind == PoseKind::PositionOrientation {
        required_orientation(format)?;
    }

    if mapping.len() != 1 {
        return Err(Error::MappingCardinality {
            expected: 1,
            actual: mapping.len(),
            reason: "Only one mapping item is allowed when converting from TCP to joint positions"
                .to_string(),
        });
    }

    // Matrix poses are decomposed from whatever the item reads, the length is checked when
    // the pose is decomposed
    if format.pose_kind == PoseKind::Matrix {
        return Ok(());
    }

    let range = match mapping[0].index_range() {
        Some(r) => r,
        None => {
            return Err(missing_field(
                "index_range",
                "index_range is required for pose data points",
            ))
        }
    };

    let rotation_kind = required_orientation(format)?.rotation_kind;
    let expected = rotation_kind.index_range_len();
    if range.len() != expected {
        return Err(Error::IndexRangeLengthMismatch {
            rotation_kind: rotation_kind.to_string(),
            expected,
            actual: range.len(),
        });
    }

    Ok(())
}

fn validate_joint_positions(
    format: &JointPositionsFormat,
    mapping: &mut [MappingItem],
    config_name: &str,
) -> Result<(), Error> {
    match format.joint_position_kind {
        JointPositionKind::Custom => resolve_mapping_indexes(mapping, config_name),
        JointPositionKind::EndEffector => validate_end_effector(format, mapping),
    }
}

fn validate_visual_joint_positions(
    format: &VisualJointPositionsFormat,
    mapping: &mut [MappingItem],
    config_name: &str,
) -> Result<(), Error> {
    match format.visual_joint_kind {
        VisualJointKind::Gripper => {
            if let Some(item) = mapping.iter().find(|item| item.index().is_none()) {
                return Err(missing_field(
                    "index",
                    &format!(
                        "all indexes must be provided for gripper visual joint positions, \
                         mapping item '{}' has none",
                        item.name()
                    ),
                ));
            }

            if let Some(bounds) = &format.normalize {
                if !bounds.min.is_finite() || !bounds.max.is_finite() {
                    return Err(Error::InvalidNormalizationBounds {
                        min: bounds.min,
                        max: bounds.max,
                    });
                }

                if bounds.max == bounds.min {
                    return Err(Error::DivideByZero { value: bounds.min });
                }
            }

            Ok(())
        }
        VisualJointKind::Custom => resolve_mapping_indexes(mapping, config_name),
    }
}

/// Fails on the first mapping item whose name was already used by an earlier item.
fn validate_unique_names(mapping: &[MappingItem], config_name: &str) -> Result<(), Error> {
    let mut names = HashSet::new();
    match mapping.iter().find(|item| !names.insert(item.name())) {
        Some(item) => Err(Error::DuplicateMappingName {
            config_name: config_name.to_string(),
            name: item.name().to_string(),
        }),
        None => Ok(()),
    }
}
