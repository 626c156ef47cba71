use super::*;
use crate::importer::{
    format::{
        EulerOrder, JointTorquesFormat, JointVelocitiesFormat, NormalizationBounds,
        OrientationFormat,
    },
    mapping::IndexRange,
};

fn positions_format(angle_units: AngleUnits) -> ImportFormat {
    ImportFormat::JointPositions(JointPositionsFormat {
        angle_units,
        ..JointPositionsFormat::default()
    })
}

fn gripper_format(
    normalize: Option<NormalizationBounds>,
    invert_gripper_amount: bool,
) -> ImportFormat {
    ImportFormat::VisualJointPositions(VisualJointPositionsFormat {
        visual_joint_kind: VisualJointKind::Gripper,
        angle_units: AngleUnits::Radians,
        normalize,
        invert_gripper_amount,
    })
}

#[test]
fn when_compiling_radian_positions_should_only_reduce_to_a_scalar() {
    let format = positions_format(AngleUnits::Radians);
    let mapping = vec![MappingItem::new("a").with_index(0)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].transforms(), &[Transform::NumpyToScalar]);
}

#[test]
fn when_compiling_degree_positions_should_convert_before_the_item_adjustments() {
    let format = positions_format(AngleUnits::Degrees);
    let mapping = vec![MappingItem::new("a")
        .with_index(0)
        .with_inverted(true)
        .with_offset(0.1)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[
            Transform::DegreesToRadians,
            Transform::FlipSign,
            Transform::Offset { value: 0.1 },
            Transform::NumpyToScalar,
        ]
    );
}

#[test]
fn when_compiling_multiple_items_should_give_each_its_own_adjustments() {
    let format = positions_format(AngleUnits::Degrees);
    let mapping = vec![
        MappingItem::new("a").with_index(0).with_inverted(true),
        MappingItem::new("b").with_index(1).with_offset(-2.0),
    ];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[
            Transform::DegreesToRadians,
            Transform::FlipSign,
            Transform::NumpyToScalar,
        ]
    );
    assert_eq!(
        sequences[1].transforms(),
        &[
            Transform::DegreesToRadians,
            Transform::Offset { value: -2.0 },
            Transform::NumpyToScalar,
        ]
    );
}

#[test]
fn when_compiling_velocities_should_use_the_angle_units() {
    let format = ImportFormat::JointVelocities(JointVelocitiesFormat {
        angle_units: AngleUnits::Degrees,
    });
    let mapping = vec![MappingItem::new("a").with_index(0)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[Transform::DegreesToRadians, Transform::NumpyToScalar]
    );
}

#[test]
fn when_compiling_newton_centimeter_torques_should_scale_to_newton_meters() {
    let format = ImportFormat::JointTorques(JointTorquesFormat {
        torque_units: TorqueUnits::Ncm,
    });
    let mapping = vec![MappingItem::new("a").with_index(0)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[Transform::Scale { factor: 0.01 }, Transform::NumpyToScalar]
    );
}

#[test]
fn when_compiling_newton_meter_torques_should_not_scale() {
    let format = ImportFormat::JointTorques(JointTorquesFormat::default());
    let mapping = vec![MappingItem::new("a").with_index(0)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(sequences[0].transforms(), &[Transform::NumpyToScalar]);
}

#[test]
fn when_compiling_a_gripper_should_end_with_the_pending_joint_limits() {
    let format = gripper_format(Some(NormalizationBounds { min: 0.0, max: 80.0 }), true);
    let mapping = vec![MappingItem::new("finger").with_index(2)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[
            Transform::Normalize { min: 0.0, max: 80.0 },
            Transform::Clip { min: 0.0, max: 1.0 },
            Transform::FlipSign,
            Transform::Offset { value: 1.0 },
            Transform::PendingJointLimits,
            Transform::NumpyToScalar,
        ]
    );
}

#[test]
fn when_compiling_a_gripper_without_normalization_should_only_clip() {
    let format = gripper_format(None, false);
    let mapping = vec![MappingItem::new("finger").with_index(0)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[
            Transform::Clip { min: 0.0, max: 1.0 },
            Transform::PendingJointLimits,
            Transform::NumpyToScalar,
        ]
    );
}

#[test]
fn when_compiling_custom_visual_joints_should_use_the_angle_units() {
    let format = ImportFormat::VisualJointPositions(VisualJointPositionsFormat {
        angle_units: AngleUnits::Degrees,
        ..VisualJointPositionsFormat::default()
    });
    let mapping = vec![MappingItem::new("a").with_index(0)];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[Transform::DegreesToRadians, Transform::NumpyToScalar]
    );
}

#[test]
fn when_compiling_a_matrix_pose_should_only_decompose() {
    let format = ImportFormat::JointPositions(JointPositionsFormat {
        joint_position_kind: JointPositionKind::EndEffector,
        pose_kind: PoseKind::Matrix,
        ..JointPositionsFormat::default()
    });
    let mapping = vec![MappingItem::new("tcp")];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[Transform::Pose(PoseDecomposition::new(PoseLayout::Matrix))]
    );
}

#[test]
fn when_compiling_an_euler_pose_should_carry_the_orientation_format() {
    let order = "ZYX".parse::<EulerOrder>().unwrap();
    let mut orientation = OrientationFormat::new(RotationKind::Euler);
    orientation.angle_units = AngleUnits::Degrees;
    orientation.euler_order = Some(order);

    let format = ImportFormat::JointPositions(JointPositionsFormat {
        joint_position_kind: JointPositionKind::EndEffector,
        pose_kind: PoseKind::PositionOrientation,
        orientation: Some(orientation),
        ..JointPositionsFormat::default()
    });
    let mapping =
        vec![MappingItem::new("tcp").with_index_range(IndexRange::new(0, 6).unwrap())];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[Transform::Pose(PoseDecomposition::new(
            PoseLayout::PositionOrientation {
                rotation_kind: RotationKind::Euler,
                angle_units: AngleUnits::Degrees,
                sequence: RotationSequence::Euler(order),
            }
        ))]
    );
}

#[test]
fn when_compiling_a_quaternion_pose_should_carry_the_component_order() {
    let mut orientation = OrientationFormat::new(RotationKind::Quaternion);
    orientation.quaternion_order = Some(QuaternionOrder::Wxyz);

    let format = ImportFormat::JointPositions(JointPositionsFormat {
        joint_position_kind: JointPositionKind::EndEffector,
        pose_kind: PoseKind::PositionOrientation,
        orientation: Some(orientation),
        ..JointPositionsFormat::default()
    });
    let mapping =
        vec![MappingItem::new("tcp").with_index_range(IndexRange::new(0, 7).unwrap())];

    let sequences = compile(&format, &mapping).unwrap();

    assert_eq!(
        sequences[0].transforms(),
        &[Transform::Pose(PoseDecomposition::new(
            PoseLayout::PositionOrientation {
                rotation_kind: RotationKind::Quaternion,
                angle_units: AngleUnits::Radians,
                sequence: RotationSequence::Quaternion(QuaternionOrder::Wxyz),
            }
        ))]
    );
}

#[test]
fn when_compiling_a_pose_without_orientation_should_fail() {
    let format = ImportFormat::JointPositions(JointPositionsFormat {
        joint_position_kind: JointPositionKind::EndEffector,
        pose_kind: PoseKind::PositionOrientation,
        ..JointPositionsFormat::default()
    });
    let mapping = vec![MappingItem::new("tcp")];

    let result = compile(&format, &mapping);

    assert!(
        matches!(result, Err(Error::MissingRequiredField { ref field, .. }) if field == "orientation")
    );
}

#[test]
fn when_compiling_an_empty_mapping_should_return_no_sequences() {
    let format = positions_format(AngleUnits::Degrees);

    let sequences = compile(&format, &[]).unwrap();

    assert!(sequences.is_empty());
}
