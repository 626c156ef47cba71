use super::*;
use crate::{
    importer::format::{AngleUnits, RotationKind},
    transforms::pose::{PoseDecomposition, PoseLayout, RotationSequence},
};

fn gripper_sequence() -> TransformSequence {
    TransformSequence::new(vec![
        Transform::Clip { min: 0.0, max: 1.0 },
        Transform::FlipSign,
        Transform::Offset { value: 1.0 },
        Transform::PendingJointLimits,
    ])
}

fn pose_sequence() -> TransformSequence {
    TransformSequence::new(vec![Transform::Pose(PoseDecomposition::new(
        PoseLayout::PositionOrientation {
            rotation_kind: RotationKind::Quaternion,
            angle_units: AngleUnits::Radians,
            sequence: RotationSequence::default(),
        },
    ))])
}

#[test]
fn when_applying_an_empty_sequence_should_return_the_sample() {
    let sequence = TransformSequence::default();

    assert!(sequence.is_empty());
    assert_eq!(sequence.apply(Sample::Scalar(1.25)), Ok(Sample::Scalar(1.25)));
}

#[test]
fn when_applying_a_sequence_should_apply_the_primitives_in_order() {
    let scale_then_offset = TransformSequence::new(vec![
        Transform::Scale { factor: 2.0 },
        Transform::Offset { value: 1.0 },
    ]);
    let offset_then_scale = TransformSequence::new(vec![
        Transform::Offset { value: 1.0 },
        Transform::Scale { factor: 2.0 },
    ]);

    assert_eq!(scale_then_offset.apply(Sample::Scalar(3.0)), Ok(Sample::Scalar(7.0)));
    assert_eq!(offset_then_scale.apply(Sample::Scalar(3.0)), Ok(Sample::Scalar(8.0)));
}

#[test]
fn when_a_primitive_fails_should_return_its_error() {
    let sequence = TransformSequence::new(vec![
        Transform::Scale { factor: 2.0 },
        Transform::Normalize { min: 1.0, max: 1.0 },
        Transform::Offset { value: 1.0 },
    ]);

    assert_eq!(
        sequence.apply(Sample::Scalar(3.0)),
        Err(Error::DivideByZero { value: 1.0 })
    );
}

#[test]
fn when_applying_to_all_samples_should_keep_the_order() {
    let sequence = TransformSequence::new(vec![Transform::FlipSign]);

    let result = sequence
        .apply_all(vec![Sample::Scalar(1.0), Sample::Scalar(-2.0)])
        .unwrap();

    assert_eq!(result, vec![Sample::Scalar(-1.0), Sample::Scalar(2.0)]);
}

#[test]
fn when_applying_for_a_scalar_to_an_array_output_should_fail() {
    let sequence = TransformSequence::new(vec![Transform::FlipSign]);

    assert_eq!(
        sequence.apply_scalar(Sample::Array(vec![1.0, 2.0])),
        Err(Error::NonScalarOutput { len: 2 })
    );
    assert_eq!(sequence.apply_scalar(Sample::Scalar(2.0)), Ok(-2.0));
}

#[test]
fn when_applying_the_same_sequence_twice_should_give_the_same_result() {
    let sequence = gripper_sequence();

    let first = sequence.apply(Sample::Scalar(0.3)).unwrap();
    let second = sequence.apply(Sample::Scalar(0.3)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn when_binding_joint_limits_should_replace_the_placeholder() {
    let mut sequence = gripper_sequence();
    assert!(sequence.has_pending());

    let limits = JointLimits::new(0.0, 0.04).unwrap();
    assert!(sequence.bind_joint_limits(&limits));

    assert!(!sequence.has_pending());
    assert_eq!(
        sequence.transforms().last(),
        Some(&Transform::Unnormalize {
            min: 0.0,
            max: 0.04
        })
    );
    assert_eq!(sequence.len(), 4);
}

#[test]
fn when_binding_joint_limits_without_a_placeholder_should_change_nothing() {
    let mut sequence = TransformSequence::new(vec![Transform::FlipSign]);
    let limits = JointLimits::new(0.0, 1.0).unwrap();

    assert!(!sequence.bind_joint_limits(&limits));
    assert_eq!(sequence.transforms(), &[Transform::FlipSign]);
}

#[test]
fn when_cloning_a_sequence_should_not_share_the_primitives() {
    let original = gripper_sequence();
    let mut copy = original.clone();

    copy.bind_joint_limits(&JointLimits::new(-1.0, 1.0).unwrap());

    assert!(original.has_pending());
    assert!(!copy.has_pending());
}

#[test]
fn when_selecting_a_pose_component_should_emit_the_scalar() {
    let sequence = pose_sequence();

    let selected = sequence.select_pose_component(PoseComponent::Y).unwrap();

    assert_eq!(
        selected.apply(Sample::Array(vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0])),
        Ok(Sample::Scalar(2.0))
    );
    assert_eq!(
        sequence
            .apply(Sample::Array(vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]))
            .unwrap()
            .len(),
        7
    );
}

#[test]
fn when_selecting_a_pose_component_without_a_pose_should_return_none() {
    let sequence = gripper_sequence();

    assert!(sequence.select_pose_component(PoseComponent::X).is_none());
}

#[test]
fn when_formatting_should_list_the_primitives() {
    let sequence = TransformSequence::new(vec![
        Transform::DegreesToRadians,
        Transform::FlipSign,
        Transform::NumpyToScalar,
    ]);

    assert_eq!(
        sequence.to_string(),
        "[DegreesToRadians, FlipSign, NumpyToScalar]"
    );
    assert_eq!(TransformSequence::default().to_string(), "[]");
}

#[test]
fn when_serializing_should_write_a_list_of_primitives() {
    let sequence = TransformSequence::new(vec![Transform::Scale { factor: 0.5 }]);

    let json = serde_json::to_string(&sequence).unwrap();

    assert_eq!(json, r#"[{"type":"Scale","factor":0.5}]"#);
}
