use std::f64::consts::FRAC_1_SQRT_2;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use joint_import_transforms::{
    importer::format::{AngleUnits, EulerOrder, RotationKind},
    transforms::{
        pose::{PoseDecomposition, PoseLayout, RotationSequence},
        primitive::Transform,
        sample::Sample,
        sequence::TransformSequence,
    },
};

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        transform_sequence_apply_scalar,
        transform_sequence_apply_gripper,
        pose_decomposition_matrix,
        pose_decomposition_quaternion,
        pose_decomposition_euler,
}

criterion_main!(benches);

pub fn transform_sequence_apply_scalar(c: &mut Criterion) {
    let sequence = TransformSequence::new(vec![
        Transform::DegreesToRadians,
        Transform::FlipSign,
        Transform::Offset { value: 0.1 },
        Transform::NumpyToScalar,
    ]);

    c.bench_function("TransformSequence::apply (degrees)", |b| {
        b.iter(|| sequence.apply(black_box(Sample::Scalar(90.0))))
    });
}

pub fn transform_sequence_apply_gripper(c: &mut Criterion) {
    let sequence = TransformSequence::new(vec![
        Transform::Normalize { min: 0.0, max: 85.0 },
        Transform::Clip { min: 0.0, max: 1.0 },
        Transform::FlipSign,
        Transform::Offset { value: 1.0 },
        Transform::Unnormalize {
            min: 0.0,
            max: 0.04,
        },
        Transform::NumpyToScalar,
    ]);

    c.bench_function("TransformSequence::apply (gripper)", |b| {
        b.iter(|| sequence.apply(black_box(Sample::Scalar(42.5))))
    });
}

pub fn pose_decomposition_matrix(c: &mut Criterion) {
    let decomposition = PoseDecomposition::new(PoseLayout::Matrix);
    let matrix = [
        0.0, -1.0, 0.0, 1.0, //
        1.0, 0.0, 0.0, 2.0, //
        0.0, 0.0, 1.0, 3.0, //
        0.0, 0.0, 0.0, 1.0,
    ];

    c.bench_function("PoseDecomposition::canonical_pose (matrix)", |b| {
        b.iter(|| decomposition.canonical_pose(black_box(&matrix)))
    });
}

pub fn pose_decomposition_quaternion(c: &mut Criterion) {
    let decomposition = PoseDecomposition::new(PoseLayout::PositionOrientation {
        rotation_kind: RotationKind::Quaternion,
        angle_units: AngleUnits::Radians,
        sequence: RotationSequence::default(),
    });
    let values = [1.0, 2.0, 3.0, 0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2];

    c.bench_function("PoseDecomposition::canonical_pose (quaternion)", |b| {
        b.iter(|| decomposition.canonical_pose(black_box(&values)))
    });
}

pub fn pose_decomposition_euler(c: &mut Criterion) {
    let sequence = RotationSequence::Euler("ZYX".parse::<EulerOrder>().unwrap());
    let decomposition = PoseDecomposition::new(PoseLayout::PositionOrientation {
        rotation_kind: RotationKind::Euler,
        angle_units: AngleUnits::Degrees,
        sequence,
    });
    let values = [1.0, 2.0, 3.0, 30.0, -45.0, 90.0];

    c.bench_function("PoseDecomposition::canonical_pose (euler)", |b| {
        b.iter(|| decomposition.canonical_pose(black_box(&values)))
    });
}
