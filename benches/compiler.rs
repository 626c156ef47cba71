use criterion::{black_box, criterion_group, criterion_main, Criterion};
use joint_import_transforms::{
    importer::{config::ImportConfig, format::DataKind},
    joint_limits::JointLimits,
};

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        import_config_from_json_str,
        import_config_compile,
        compiled_import_config_apply,
}

criterion_main!(benches);

const JOINT_POSITIONS: &str = r#"{
    "format": { "angle_units": "degrees" },
    "mapping": [
        { "name": "joint_1" },
        { "name": "joint_2", "inverted": true },
        { "name": "joint_3", "offset": 0.1 },
        { "name": "joint_4" },
        { "name": "joint_5", "inverted": true, "offset": -0.2 },
        { "name": "joint_6" }
    ]
}"#;

const GRIPPER: &str = r#"{
    "format": {
        "visual_joint_type": "gripper",
        "normalize": { "min": 0.0, "max": 85.0 },
        "invert_gripper_amount": true
    },
    "mapping": [
        { "name": "left_finger", "index": 0 },
        { "name": "right_finger", "index": 0 }
    ]
}"#;

pub fn import_config_from_json_str(c: &mut Criterion) {
    c.bench_function("ImportConfig::from_json_str", |b| {
        b.iter(|| ImportConfig::from_json_str(DataKind::JointPositions, black_box(JOINT_POSITIONS)))
    });
}

pub fn import_config_compile(c: &mut Criterion) {
    let config = ImportConfig::from_json_str(DataKind::JointPositions, JOINT_POSITIONS).unwrap();

    c.bench_function("ImportConfig::compile", |b| b.iter(|| config.compile()));
}

pub fn compiled_import_config_apply(c: &mut Criterion) {
    let config = ImportConfig::from_json_str(DataKind::VisualJointPositions, GRIPPER).unwrap();
    let mut compiled = config.compile().unwrap();
    let limits = JointLimits::new(0.0, 0.04).unwrap();
    compiled.bind_joint_limits("left_finger", &limits).unwrap();
    compiled.bind_joint_limits("right_finger", &limits).unwrap();

    let row = [42.5];
    c.bench_function("CompiledImportConfig::apply (gripper)", |b| {
        b.iter(|| compiled.apply(black_box(&row)))
    });
}
