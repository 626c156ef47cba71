use super::*;

#[test]
fn when_reading_a_scalar_sample_should_expose_one_value() {
    let sample = Sample::from(2.5);

    assert_eq!(sample.len(), 1);
    assert!(!sample.is_empty());
    assert_eq!(sample.values(), &[2.5]);
    assert_eq!(sample.as_scalar(), Some(2.5));
}

#[test]
fn when_reading_an_array_sample_should_expose_all_values() {
    let sample = Sample::from(vec![1.0, 2.0, 3.0]);

    assert_eq!(sample.len(), 3);
    assert_eq!(sample.values(), &[1.0, 2.0, 3.0]);
    assert_eq!(sample.as_scalar(), None);
}

#[test]
fn when_converting_an_array_into_a_scalar_should_fail() {
    let sample = Sample::from(&[1.0][..]);

    assert_eq!(sample.into_scalar(), Err(Error::NonScalarOutput { len: 1 }));
}

#[test]
fn when_mapping_an_array_should_apply_to_every_value() {
    let sample = Sample::from(vec![1.0, -2.0]).map(|v| v * 2.0);

    assert_eq!(sample, Sample::Array(vec![2.0, -4.0]));
}

#[test]
fn when_deserializing_a_sample_should_accept_scalars_and_arrays() {
    let scalar: Sample = serde_json::from_str("1.5").unwrap();
    let array: Sample = serde_json::from_str("[1.0, 2.0]").unwrap();

    assert_eq!(scalar, Sample::Scalar(1.5));
    assert_eq!(array, Sample::Array(vec![1.0, 2.0]));
}
