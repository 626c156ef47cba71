//! Defines the numeric samples that flow through a transform sequence.
//!
//! A sample is either a single value or the small array read from an index range. Shape
//! changing transforms turn arrays into scalars.

use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "sample_tests.rs"]
mod sample_tests;

/// A single numeric sample for one channel at one point in time.
///
/// Most channels carry a single value. Channels that read an index range from the raw data,
/// e.g. an end-effector pose, carry a small array of values until a transform reduces them
/// to a single value.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sample {
    /// A single value.
    Scalar(f64),
    /// A fixed size array of values.
    Array(Vec<f64>),
}

impl Sample {
    /// Returns the value if the sample is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Sample::Scalar(v) => Some(*v),
            Sample::Array(_) => None,
        }
    }

    /// Returns the consumed sample as a scalar value.
    ///
    /// ## Errors
    ///
    /// * [Error::NonScalarOutput] - Returned when the sample is an array. Single element
    ///   arrays are not converted implicitly.
    pub fn into_scalar(self) -> Result<f64, Error> {
        match self {
            Sample::Scalar(v) => Ok(v),
            Sample::Array(values) => Err(Error::NonScalarOutput { len: values.len() }),
        }
    }

    /// Returns a value indicating if the sample holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of values in the sample.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Returns the values in the sample.
    pub fn values(&self) -> &[f64] {
        match self {
            Sample::Scalar(v) => std::slice::from_ref(v),
            Sample::Array(values) => values.as_slice(),
        }
    }

    /// Applies the function to every value in the sample.
    pub(crate) fn map<F>(self, f: F) -> Sample
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Sample::Scalar(v) => Sample::Scalar(f(v)),
            Sample::Array(mut values) => {
                values.iter_mut().for_each(|v| *v = f(*v));
                Sample::Array(values)
            }
        }
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Sample::Scalar(value)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Sample::Array(values)
    }
}

impl From<&[f64]> for Sample {
    fn from(values: &[f64]) -> Self {
        Sample::Array(values.to_vec())
    }
}
