/// Defines the numeric samples that flow through the transforms
pub mod sample;

/// Defines the transform primitives
pub mod primitive;

/// Provides the decomposition of packed poses
pub mod pose;

/// Defines ordered sequences of transform primitives
pub mod sequence;
