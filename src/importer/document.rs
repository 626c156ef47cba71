//! Defines the user authored configuration document.
//!
//! The document mirrors the JSON layout of an import configuration. All enumerated values are
//! kept as strings so that an unknown value is reported as a configuration error naming the
//! field, rather than as a generic parse error.

use serde::{Deserialize, Serialize};

use crate::{
    importer::{
        format::{
            AngleUnits, DataKind, EulerOrder, ImportFormat, JointPositionsFormat,
            JointTorquesFormat, JointVelocitiesFormat, NormalizationBounds, OrientationFormat,
            QuaternionOrder, RotationKind, VisualJointPositionsFormat,
        },
        mapping::{IndexRange, MappingItem},
    },
    Error,
};

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;

/// The index range of a mapping item document.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct IndexRangeDocument {
    /// The first index.
    pub start: usize,

    /// The index one past the last index.
    pub end: usize,
}

/// A mapping item document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MappingItemDocument {
    /// The name of the joint.
    pub name: String,

    /// The index of the raw value.
    #[serde(default)]
    pub index: Option<usize>,

    /// The range of raw values.
    #[serde(default)]
    pub index_range: Option<IndexRangeDocument>,

    /// Indicates that the sign of the raw value should be flipped.
    #[serde(default)]
    pub inverted: bool,

    /// The value added to the raw value.
    #[serde(default)]
    pub offset: f64,
}

/// The normalization bounds of a format document.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct NormalizationDocument {
    /// The recorded value that corresponds to 0.0.
    pub min: f64,

    /// The recorded value that corresponds to 1.0.
    pub max: f64,
}

/// The orientation part of a format document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OrientationDocument {
    /// The rotation kind: `quaternion`, `euler`, `axis_angle` or `matrix`.
    #[serde(rename = "type")]
    pub rotation_type: String,

    /// The quaternion component order: `xyzw` or `wxyz`.
    #[serde(default)]
    pub quaternion_order: Option<String>,

    /// The Euler axis sequence, e.g. `xyz` or `ZYX`.
    #[serde(default)]
    pub euler_order: Option<String>,

    /// The angle units: `degrees` or `radians`.
    #[serde(default)]
    pub angle_units: Option<String>,
}

/// A format document.
///
/// Only the fields that apply to the kind of data being imported are read.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FormatDocument {
    /// The joint position kind: `custom` or `end_effector`.
    pub joint_position_type: Option<String>,

    /// The angle units: `degrees` or `radians`.
    pub angle_units: Option<String>,

    /// The torque units: `Nm` or `Ncm`.
    pub torque_units: Option<String>,

    /// The pose kind: `matrix` or `position_orientation`.
    pub pose_type: Option<String>,

    /// The orientation of a pose.
    pub orientation: Option<OrientationDocument>,

    /// The visual joint kind: `gripper` or `custom`.
    pub visual_joint_type: Option<String>,

    /// The range of a gripper open amount.
    pub normalize: Option<NormalizationDocument>,

    /// Indicates that the gripper amount is a close amount.
    pub invert_gripper_amount: bool,
}

/// An import configuration document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ImportConfigDocument {
    /// The format of the recorded data.
    #[serde(default)]
    pub format: FormatDocument,

    /// The output channels.
    pub mapping: Vec<MappingItemDocument>,
}

impl ImportConfigDocument {
    /// Converts the document into a typed format and mapping list for the given kind of data.
    ///
    /// Missing enumerated values receive their defaults. Fields that are only required by a
    /// specific choice, like the orientation of a pose, are not filled in.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidFormatKind] - Returned when an enumerated value is not recognised.
    /// * [Error::UnsupportedRotationKind] - Returned when the orientation type is not recognised.
    /// * [Error::InvalidIndexRange] - Returned when an index range is empty.
    pub fn into_parts(self, data_kind: DataKind) -> Result<(ImportFormat, Vec<MappingItem>), Error> {
        let format = self.format.into_format(data_kind)?;
        let mapping = self
            .mapping
            .into_iter()
            .map(MappingItemDocument::into_mapping_item)
            .collect::<Result<Vec<_>, Error>>()?;

        Ok((format, mapping))
    }
}

impl FormatDocument {
    fn into_format(self, data_kind: DataKind) -> Result<ImportFormat, Error> {
        let angle_units = self.angle_units.as_deref();
        match data_kind {
            DataKind::JointPositions => {
                let orientation = match self.orientation {
                    Some(o) => Some(o.into_orientation()?),
                    None => None,
                };

                Ok(ImportFormat::JointPositions(JointPositionsFormat {
                    joint_position_kind: parse_or_default(self.joint_position_type.as_deref())?,
                    angle_units: parse_or_default::<AngleUnits>(angle_units)?,
                    pose_kind: parse_or_default(self.pose_type.as_deref())?,
                    orientation,
                }))
            }
            DataKind::JointVelocities => Ok(ImportFormat::JointVelocities(JointVelocitiesFormat {
                angle_units: parse_or_default::<AngleUnits>(angle_units)?,
            })),
            DataKind::JointTorques => Ok(ImportFormat::JointTorques(JointTorquesFormat {
                torque_units: parse_or_default(self.torque_units.as_deref())?,
            })),
            DataKind::VisualJointPositions => Ok(ImportFormat::VisualJointPositions(
                VisualJointPositionsFormat {
                    visual_joint_kind: parse_or_default(self.visual_joint_type.as_deref())?,
                    angle_units: parse_or_default::<AngleUnits>(angle_units)?,
                    normalize: self.normalize.map(|n| NormalizationBounds {
                        min: n.min,
                        max: n.max,
                    }),
                    invert_gripper_amount: self.invert_gripper_amount,
                },
            )),
        }
    }
}

impl MappingItemDocument {
    fn into_mapping_item(self) -> Result<MappingItem, Error> {
        let mut item = MappingItem::new(self.name)
            .with_inverted(self.inverted)
            .with_offset(self.offset);

        if let Some(index) = self.index {
            item = item.with_index(index);
        }

        if let Some(range) = self.index_range {
            item = item.with_index_range(IndexRange::new(range.start, range.end)?);
        }

        Ok(item)
    }
}

impl OrientationDocument {
    fn into_orientation(self) -> Result<OrientationFormat, Error> {
        Ok(OrientationFormat {
            rotation_kind: self.rotation_type.parse::<RotationKind>()?,
            angle_units: parse_or_default::<AngleUnits>(self.angle_units.as_deref())?,
            quaternion_order: self
                .quaternion_order
                .map(|o| o.parse::<QuaternionOrder>())
                .transpose()?,
            euler_order: self
                .euler_order
                .map(|o| o.parse::<EulerOrder>())
                .transpose()?,
        })
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, Error>
where
    T: Default + std::str::FromStr<Err = Error>,
{
    match value {
        Some(v) => v.parse(),
        None => Ok(T::default()),
    }
}
