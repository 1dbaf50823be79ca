//! Entity model: near-Earth objects and their close approaches.
//!
//! Both entities are created unlinked by the loaders. The
//! [`NeoDatabase`](crate::core::database::NeoDatabase) owns them in two
//! arenas and links them once through [`NeoId`] / [`ApproachId`] indices, so
//! neither side holds a reference to the other.
//!
//! Missing or malformed source values never fail construction. They are
//! replaced by documented sentinels: `None` for names and times, `NaN` for
//! diameters, `0.0` for distances and velocities, `false` for hazard flags.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::util::time::{cd_to_datetime, datetime_to_str};

/// Stable index of a [`NearEarthObject`] inside a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(pub(crate) usize);

impl NeoId {
    /// Position of the object in the database's storage order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable index of a [`CloseApproach`] inside a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);

impl ApproachId {
    /// Position of the approach in the database's storage order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A near-Earth object (NEO).
///
/// Carries the primary designation (required, unique), the IAU name
/// (optional), the diameter in km (`NaN` when unknown), and whether the
/// object is flagged as potentially hazardous.
#[derive(Debug, Clone)]
pub struct NearEarthObject {
    /// Primary designation, the unique key of the object.
    pub designation: String,

    /// IAU name. `None` when the object is unnamed; never `Some("")`.
    pub name: Option<String>,

    /// Diameter in kilometres, `NaN` when unknown.
    pub diameter: f64,

    /// Whether the object is potentially hazardous to Earth.
    pub hazardous: bool,

    /// Close approaches of this object in link order. Empty until the
    /// database links the dataset.
    pub approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Create an unlinked NEO, normalising absent values.
    ///
    /// An empty or whitespace-only name becomes `None`, a missing diameter
    /// becomes `NaN` and a missing hazard flag becomes `false`.
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: Option<f64>,
        hazardous: Option<bool>,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: name.and_then(normalize_name),
            diameter: diameter.unwrap_or(f64::NAN),
            hazardous: hazardous.unwrap_or(false),
            approaches: Vec::new(),
        }
    }

    /// `"433 (Eros)"` when the object is named, otherwise just `"433"`.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({name})", self.designation),
            None => self.designation.clone(),
        }
    }

    /// Whether the diameter is known.
    pub fn has_diameter(&self) -> bool {
        !self.diameter.is_nan()
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous {
            "is potentially hazardous"
        } else {
            "is not potentially hazardous"
        };
        if self.has_diameter() {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {hazard}.",
                self.fullname(),
                self.diameter
            )
        } else {
            write!(
                f,
                "NEO {} has an unknown diameter and {hazard}.",
                self.fullname()
            )
        }
    }
}

/// A single close approach to Earth by a NEO.
///
/// Holds the UTC time of closest approach, the nominal distance in au and the
/// relative velocity in km/s. `designation` is the foreign key into the NEO
/// collection; `neo` is filled in by the database when the key resolves.
#[derive(Debug, Clone)]
pub struct CloseApproach {
    /// Designation of the NEO this approach belongs to.
    pub designation: String,

    /// Time of closest approach, `None` if the source value was unparseable.
    pub time: Option<DateTime<Utc>>,

    /// Nominal approach distance in astronomical units.
    pub distance: f64,

    /// Relative approach velocity in km/s.
    pub velocity: f64,

    /// Linked NEO. `None` until linked, and afterwards if no NEO carries
    /// `designation`.
    pub neo: Option<NeoId>,
}

impl CloseApproach {
    /// Create an unlinked approach from a raw calendar date such as
    /// `"1900-Jan-01 00:11"`.
    pub fn new(
        designation: impl Into<String>,
        calendar_date: Option<&str>,
        distance: Option<f64>,
        velocity: Option<f64>,
    ) -> Self {
        Self {
            designation: designation.into(),
            time: calendar_date.and_then(cd_to_datetime),
            distance: distance.unwrap_or(0.0),
            velocity: velocity.unwrap_or(0.0),
            neo: None,
        }
    }

    /// Approach time as `YYYY-MM-DD HH:MM`, or an empty string when unknown.
    pub fn time_str(&self) -> String {
        self.time.as_ref().map(datetime_to_str).unwrap_or_default()
    }

    /// Whether the approach was linked to a NEO.
    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.designation,
            self.distance,
            self.velocity
        )
    }
}

fn normalize_name(name: String) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == name.len() {
        Some(name)
    } else {
        Some(trimmed.to_owned())
    }
}
