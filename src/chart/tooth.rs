//! Tooth identifiers and the fixed anatomical traversal order.
//!
//! Teeth are identified by FDI two-digit notation: the first digit is the
//! quadrant (1-4 permanent, 5-8 primary), the second is the position counted
//! from the midline. The chart lays teeth out as the clinician faces the
//! patient, so the patient's right side appears on the left of the screen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single tooth position in FDI notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothId(u8);

/// Which set of teeth an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dentition {
    /// Adult teeth, quadrants 1-4
    Permanent,
    /// Deciduous teeth, quadrants 5-8
    Primary,
}

impl ToothId {
    /// Build an identifier from its FDI number, rejecting positions that do not exist.
    pub fn new(fdi: u8) -> Option<Self> {
        let quadrant = fdi / 10;
        let position = fdi % 10;
        let valid = match quadrant {
            1..=4 => (1..=8).contains(&position),
            5..=8 => (1..=5).contains(&position),
            _ => false,
        };
        valid.then_some(Self(fdi))
    }

    /// The raw FDI number
    pub fn fdi(self) -> u8 {
        self.0
    }

    pub fn quadrant(self) -> u8 {
        self.0 / 10
    }

    /// Position counted from the midline (1 = central incisor)
    pub fn position(self) -> u8 {
        self.0 % 10
    }

    pub fn dentition(self) -> Dentition {
        if self.quadrant() <= 4 {
            Dentition::Permanent
        } else {
            Dentition::Primary
        }
    }

    /// Anatomical name, e.g. "upper right first molar".
    pub fn name(self) -> String {
        let (arch, side) = match self.quadrant() {
            1 | 5 => ("upper", "right"),
            2 | 6 => ("upper", "left"),
            3 | 7 => ("lower", "left"),
            _ => ("lower", "right"),
        };

        let kind = match (self.dentition(), self.position()) {
            (_, 1) => "central incisor",
            (_, 2) => "lateral incisor",
            (_, 3) => "canine",
            (Dentition::Permanent, 4) => "first premolar",
            (Dentition::Permanent, 5) => "second premolar",
            (Dentition::Permanent, 6) => "first molar",
            (Dentition::Permanent, 7) => "second molar",
            (Dentition::Permanent, _) => "third molar",
            (Dentition::Primary, 4) => "first molar",
            (Dentition::Primary, _) => "second molar",
        };

        match self.dentition() {
            Dentition::Permanent => format!("{arch} {side} {kind}"),
            Dentition::Primary => format!("{arch} {side} primary {kind}"),
        }
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for ToothId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is not a valid FDI tooth number"))
    }
}

impl From<ToothId> for u8 {
    fn from(tooth: ToothId) -> Self {
        tooth.0
    }
}

/// One horizontal row of the chart, listed left to right on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchSegment {
    pub label: &'static str,
    pub dentition: Dentition,
    pub teeth: &'static [u8],
}

const UPPER_PERMANENT: &[u8] = &[
    18, 17, 16, 15, 14, 13, 12, 11, 21, 22, 23, 24, 25, 26, 27, 28,
];
const UPPER_PRIMARY: &[u8] = &[55, 54, 53, 52, 51, 61, 62, 63, 64, 65];
const LOWER_PRIMARY: &[u8] = &[85, 84, 83, 82, 81, 71, 72, 73, 74, 75];
const LOWER_PERMANENT: &[u8] = &[
    48, 47, 46, 45, 44, 43, 42, 41, 31, 32, 33, 34, 35, 36, 37, 38,
];

const SEGMENTS: [ArchSegment; 4] = [
    ArchSegment {
        label: "Upper",
        dentition: Dentition::Permanent,
        teeth: UPPER_PERMANENT,
    },
    ArchSegment {
        label: "Upper primary",
        dentition: Dentition::Primary,
        teeth: UPPER_PRIMARY,
    },
    ArchSegment {
        label: "Lower primary",
        dentition: Dentition::Primary,
        teeth: LOWER_PRIMARY,
    },
    ArchSegment {
        label: "Lower",
        dentition: Dentition::Permanent,
        teeth: LOWER_PERMANENT,
    },
];

/// The four chart rows in traversal order.
pub fn segments() -> &'static [ArchSegment] {
    &SEGMENTS
}

/// Every tooth in the fixed traversal order used for range selection.
pub fn traversal_order() -> impl Iterator<Item = ToothId> {
    SEGMENTS
        .iter()
        .flat_map(|segment| segment.teeth.iter().copied())
        .map(ToothId)
}

/// Index of a tooth within the traversal order.
pub fn traversal_index(tooth: ToothId) -> Option<usize> {
    traversal_order().position(|t| t == tooth)
}

/// Teeth between `from` and `to` inclusive, in traversal order.
///
/// The result does not depend on argument order. Returns an empty list when
/// either tooth is missing from the traversal order.
pub fn resolve_range(from: ToothId, to: ToothId) -> Vec<ToothId> {
    let (Some(a), Some(b)) = (traversal_index(from), traversal_index(to)) else {
        return Vec::new();
    };
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    traversal_order().skip(start).take(end - start + 1).collect()
}
