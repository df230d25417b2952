//! Plastic material profiles

use serde::{Deserialize, Serialize};

/// Built-in plastics, ordered fastest to slowest decay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlasticKind {
    /// Polyethylene terephthalate (fast decay)
    #[default]
    Pet,
    /// Polypropylene (moderate decay)
    Pp,
    /// Polyethylene (slow decay)
    Pe,
}

impl PlasticKind {
    pub const ALL: [PlasticKind; 3] = [PlasticKind::Pet, PlasticKind::Pp, PlasticKind::Pe];

    /// Immutable profile for this plastic
    pub const fn profile(self) -> MaterialProfile {
        match self {
            PlasticKind::Pet => MaterialProfile {
                kind: PlasticKind::Pet,
                name: "PET",
                color: [0x4e, 0xa8, 0xde, 0xff],
                initial_mass: 10.0,
                decay_constant: 0.035,
            },
            PlasticKind::Pp => MaterialProfile {
                kind: PlasticKind::Pp,
                name: "PP",
                color: [0xf9, 0xc7, 0x4f, 0xff],
                initial_mass: 10.0,
                decay_constant: 0.018,
            },
            PlasticKind::Pe => MaterialProfile {
                kind: PlasticKind::Pe,
                name: "PE",
                color: [0x90, 0xbe, 0x6d, 0xff],
                initial_mass: 10.0,
                decay_constant: 0.008,
            },
        }
    }

    /// Human-readable decay speed for selectors
    pub fn speed_label(self) -> &'static str {
        match self {
            PlasticKind::Pet => "fast",
            PlasticKind::Pp => "moderate",
            PlasticKind::Pe => "slow",
        }
    }
}

impl std::fmt::Display for PlasticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.profile().name, self.speed_label())
    }
}

impl std::str::FromStr for PlasticKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pet" | "fast" => Ok(PlasticKind::Pet),
            "pp" | "moderate" => Ok(PlasticKind::Pp),
            "pe" | "slow" => Ok(PlasticKind::Pe),
            other => Err(format!("unknown plastic '{}' (expected pet, pp or pe)", other)),
        }
    }
}

/// Definition of a plastic's decay properties
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MaterialProfile {
    pub kind: PlasticKind,
    pub name: &'static str,

    /// Display color (RGBA)
    pub color: [u8; 4],

    /// Mass at t = 0 (grams)
    pub initial_mass: f64,

    /// Decay constant k (per minute at 100% UV)
    pub decay_constant: f64,
}
