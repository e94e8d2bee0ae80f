//! Core types for WenuFilter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detector-region flags carried by a reconstructed electron
///
/// The two flags are mutually exclusive by construction in the producer but
/// nothing here enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFlags {
    /// Electron seeded in the ECAL barrel
    #[serde(default)]
    pub is_barrel: bool,

    /// Electron seeded in the ECAL endcap
    #[serde(default)]
    pub is_endcap: bool,
}

/// A reconstructed electron candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Transverse momentum (GeV)
    pub pt: f64,

    /// Pseudorapidity
    pub eta: f64,

    /// Azimuthal angle (rad)
    pub phi: f64,

    /// Electric charge, one of -1, 0, +1
    pub charge: i32,

    /// Barrel/endcap flags
    #[serde(default)]
    pub region: RegionFlags,

    /// Shower-shape discriminant
    #[serde(default)]
    pub sigma_eta_eta: f64,

    /// Hadronic over electromagnetic energy ratio
    #[serde(default)]
    pub hcal_over_ecal: f64,

    /// Track isolation sum in a 0.4 cone
    #[serde(default)]
    pub iso_track: f64,

    /// ECAL isolation sum in a 0.4 cone
    #[serde(default)]
    pub iso_ecal: f64,

    /// HCAL isolation sum in a 0.4 cone
    #[serde(default)]
    pub iso_hcal: f64,
}

impl Candidate {
    /// Create a candidate with kinematics only; region flags unset and
    /// shape/isolation variables zeroed
    pub fn new(pt: f64, eta: f64, phi: f64, charge: i32) -> Self {
        Self {
            pt,
            eta,
            phi,
            charge,
            region: RegionFlags::default(),
            sigma_eta_eta: 0.0,
            hcal_over_ecal: 0.0,
            iso_track: 0.0,
            iso_ecal: 0.0,
            iso_hcal: 0.0,
        }
    }

    /// Mark the candidate as a barrel electron
    pub fn barrel(mut self) -> Self {
        self.region.is_barrel = true;
        self
    }

    /// Mark the candidate as an endcap electron
    pub fn endcap(mut self) -> Self {
        self.region.is_endcap = true;
        self
    }

    /// Set shower-shape variables
    pub fn with_shape(mut self, sigma_eta_eta: f64, hcal_over_ecal: f64) -> Self {
        self.sigma_eta_eta = sigma_eta_eta;
        self.hcal_over_ecal = hcal_over_ecal;
        self
    }

    /// Set the track, ECAL and HCAL isolation sums
    pub fn with_isolation(mut self, track: f64, ecal: f64, hcal: f64) -> Self {
        self.iso_track = track;
        self.iso_ecal = ecal;
        self.iso_hcal = hcal;
        self
    }
}

/// Missing transverse energy of an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingEnergy {
    /// Magnitude (GeV)
    pub pt: f64,

    /// Azimuthal angle (rad)
    pub phi: f64,
}

impl MissingEnergy {
    pub fn new(pt: f64, phi: f64) -> Self {
        Self { pt, phi }
    }
}

/// Identifiers of one collision event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    /// Run number
    pub run: u32,

    /// Luminosity section
    #[serde(default)]
    pub lumi: u32,

    /// Event number within the run
    pub event: u64,
}

impl EventId {
    pub fn new(run: u32, lumi: u32, event: u64) -> Self {
        Self { run, lumi, event }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.run, self.lumi, self.event)
    }
}

/// Detector region assigned to the selected electron
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionTag {
    /// No region flag was seen
    #[default]
    #[serde(rename = "")]
    Unclassified,

    /// ECAL barrel
    #[serde(rename = "EB")]
    Barrel,

    /// ECAL endcap
    #[serde(rename = "EE")]
    Endcap,
}

impl RegionTag {
    /// Tag text as written to the output record
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unclassified => "",
            Self::Barrel => "EB",
            Self::Endcap => "EE",
        }
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary row for one accepted event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub run: u32,
    pub event: u64,

    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub charge: i32,

    /// Region of the selected electron
    pub region_tag: RegionTag,

    /// Reserved, never computed
    pub del_eta: f64,

    /// Reserved, never computed
    pub del_phi: f64,

    pub sigma_eta_eta: f64,
    pub hcal_over_ecal: f64,
    pub iso_track: f64,
    pub iso_ecal: f64,
    pub iso_hcal: f64,

    /// Missing transverse energy magnitude
    pub met: f64,

    /// Missing transverse energy azimuth
    pub met_phi: f64,
}
