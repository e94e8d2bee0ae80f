//! Per-event W→eν selection
//!
//! Walks the electron collection once, in producer order:
//!
//! 1. electrons below `min_electron_pt` are skipped;
//! 2. an electron above [`VETO_PT`] seen after a captured electron vetoes
//!    the event;
//! 3. electrons strictly above `min_electron_pt` are captured.
//!
//! The event is accepted when exactly one electron was captured. An electron
//! sitting exactly on `min_electron_pt` passes step 1 and can trigger the
//! veto, but is never captured.
//!
//! The isolation and shower-shape variables of the captured electron are
//! copied into the record without any cut applied to them.

use std::fmt;
use tracing::{trace, warn};
use wenu_core::{Candidate, EventId, Handle, MissingEnergy, RegionTag, SelectionRecord};

use crate::classifier::CandidateClassifier;

/// Fixed transverse-momentum threshold of the second-electron veto (GeV)
pub const VETO_PT: f64 = 20.0;

/// Selector settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    /// Primary electron threshold (GeV)
    pub min_electron_pt: f64,
}

impl SelectorConfig {
    pub fn new(min_electron_pt: f64) -> Self {
        Self { min_electron_pt }
    }
}

/// Why an event produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Electron collection flagged unusable or missing
    InvalidElectrons,

    /// MET collection flagged unusable or missing
    InvalidMet,

    /// MET collection did not hold exactly one entry
    MetCardinality(usize),

    /// A second electron above the veto threshold followed a captured one
    Veto,

    /// No electron above the primary threshold
    NoCandidate,

    /// More than one electron above the primary threshold
    MultipleCandidates(u32),
}

impl RejectReason {
    /// Short label, used as a metrics label value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidElectrons => "invalid_electrons",
            Self::InvalidMet => "invalid_met",
            Self::MetCardinality(_) => "met_cardinality",
            Self::Veto => "veto",
            Self::NoCandidate => "no_candidate",
            Self::MultipleCandidates(_) => "multiple_candidates",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetCardinality(n) => write!(f, "met_cardinality({})", n),
            Self::MultipleCandidates(n) => write!(f, "multiple_candidates({})", n),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Outcome of evaluating one event
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Accepted(SelectionRecord),
    Rejected(RejectReason),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }

    pub fn record(&self) -> Option<&SelectionRecord> {
        match self {
            Self::Accepted(record) => Some(record),
            Self::Rejected(_) => None,
        }
    }

    pub fn into_record(self) -> Option<SelectionRecord> {
        match self {
            Self::Accepted(record) => Some(record),
            Self::Rejected(_) => None,
        }
    }
}

/// Values copied from the most recently captured electron
#[derive(Debug, Default)]
struct Snapshot {
    pt: f64,
    eta: f64,
    phi: f64,
    charge: i32,
    region_tag: RegionTag,
    sigma_eta_eta: f64,
    hcal_over_ecal: f64,
    iso_track: f64,
    iso_ecal: f64,
    iso_hcal: f64,
}

impl Snapshot {
    fn capture(&mut self, electron: &Candidate, classifier: &CandidateClassifier) {
        self.sigma_eta_eta = electron.sigma_eta_eta;
        self.hcal_over_ecal = electron.hcal_over_ecal;

        self.iso_track = electron.iso_track;
        self.iso_ecal = electron.iso_ecal;
        self.iso_hcal = electron.iso_hcal;

        self.region_tag = classifier.classify(electron, self.region_tag);

        self.pt = electron.pt;
        self.eta = electron.eta;
        self.phi = electron.phi;
        self.charge = electron.charge;
    }

    fn into_record(self, id: EventId, met: &MissingEnergy) -> SelectionRecord {
        SelectionRecord {
            run: id.run,
            event: id.event,
            pt: self.pt,
            eta: self.eta,
            phi: self.phi,
            charge: self.charge,
            region_tag: self.region_tag,
            del_eta: 0.0,
            del_phi: 0.0,
            sigma_eta_eta: self.sigma_eta_eta,
            hcal_over_ecal: self.hcal_over_ecal,
            iso_track: self.iso_track,
            iso_ecal: self.iso_ecal,
            iso_hcal: self.iso_hcal,
            met: met.pt,
            met_phi: met.phi,
        }
    }
}

/// Stateless single-electron event selector
#[derive(Debug, Clone)]
pub struct EventSelector {
    config: SelectorConfig,
    classifier: CandidateClassifier,
}

impl EventSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            classifier: CandidateClassifier::new(),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Record for the event if it is accepted
    pub fn select(
        &self,
        electrons: Handle<'_, Candidate>,
        mets: Handle<'_, MissingEnergy>,
        id: EventId,
    ) -> Option<SelectionRecord> {
        self.evaluate(electrons, mets, id).into_record()
    }

    /// Full decision for the event, including the rejection reason
    pub fn evaluate(
        &self,
        electrons: Handle<'_, Candidate>,
        mets: Handle<'_, MissingEnergy>,
        id: EventId,
    ) -> Decision {
        if !electrons.is_valid() {
            warn!("Event {}: invalid electron collection", id);
            return Decision::Rejected(RejectReason::InvalidElectrons);
        }

        if !mets.is_valid() {
            warn!("Event {}: invalid PF MET collection", id);
            return Decision::Rejected(RejectReason::InvalidMet);
        }

        let met = match mets.as_slice() {
            [met] => met,
            other => return Decision::Rejected(RejectReason::MetCardinality(other.len())),
        };

        let min_pt = self.config.min_electron_pt;
        let mut captured: u32 = 0;
        let mut snapshot = Snapshot::default();

        for electron in electrons.iter() {
            let pt = electron.pt;

            if pt < min_pt {
                continue;
            }

            if pt > VETO_PT && captured != 0 {
                trace!("Event {}: vetoed by second electron with pt {}", id, pt);
                return Decision::Rejected(RejectReason::Veto);
            }

            if pt > min_pt {
                snapshot.capture(electron, &self.classifier);
                captured += 1;
            }
        }

        match captured {
            0 => Decision::Rejected(RejectReason::NoCandidate),
            1 => Decision::Accepted(snapshot.into_record(id, met)),
            n => Decision::Rejected(RejectReason::MultipleCandidates(n)),
        }
    }
}
