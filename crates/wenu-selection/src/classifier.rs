//! Detector-region classification

use wenu_core::{Candidate, RegionFlags, RegionTag};

/// Assigns the ECAL region tag of a candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateClassifier;

impl CandidateClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Region tag for `candidate`, starting from the caller's `current` tag
    ///
    /// The barrel and endcap checks are independent assignments evaluated in
    /// that order, so a candidate with both flags set ends up `EE`. With
    /// neither flag set `current` is returned untouched.
    pub fn classify(&self, candidate: &Candidate, current: RegionTag) -> RegionTag {
        Self::classify_flags(candidate.region, current)
    }

    /// Same as [`classify`](Self::classify), on bare flags
    pub fn classify_flags(flags: RegionFlags, current: RegionTag) -> RegionTag {
        let mut tag = current;

        if flags.is_barrel {
            tag = RegionTag::Barrel;
        }

        if flags.is_endcap {
            tag = RegionTag::Endcap;
        }

        tag
    }
}
