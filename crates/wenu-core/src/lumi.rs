//! Luminosity-section mask (certified good-run list)
//!
//! Reads the certification JSON format:
//!
//! ```json
//! {"160431": [[19, 218]], "160577": [[254, 306], [308, 319]]}
//! ```
//!
//! Ranges are inclusive at both ends.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

/// Set of certified `(run, lumi section)` ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LumiMask {
    runs: BTreeMap<u32, Vec<(u32, u32)>>,
}

impl LumiMask {
    /// Parse a mask from certification JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<[u32; 2]>> = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("invalid lumi mask: {}", e)))?;

        let mut runs = BTreeMap::new();
        for (run, ranges) in raw {
            let run: u32 = run
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("invalid run number in lumi mask: {:?}", run)))?;

            let mut parsed = Vec::with_capacity(ranges.len());
            for [first, last] in ranges {
                if first > last {
                    return Err(Error::config(format!(
                        "inverted lumi range [{}, {}] for run {}",
                        first, last, run
                    )));
                }
                parsed.push((first, last));
            }
            parsed.sort_unstable();
            runs.insert(run, parsed);
        }

        Ok(Self { runs })
    }

    /// Load a mask from a certification JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mask = Self::from_json(&content)?;
        debug!(
            "Loaded lumi mask from {:?}: {} runs, {} ranges",
            path,
            mask.run_count(),
            mask.range_count()
        );
        Ok(mask)
    }

    /// Whether the lumi section is certified
    pub fn contains(&self, run: u32, lumi: u32) -> bool {
        self.runs
            .get(&run)
            .is_some_and(|ranges| ranges.iter().any(|&(first, last)| first <= lumi && lumi <= last))
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn range_count(&self) -> usize {
        self.runs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
