//! Payload statistics analyser: turns a set of captured samples into
//! schema-derivation hints (bit-mask, bit-groups, entropy) without
//! performing the derivation itself.

use std::{fs, path::Path};

use crate::encoding::{self, Segment};
use crate::error::Result;

/// How much detail [`payload_analyze`] computes beyond the bit-mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DetailLevel {
    /// Only the bit-mask.
    MaskOnly,
    /// Bit-mask plus bit-group segmentation.
    Groups,
    /// Bit-mask, bit-groups, and Shannon entropy of the first sample.
    Entropy,
}

/// Result of analysing a capture: the bit-mask always present, with deeper
/// fields populated according to the requested [`DetailLevel`].
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Bit-mask over the sample set (`'0'`/`'1'` where every sample
    /// agreed, `'*'` where they disagreed).
    pub mask: String,
    /// Bit-group segmentation of the first sample against `mask`, present
    /// at [`DetailLevel::Groups`] and above.
    pub groups: Option<Vec<(String, Segment)>>,
    /// Shannon entropy of the first sample, present at
    /// [`DetailLevel::Entropy`].
    pub entropy: Option<f64>,
}

/// Analyse a set of captured payload samples (equal-length bit-strings).
///
/// `data_lists` are in-memory samples; `datafile`, if given, is a text file
/// with one bit-string sample per line, appended after `data_lists`. At
/// least one sample (from either source) is required.
pub fn payload_analyze(
    mut data_lists: Vec<String>,
    datafile: Option<&Path>,
    detail: DetailLevel,
) -> Result<AnalysisReport> {
    if let Some(path) = datafile {
        let contents = fs::read_to_string(path).map_err(|_| crate::error::CodecError::Malformed {
            what: "capture file",
            value: path.display().to_string(),
        })?;
        data_lists.extend(contents.lines().map(|line| line.trim().to_string()));
    }

    let mask = encoding::mask(&data_lists)?;
    let reference = &data_lists[0];

    let groups =
        if detail >= DetailLevel::Groups { Some(encoding::group_fields(reference, &mask)?) } else { None };

    let entropy = if detail >= DetailLevel::Entropy { Some(encoding::entropy(reference)) } else { None };

    Ok(AnalysisReport { mask, groups, entropy })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_only_by_default() {
        let samples = vec!["0011".to_string(), "0010".to_string()];
        let report = payload_analyze(samples, None, DetailLevel::MaskOnly).unwrap();
        assert_eq!(report.mask, "001*");
        assert!(report.groups.is_none());
        assert!(report.entropy.is_none());
    }

    #[test]
    fn groups_level_segments() {
        let samples = vec!["00110011".to_string(), "00100011".to_string()];
        let report = payload_analyze(samples, None, DetailLevel::Groups).unwrap();
        assert!(report.groups.is_some());
        assert!(report.entropy.is_none());
    }

    #[test]
    fn entropy_level_computes_entropy() {
        let samples = vec!["0101".to_string(), "0100".to_string()];
        let report = payload_analyze(samples, None, DetailLevel::Entropy).unwrap();
        assert!(report.entropy.is_some());
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(payload_analyze(Vec::new(), None, DetailLevel::MaskOnly).is_err());
    }
}
