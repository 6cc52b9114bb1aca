//! Section completeness scoring

use crate::processing::breakdown::CategoryResult;
use crate::processing::sections::{SectionKind, SectionMap};
use serde::{Deserialize, Serialize};

pub const REQUIRED_SECTIONS: [SectionKind; 3] = [
    SectionKind::Education,
    SectionKind::Experience,
    SectionKind::Skills,
];

pub const OPTIONAL_SECTIONS: [SectionKind; 4] = [
    SectionKind::Summary,
    SectionKind::Projects,
    SectionKind::Achievements,
    SectionKind::Certifications,
];

// Length thresholds keep header-only sections from counting as present.
const REQUIRED_MIN_CHARS: usize = 50;
const OPTIONAL_MIN_CHARS: usize = 30;
const REQUIRED_POINTS: f64 = 20.0;
const OPTIONAL_POINTS: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDetails {
    pub present: Vec<SectionKind>,
    pub missing: Vec<SectionKind>,
    pub optional: Vec<SectionKind>,
}

pub fn score_structure(sections: &SectionMap) -> CategoryResult<StructureDetails> {
    let mut score = 0.0;
    let mut details = StructureDetails::default();

    for kind in REQUIRED_SECTIONS {
        if sections.is_present(kind, REQUIRED_MIN_CHARS) {
            score += REQUIRED_POINTS;
            details.present.push(kind);
        } else {
            details.missing.push(kind);
        }
    }

    for kind in OPTIONAL_SECTIONS {
        if sections.is_present(kind, OPTIONAL_MIN_CHARS) {
            score += OPTIONAL_POINTS;
            details.optional.push(kind);
        }
    }

    CategoryResult::new(score.min(100.0), details)
}
