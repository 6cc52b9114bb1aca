//! Role alignment scoring with soft tier weighting
//!
//! A skill phrase counts as present when it occurs as a substring of the
//! lowercased resume text joined with the extracted skill set. Core presence
//! dominates the blend; transferable coverage is capped at 60 before
//! weighting, and peripheral skills only add a small flat bonus.

use crate::processing::breakdown::CategoryResult;
use crate::processing::roles::{RoleProfile, SkillTier};
use crate::processing::skills::SkillSet;
use log::debug;
use serde::{Deserialize, Serialize};

const CORE_SCALE: f64 = 100.0;
const TRANSFERABLE_SCALE: f64 = 60.0;
const PERIPHERAL_POINTS_PER_MATCH: f64 = 2.0;
const CORE_BLEND: f64 = 0.7;
const TRANSFERABLE_BLEND: f64 = 0.25;
const PERIPHERAL_BLEND: f64 = 0.05;
const MAX_MISSING_CORE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillHit {
    pub skill: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentDetails {
    pub core_skills: Vec<SkillHit>,
    pub transferable_skills: Vec<SkillHit>,
    pub peripheral_skills: Vec<SkillHit>,
    pub missing_core_skills: Vec<String>,
    pub core_skill_percentage: u32,
}

/// Hits and misses of one tier, both in catalog order
struct TierMatch {
    hits: Vec<SkillHit>,
    misses: Vec<String>,
}

fn match_tier(tier: &SkillTier, haystack: &str) -> TierMatch {
    let found = tier.contained_in(haystack);
    let mut hits = Vec::new();
    let mut misses = Vec::new();

    for (index, skill) in tier.skills.iter().enumerate() {
        if found.contains(&index) {
            hits.push(SkillHit {
                skill: skill.clone(),
                weight: tier.weight,
            });
        } else {
            misses.push(skill.clone());
        }
    }

    TierMatch { hits, misses }
}

fn ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}

/// Score the resume against a resolved role profile.
///
/// `_job_description` is accepted for symmetry with the keyword analyzer and
/// does not influence the result.
pub fn score_alignment(
    skills: &SkillSet,
    resume_text: &str,
    profile: &RoleProfile,
    _job_description: Option<&str>,
) -> CategoryResult<AlignmentDetails> {
    let joined_skills = skills.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    let haystack = format!("{} {}", resume_text, joined_skills).to_lowercase();

    let core = match_tier(&profile.core, &haystack);
    let transferable = match_tier(&profile.transferable, &haystack);
    let peripheral = match_tier(&profile.peripheral, &haystack);

    let core_ratio = ratio(core.hits.len(), profile.core.len());
    let core_score = core_ratio * CORE_SCALE;
    let transferable_score =
        ratio(transferable.hits.len(), profile.transferable.len()) * TRANSFERABLE_SCALE;
    let peripheral_score = peripheral.hits.len() as f64 * PERIPHERAL_POINTS_PER_MATCH;

    let alignment = (core_score * CORE_BLEND
        + transferable_score * TRANSFERABLE_BLEND
        + peripheral_score * PERIPHERAL_BLEND)
        .min(100.0)
        .round();

    debug!(
        "Role alignment against '{}': core {}/{}, transferable {}/{}, peripheral {}, score {}",
        profile.id,
        core.hits.len(),
        profile.core.len(),
        transferable.hits.len(),
        profile.transferable.len(),
        peripheral.hits.len(),
        alignment
    );

    let details = AlignmentDetails {
        core_skills: core.hits,
        transferable_skills: transferable.hits,
        peripheral_skills: peripheral.hits,
        missing_core_skills: core.misses.into_iter().take(MAX_MISSING_CORE).collect(),
        core_skill_percentage: (core_ratio * 100.0).round() as u32,
    };

    CategoryResult::new(alignment, details)
}
