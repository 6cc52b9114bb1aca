//! Resume section segmentation
//!
//! A single pass over the lines of the resume. The state is the section the
//! cursor is currently in; lines accumulate in a buffer that is flushed into
//! that section whenever a header line switches the state.

use crate::error::Result;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Contact,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Achievements,
    Certifications,
    Other,
}

impl SectionKind {
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Contact,
        SectionKind::Summary,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Achievements,
        SectionKind::Certifications,
        SectionKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Achievements => "achievements",
            SectionKind::Certifications => "certifications",
            SectionKind::Other => "other",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Contact => write!(f, "Contact"),
            SectionKind::Summary => write!(f, "Summary"),
            SectionKind::Education => write!(f, "Education"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Projects => write!(f, "Projects"),
            SectionKind::Achievements => write!(f, "Achievements"),
            SectionKind::Certifications => write!(f, "Certifications"),
            SectionKind::Other => write!(f, "Other"),
        }
    }
}

/// Accumulated text per section. Always holds one entry for every `SectionKind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap(BTreeMap<SectionKind, String>);

impl SectionMap {
    pub fn new() -> Self {
        Self(
            SectionKind::ALL
                .iter()
                .map(|kind| (*kind, String::new()))
                .collect(),
        )
    }

    pub fn get(&self, kind: SectionKind) -> &str {
        self.0.get(&kind).map(String::as_str).unwrap_or("")
    }

    /// A section counts as present when its trimmed content is longer than `min_len`
    /// UTF-16 code units.
    pub fn is_present(&self, kind: SectionKind, min_len: usize) -> bool {
        self.get(kind).trim().encode_utf16().count() > min_len
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        self.0.iter().map(|(kind, content)| (*kind, content.as_str()))
    }

    fn append(&mut self, kind: SectionKind, text: &str) {
        self.0.entry(kind).or_default().push_str(text);
    }

    fn set(&mut self, kind: SectionKind, text: String) {
        self.0.insert(kind, text);
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Header synonyms per section, tested in this order against the trimmed line.
const SECTION_HEADERS: &[(SectionKind, &str)] = &[
    (SectionKind::Contact, r"(?i)^(?:contact|personal\s+information|details)"),
    (SectionKind::Summary, r"(?i)^(?:summary|objective|profile|about\s+me)"),
    (SectionKind::Education, r"(?i)^(?:education|academic|qualifications)"),
    (
        SectionKind::Experience,
        r"(?i)^(?:experience|work\s+history|employment|professional\s+experience)",
    ),
    (
        SectionKind::Skills,
        r"(?i)^(?:skills|technical\s+skills|competencies|expertise)",
    ),
    (SectionKind::Projects, r"(?i)^(?:projects|portfolio|work\s+samples)"),
    (
        SectionKind::Achievements,
        r"(?i)^(?:achievements|awards|honors|accomplishments)",
    ),
    (
        SectionKind::Certifications,
        r"(?i)^(?:certifications|certificates|licenses)",
    ),
];

pub struct SectionSegmenter {
    headers: Vec<(SectionKind, Regex)>,
    email_regex: Regex,
    phone_regex: Regex,
    linkedin_regex: Regex,
}

impl SectionSegmenter {
    pub fn new() -> Result<Self> {
        let headers = SECTION_HEADERS
            .iter()
            .map(|(kind, pattern)| Ok((*kind, Regex::new(pattern)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            headers,
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")?,
            phone_regex: Regex::new(r"(?:\+\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}")?,
            linkedin_regex: Regex::new(r"(?i)linkedin\.com/in/[\w-]+")?,
        })
    }

    /// Split raw resume text into sections
    pub fn segment(&self, text: &str) -> SectionMap {
        let mut sections = SectionMap::new();
        let mut current = SectionKind::Other;
        let mut buffer: Vec<&str> = Vec::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();

            if let Some(kind) = self.match_header(line) {
                if !buffer.is_empty() {
                    sections.append(current, &buffer.join("\n"));
                    sections.append(current, "\n");
                }
                current = kind;
                buffer.clear();
                continue;
            }

            if !line.is_empty() {
                buffer.push(line);
            }
        }

        if !buffer.is_empty() {
            sections.append(current, &buffer.join("\n"));
        }

        if sections.get(SectionKind::Contact).trim().is_empty() {
            sections.set(SectionKind::Contact, self.extract_contact_info(text));
        }

        debug!(
            "Segmented resume into {} non-empty sections",
            sections.iter().filter(|(_, c)| !c.trim().is_empty()).count()
        );

        sections
    }

    /// First header pattern in catalog order that matches the line
    pub fn match_header(&self, line: &str) -> Option<SectionKind> {
        self.headers
            .iter()
            .find(|(_, pattern)| pattern.is_match(line))
            .map(|(kind, _)| *kind)
    }

    /// Build a contact block from the first email, phone and LinkedIn path in the text
    pub fn extract_contact_info(&self, text: &str) -> String {
        let mut contact = String::new();

        if let Some(email) = self.email_regex.find(text) {
            contact.push_str(&format!("Email: {}\n", email.as_str()));
        }
        if let Some(phone) = self.phone_regex.find(text) {
            contact.push_str(&format!("Phone: {}\n", phone.as_str()));
        }
        if let Some(linkedin) = self.linkedin_regex.find(text) {
            contact.push_str(&format!("LinkedIn: {}\n", linkedin.as_str()));
        }

        contact
    }
}
