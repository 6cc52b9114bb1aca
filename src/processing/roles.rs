//! Role weight catalog
//!
//! Each role carries three skill tiers (core, transferable, peripheral) with a
//! fixed weight and vocabulary. The catalog is built once and only read after
//! that; `resolve` never fails and falls back to the `general` profile.

use crate::error::Result;
use aho_corasick::AhoCorasick;
use serde::Serialize;
use std::collections::BTreeSet;
use strsim::jaro_winkler;

pub const GENERAL_ROLE: &str = "general";

/// A weighted skill vocabulary with a precompiled substring matcher
#[derive(Debug, Clone, Serialize)]
pub struct SkillTier {
    pub weight: f64,
    pub skills: Vec<String>,
    #[serde(skip)]
    matcher: AhoCorasick,
}

impl SkillTier {
    fn new(weight: f64, skills: &[&str]) -> Result<Self> {
        let skills: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&skills)?;
        Ok(Self {
            weight,
            skills,
            matcher,
        })
    }

    /// Indices (into `skills`) of every phrase that occurs anywhere in `haystack`
    pub fn contained_in(&self, haystack: &str) -> BTreeSet<usize> {
        self.matcher
            .find_overlapping_iter(haystack)
            .map(|m| m.pattern().as_usize())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleProfile {
    pub id: String,
    pub name: String,
    pub core: SkillTier,
    pub transferable: SkillTier,
    pub peripheral: SkillTier,
}

impl RoleProfile {
    /// Core and transferable vocabularies joined into one keyword string
    pub fn keyword_text(&self) -> String {
        self.core
            .skills
            .iter()
            .chain(self.transferable.skills.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    pub key: String,
    pub name: String,
}

struct RoleDefinition {
    id: &'static str,
    name: &'static str,
    core: (f64, &'static [&'static str]),
    transferable: (f64, &'static [&'static str]),
    peripheral: (f64, &'static [&'static str]),
}

const ROLE_DEFINITIONS: &[RoleDefinition] = &[
    RoleDefinition {
        id: "software-engineer",
        name: "Software Engineer",
        core: (
            0.7,
            &[
                "programming", "algorithms", "data structures", "coding", "software development",
                "git", "version control", "debugging", "testing", "code review",
                "java", "python", "javascript", "c++", "typescript",
            ],
        ),
        transferable: (
            0.4,
            &[
                "problem solving", "teamwork", "agile", "scrum", "project management",
                "communication", "leadership", "competitive programming", "hackathons",
                "open source", "system design", "architecture",
            ],
        ),
        peripheral: (
            0.15,
            &[
                "design", "ui/ux", "marketing", "sales", "business development",
                "content creation", "social media",
            ],
        ),
    },
    RoleDefinition {
        id: "data-scientist",
        name: "Data Scientist",
        core: (
            0.75,
            &[
                "machine learning", "deep learning", "python", "r", "statistics",
                "data analysis", "pandas", "numpy", "tensorflow", "pytorch",
                "scikit-learn", "sql", "data mining", "modeling", "algorithms",
            ],
        ),
        transferable: (
            0.45,
            &[
                "research", "mathematics", "programming", "problem solving",
                "visualization", "communication", "domain expertise", "experimentation",
                "a/b testing", "excel", "tableau", "power bi",
            ],
        ),
        peripheral: (
            0.2,
            &[
                "web development", "mobile development", "design", "marketing",
                "sales", "business development",
            ],
        ),
    },
    RoleDefinition {
        id: "product-manager",
        name: "Product Manager",
        core: (
            0.7,
            &[
                "product management", "roadmap", "strategy", "stakeholder management",
                "requirements gathering", "user stories", "prioritization", "metrics",
                "kpis", "product analytics", "market research", "competitive analysis",
            ],
        ),
        transferable: (
            0.5,
            &[
                "communication", "leadership", "agile", "scrum", "jira", "confluence",
                "project management", "data analysis", "sql", "excel", "presentation",
                "technical knowledge", "user experience", "design thinking",
            ],
        ),
        peripheral: (
            0.2,
            &[
                "programming", "coding", "development", "design", "photoshop",
                "illustrator",
            ],
        ),
    },
    RoleDefinition {
        id: "frontend-developer",
        name: "Frontend Developer",
        core: (
            0.75,
            &[
                "html", "css", "javascript", "react", "angular", "vue", "typescript",
                "responsive design", "web development", "ui development", "dom", "ajax",
                "rest api", "webpack", "npm", "git",
            ],
        ),
        transferable: (
            0.4,
            &[
                "ui/ux", "design", "figma", "photoshop", "accessibility", "performance",
                "testing", "debugging", "problem solving", "agile", "teamwork",
                "backend development", "node.js",
            ],
        ),
        peripheral: (
            0.15,
            &[
                "data science", "machine learning", "devops", "cloud", "marketing",
                "sales",
            ],
        ),
    },
    RoleDefinition {
        id: "backend-developer",
        name: "Backend Developer",
        core: (
            0.75,
            &[
                "server", "api", "rest", "graphql", "database", "sql", "nosql",
                "node.js", "python", "java", "go", "spring", "django", "flask",
                "express", "microservices", "docker", "authentication", "security",
            ],
        ),
        transferable: (
            0.4,
            &[
                "algorithms", "data structures", "system design", "architecture",
                "devops", "kubernetes", "cloud", "aws", "azure", "gcp",
                "testing", "git", "agile", "problem solving",
            ],
        ),
        peripheral: (
            0.15,
            &[
                "frontend", "react", "angular", "design", "ui/ux", "mobile",
                "marketing",
            ],
        ),
    },
    RoleDefinition {
        id: "designer",
        name: "UI/UX Designer",
        core: (
            0.7,
            &[
                "ui design", "ux design", "user experience", "user interface",
                "figma", "sketch", "adobe xd", "photoshop", "illustrator",
                "prototyping", "wireframing", "user research", "usability testing",
            ],
        ),
        transferable: (
            0.45,
            &[
                "design thinking", "creativity", "communication", "collaboration",
                "html", "css", "frontend", "accessibility", "branding", "typography",
                "color theory", "visual design", "interaction design",
            ],
        ),
        peripheral: (
            0.2,
            &[
                "programming", "backend", "data science", "marketing", "seo",
                "content writing",
            ],
        ),
    },
    RoleDefinition {
        id: "devops-engineer",
        name: "DevOps Engineer",
        core: (
            0.75,
            &[
                "devops", "ci/cd", "jenkins", "docker", "kubernetes", "terraform",
                "ansible", "aws", "azure", "gcp", "cloud", "infrastructure",
                "automation", "monitoring", "deployment", "linux", "bash", "scripting",
            ],
        ),
        transferable: (
            0.4,
            &[
                "problem solving", "system administration", "networking", "security",
                "python", "git", "agile", "collaboration", "troubleshooting",
                "performance optimization", "backend development",
            ],
        ),
        peripheral: (
            0.15,
            &[
                "frontend", "design", "data science", "machine learning", "marketing",
                "sales",
            ],
        ),
    },
    RoleDefinition {
        id: GENERAL_ROLE,
        name: "General ATS",
        core: (0.6, &[]),
        transferable: (
            0.5,
            &[
                "communication", "teamwork", "leadership", "problem solving",
                "project management", "time management", "critical thinking",
                "analytical skills", "creativity", "adaptability",
            ],
        ),
        peripheral: (0.3, &[]),
    },
];

/// Immutable role catalog, keyed by role id
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    profiles: Vec<RoleProfile>,
    general_index: usize,
}

impl RoleCatalog {
    /// Build the compiled-in catalog
    pub fn builtin() -> Result<Self> {
        let profiles = ROLE_DEFINITIONS
            .iter()
            .map(|def| {
                Ok(RoleProfile {
                    id: def.id.to_string(),
                    name: def.name.to_string(),
                    core: SkillTier::new(def.core.0, def.core.1)?,
                    transferable: SkillTier::new(def.transferable.0, def.transferable.1)?,
                    peripheral: SkillTier::new(def.peripheral.0, def.peripheral.1)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let general_index = profiles
            .iter()
            .position(|p| p.id == GENERAL_ROLE)
            .unwrap_or(profiles.len() - 1);

        Ok(Self {
            profiles,
            general_index,
        })
    }

    /// Profile for a known id, or the general fallback
    pub fn resolve(&self, role_id: &str) -> &RoleProfile {
        self.get(role_id).unwrap_or_else(|| self.general())
    }

    pub fn get(&self, role_id: &str) -> Option<&RoleProfile> {
        let key = role_id.trim().to_lowercase();
        self.profiles.iter().find(|p| p.id == key)
    }

    pub fn general(&self) -> &RoleProfile {
        &self.profiles[self.general_index]
    }

    /// Selectable roles; the general fallback is not listed
    pub fn available_roles(&self) -> Vec<RoleSummary> {
        self.profiles
            .iter()
            .filter(|p| p.id != GENERAL_ROLE)
            .map(|p| RoleSummary {
                key: p.id.clone(),
                name: p.name.clone(),
            })
            .collect()
    }

    /// Closest known role id by Jaro-Winkler similarity, for "did you mean" hints
    pub fn closest_role(&self, role_id: &str) -> Option<&str> {
        let key = role_id.trim().to_lowercase();
        self.profiles
            .iter()
            .filter(|p| p.id != GENERAL_ROLE)
            .map(|p| (p.id.as_str(), jaro_winkler(&key, &p.id)))
            .filter(|(_, similarity)| *similarity >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_roles() {
        let catalog = RoleCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 8);

        let roles = catalog.available_roles();
        assert_eq!(roles.len(), 7);
        assert!(roles.iter().all(|r| r.key != GENERAL_ROLE));
        assert!(roles.iter().any(|r| r.key == "backend-developer" && r.name == "Backend Developer"));
    }

    #[test]
    fn test_resolve_falls_back_to_general() {
        let catalog = RoleCatalog::builtin().unwrap();
        assert_eq!(catalog.resolve("nonexistent-role").id, GENERAL_ROLE);
        assert_eq!(catalog.resolve("").id, GENERAL_ROLE);
        assert_eq!(catalog.resolve("Data-Scientist").id, "data-scientist");
    }

    #[test]
    fn test_general_profile_shape() {
        let catalog = RoleCatalog::builtin().unwrap();
        let general = catalog.general();
        assert!(general.core.is_empty());
        assert!(general.peripheral.is_empty());
        assert_eq!(general.transferable.len(), 10);
    }

    #[test]
    fn test_tier_weights_in_range() {
        let catalog = RoleCatalog::builtin().unwrap();
        for summary in catalog.available_roles() {
            let profile = catalog.resolve(&summary.key);
            assert!((0.7..=0.75).contains(&profile.core.weight), "{}", profile.id);
            assert!((0.4..=0.5).contains(&profile.transferable.weight), "{}", profile.id);
            assert!((0.15..=0.2).contains(&profile.peripheral.weight), "{}", profile.id);
        }
    }

    #[test]
    fn test_keyword_text_excludes_peripheral() {
        let catalog = RoleCatalog::builtin().unwrap();
        let text = catalog.resolve("backend-developer").keyword_text();
        assert!(text.starts_with("server api rest"));
        assert!(text.contains("problem solving"));
        assert!(!text.contains("marketing"));
    }

    #[test]
    fn test_tier_substring_containment() {
        let catalog = RoleCatalog::builtin().unwrap();
        let core = &catalog.resolve("backend-developer").core;
        let hits = core.contained_in("built rest apis with python");

        let matched: Vec<&str> = hits.iter().map(|i| core.skills[*i].as_str()).collect();
        assert!(matched.contains(&"rest"));
        assert!(matched.contains(&"api"));
        assert!(matched.contains(&"python"));
        assert!(!matched.contains(&"graphql"));
    }

    #[test]
    fn test_closest_role_suggestion() {
        let catalog = RoleCatalog::builtin().unwrap();
        assert_eq!(catalog.closest_role("backend-develper"), Some("backend-developer"));
        assert_eq!(catalog.closest_role("zzzz"), None);
    }
}
