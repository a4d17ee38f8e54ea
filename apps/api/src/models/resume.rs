#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// The structured document the editor mutates. Pure data: personal fields
/// plus three ordered entry collections. Collection order is display order
/// and survives load/save round-trips unchanged (`Vec` + serde).
///
/// Wire shape is camelCase JSON (`personalInfo`, `startDate`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<SkillEntry>,
}

impl ResumeData {
    /// The blank document a session starts from before any load completes.
    pub fn empty() -> Self {
        ResumeData {
            personal_info: PersonalInfo::default(),
            education: Vec::new(),
            experience: Vec::new(),
            skills: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    pub gender: String,
    pub birth_date: String,
    /// Optional photo as a data URI; empty string when unset.
    pub photo: String,
}

/// Entry ids are assigned once at creation and stay stable for the entry's
/// lifetime. They exist for UI diffing and targeted update/removal only,
/// never as storage keys across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub major: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl EducationEntry {
    pub fn new() -> Self {
        EducationEntry {
            id: Uuid::new_v4(),
            school: String::new(),
            degree: String::new(),
            major: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl ExperienceEntry {
    pub fn new() -> Self {
        ExperienceEntry {
            id: Uuid::new_v4(),
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub id: Uuid,
    pub description: String,
}

impl SkillEntry {
    pub fn new() -> Self {
        SkillEntry {
            id: Uuid::new_v4(),
            description: String::new(),
        }
    }
}

/// One tag from the fixed presentation-style set. Orthogonal to document
/// content; persisted alongside it per owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeStyle {
    #[serde(rename = "style-1")]
    Style1,
    #[serde(rename = "style-2")]
    Style2,
    #[serde(rename = "style-3")]
    Style3,
}

impl ResumeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStyle::Style1 => "style-1",
            ResumeStyle::Style2 => "style-2",
            ResumeStyle::Style3 => "style-3",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "style-1" => Some(ResumeStyle::Style1),
            "style-2" => Some(ResumeStyle::Style2),
            "style-3" => Some(ResumeStyle::Style3),
            _ => None,
        }
    }
}

impl Default for ResumeStyle {
    fn default() -> Self {
        ResumeStyle::Style1
    }
}

/// Opaque identifier for "whose document this is". Stable for a session's
/// duration; absent when nobody is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub user_id: Uuid,
    pub data: Value,
    pub style: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_camel_case() {
        let mut data = ResumeData::empty();
        data.personal_info.name = "Ada Lovelace".to_string();
        data.education.push(EducationEntry::new());

        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json["education"][0].get("startDate").is_some());
        assert_eq!(json["personalInfo"]["name"], "Ada Lovelace");
    }

    #[test]
    fn test_collection_order_survives_round_trip() {
        let mut data = ResumeData::empty();
        for school in ["First", "Second", "Third"] {
            let mut e = EducationEntry::new();
            e.school = school.to_string();
            data.education.push(e);
        }

        let json = serde_json::to_string(&data).unwrap();
        let back: ResumeData = serde_json::from_str(&json).unwrap();
        let order: Vec<&str> = back.education.iter().map(|e| e.school.as_str()).collect();
        assert_eq!(order, vec!["First", "Second", "Third"]);
        assert_eq!(back, data);
    }

    #[test]
    fn test_entry_ids_are_stable_and_unique() {
        let a = SkillEntry::new();
        let b = SkillEntry::new();
        assert_ne!(a.id, b.id);

        let json = serde_json::to_string(&a).unwrap();
        let back: SkillEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, a.id);
    }

    #[test]
    fn test_style_tags_round_trip() {
        for style in [ResumeStyle::Style1, ResumeStyle::Style2, ResumeStyle::Style3] {
            assert_eq!(ResumeStyle::from_tag(style.as_str()), Some(style));
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.as_str()));
        }
        assert_eq!(ResumeStyle::from_tag("style-9"), None);
    }
}
