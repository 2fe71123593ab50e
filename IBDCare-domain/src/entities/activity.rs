use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Disease-activity level derived from logged symptoms.
///
/// The ordering is total and load-bearing: trend logic compares levels with
/// `<`/`>=`, so the variants must stay declared from least to most active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DiseaseActivity {
    /// No meaningful symptom burden
    Remission,

    /// Low symptom burden
    Mild,

    /// Clear symptom burden, typically with visible stool changes
    Moderate,

    /// High symptom burden requiring clinical attention
    Severe,
}

impl DiseaseActivity {
    /// Parse a clinician-assigned severity label (e.g. from a diagnosis)
    /// onto the ordered scale. Matching is case-insensitive and tolerant of
    /// surrounding text such as "Moderate (B2)".
    pub fn from_severity_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("remission") {
            Some(DiseaseActivity::Remission)
        } else if label.contains("severe") {
            Some(DiseaseActivity::Severe)
        } else if label.contains("moderate") {
            Some(DiseaseActivity::Moderate)
        } else if label.contains("mild") {
            Some(DiseaseActivity::Mild)
        } else {
            None
        }
    }

    /// Stable lowercase name for logging and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseActivity::Remission => "remission",
            DiseaseActivity::Mild => "mild",
            DiseaseActivity::Moderate => "moderate",
            DiseaseActivity::Severe => "severe",
        }
    }
}

impl std::fmt::Display for DiseaseActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_ordering_is_total() {
        assert!(DiseaseActivity::Remission < DiseaseActivity::Mild);
        assert!(DiseaseActivity::Mild < DiseaseActivity::Moderate);
        assert!(DiseaseActivity::Moderate < DiseaseActivity::Severe);
    }

    #[test]
    fn test_severity_label_parsing() {
        assert_eq!(
            DiseaseActivity::from_severity_label("Moderate"),
            Some(DiseaseActivity::Moderate)
        );
        assert_eq!(
            DiseaseActivity::from_severity_label("severe flare"),
            Some(DiseaseActivity::Severe)
        );
        assert_eq!(
            DiseaseActivity::from_severity_label("In Remission"),
            Some(DiseaseActivity::Remission)
        );
        assert_eq!(DiseaseActivity::from_severity_label("unknown"), None);
    }
}
