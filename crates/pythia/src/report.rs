use serde::{Serialize, Serializer};
use std::fmt;

/// Report framing requested by the caller.
///
/// The tag is open: unknown values are kept verbatim and only logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ReportType {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Synastry,
    General,
    Other(String),
}

impl ReportType {
    /// Parse a tag case-insensitively. Never fails.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            "synastry" => Self::Synastry,
            "general" => Self::General,
            _ => {
                log::warn!("Unknown reportType '{}'. Proceeding anyway.", tag);
                Self::Other(tag.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Synastry => "synastry",
            Self::General => "general",
            Self::Other(tag) => tag,
        }
    }

    /// Human-readable label used to frame the prompt
    pub fn label(&self) -> String {
        match self {
            Self::Daily => "일일 운세".to_string(),
            Self::Weekly => "주간 운세".to_string(),
            Self::Monthly => "월간 운세".to_string(),
            Self::Yearly => "연간 운세".to_string(),
            Self::Synastry => "합궁(시너스트리) 분석".to_string(),
            Self::General => "일반 운세".to_string(),
            Self::Other(tag) => format!("{} 운세", tag),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReportType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_case_insensitive() {
        assert_eq!(ReportType::parse("Daily"), ReportType::Daily);
        assert_eq!(ReportType::parse("YEARLY"), ReportType::Yearly);
        assert_eq!(ReportType::parse("synastry").label(), "합궁(시너스트리) 분석");
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let report = ReportType::parse("career");
        assert_eq!(report, ReportType::Other("career".to_string()));
        assert_eq!(report.as_str(), "career");
        assert_eq!(report.label(), "career 운세");
    }

    #[test]
    fn test_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&ReportType::Weekly).unwrap(), "\"weekly\"");
    }
}
