//! Built-in log fields available to every category without a definition.

use super::field::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language for standard field labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ko" => Ok(Locale::Ko),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// A built-in log attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardField {
    Date,
    EndDate,
    Time,
    StartTime,
    EndTime,
    Amount,
    Memo,
    ImageUrl,
    Share,
    Status,
    NotificationTime,
}

impl StandardField {
    pub const ALL: [StandardField; 11] = [
        StandardField::Date,
        StandardField::EndDate,
        StandardField::Time,
        StandardField::StartTime,
        StandardField::EndTime,
        StandardField::Amount,
        StandardField::Memo,
        StandardField::ImageUrl,
        StandardField::Share,
        StandardField::Status,
        StandardField::NotificationTime,
    ];

    /// Fields shown for a category that predates per-category settings.
    /// `date` is not listed; it is always reinserted at the front.
    pub const LEGACY_DEFAULTS: [StandardField; 5] = [
        StandardField::Time,
        StandardField::Amount,
        StandardField::Memo,
        StandardField::ImageUrl,
        StandardField::Share,
    ];

    /// The reference string stored in `visible_fields`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardField::Date => "date",
            StandardField::EndDate => "end_date",
            StandardField::Time => "time",
            StandardField::StartTime => "start_time",
            StandardField::EndTime => "end_time",
            StandardField::Amount => "amount",
            StandardField::Memo => "memo",
            StandardField::ImageUrl => "image_url",
            StandardField::Share => "share",
            StandardField::Status => "status",
            StandardField::NotificationTime => "notification_time",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            StandardField::Date | StandardField::EndDate => FieldType::Date,
            StandardField::Time
            | StandardField::StartTime
            | StandardField::EndTime
            | StandardField::NotificationTime => FieldType::Time,
            StandardField::Amount => FieldType::Currency,
            StandardField::Memo => FieldType::Text,
            StandardField::ImageUrl => FieldType::Attachment,
            StandardField::Share => FieldType::Boolean,
            StandardField::Status => FieldType::Select,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                StandardField::Date => "Date",
                StandardField::EndDate => "End Date",
                StandardField::Time => "Time",
                StandardField::StartTime => "Start Time",
                StandardField::EndTime => "End Time",
                StandardField::Amount => "Amount",
                StandardField::Memo => "Memo",
                StandardField::ImageUrl => "Image",
                StandardField::Share => "Share",
                StandardField::Status => "Status",
                StandardField::NotificationTime => "Notification Time",
            },
            Locale::Ko => match self {
                StandardField::Date => "날짜",
                StandardField::EndDate => "종료 날짜",
                StandardField::Time => "시간",
                StandardField::StartTime => "시작 시간",
                StandardField::EndTime => "종료 시간",
                StandardField::Amount => "금액",
                StandardField::Memo => "메모",
                StandardField::ImageUrl => "이미지",
                StandardField::Share => "공유",
                StandardField::Status => "상태",
                StandardField::NotificationTime => "알림 시간",
            },
        }
    }

    /// Look up a standard field by its reference string.
    pub fn parse(reference: &str) -> Option<StandardField> {
        StandardField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == reference)
    }
}

impl fmt::Display for StandardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_field_parses_back() {
        for field in StandardField::ALL {
            assert_eq!(StandardField::parse(field.as_str()), Some(field));
        }
        assert_eq!(StandardField::parse("mood"), None);
    }

    #[test]
    fn labels_are_localized() {
        assert_eq!(StandardField::Date.label(Locale::En), "Date");
        assert_eq!(StandardField::Date.label(Locale::Ko), "날짜");
        assert_eq!(StandardField::ImageUrl.label(Locale::En), "Image");
    }

    #[test]
    fn standard_types_are_fixed() {
        assert_eq!(StandardField::Amount.field_type(), FieldType::Currency);
        assert_eq!(StandardField::NotificationTime.field_type(), FieldType::Time);
    }

    #[test]
    fn serde_name_matches_reference_string() {
        let yaml = serde_yaml_ng::to_string(&StandardField::NotificationTime).unwrap();
        assert_eq!(yaml.trim(), "notification_time");
    }

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("KO".parse::<Locale>().unwrap(), Locale::Ko);
        assert!("fr".parse::<Locale>().is_err());
    }
}
