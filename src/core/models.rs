use serde::{Deserialize, Serialize};

/// Target summary length offered next to the style choice.
///
/// Recorded with each request but not consulted when generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [
        SummaryLength::Short,
        SummaryLength::Medium,
        SummaryLength::Long,
    ];

    #[must_use]
    pub fn characters(self) -> u32 {
        match self {
            SummaryLength::Short => 50,
            SummaryLength::Medium => 150,
            SummaryLength::Long => 300,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SummaryLength::Short => "Short (50 characters)",
            SummaryLength::Medium => "Medium (150 characters)",
            SummaryLength::Long => "Long (300 characters)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A message box shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}
