//! Bug report model and the fixed display lookups for its enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::email::{is_valid_email, MAX_EMAIL_LEN};

/// Badge color used when a payload carries a priority we don't know
pub const FALLBACK_PRIORITY_COLOR: &str = "#6B7280";

// =============================================================================
// Priority
// =============================================================================

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Human label for select options
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Hex color of the priority pill in notification emails
    pub fn email_color(&self) -> &'static str {
        match self {
            Priority::Low => "#22C55E",
            Priority::Medium => "#EAB308",
            Priority::High => "#F97316",
            Priority::Critical => "#EF4444",
        }
    }

    /// CSS classes of the priority badge in the bug list
    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::Low => "bg-green-100 text-green-800",
            Priority::Medium => "bg-yellow-100 text-yellow-800",
            Priority::High => "bg-orange-100 text-orange-800",
            Priority::Critical => "bg-red-100 text-red-800",
        }
    }

    /// Email color for an untyped priority string; unknown values get a neutral gray
    pub fn email_color_for(raw: &str) -> &'static str {
        raw.parse::<Priority>()
            .map(|p| p.email_color())
            .unwrap_or(FALLBACK_PRIORITY_COLOR)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

// =============================================================================
// Status
// =============================================================================

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// Icon shown next to a bug in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIcon {
    /// Icon name from the lucide set
    pub name: &'static str,
    pub color_class: &'static str,
    /// Text fallback rendered inside the icon element
    pub glyph: &'static str,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }

    pub fn icon(&self) -> StatusIcon {
        match self {
            Status::Open => StatusIcon {
                name: "alert-circle",
                color_class: "text-red-500",
                glyph: "!",
            },
            Status::InProgress => StatusIcon {
                name: "clock",
                color_class: "text-yellow-500",
                glyph: "…",
            },
            Status::Resolved => StatusIcon {
                name: "check-circle",
                color_class: "text-green-500",
                glyph: "✓",
            },
            Status::Closed => StatusIcon {
                name: "check-circle",
                color_class: "text-gray-500",
                glyph: "✓",
            },
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

// =============================================================================
// Bug Report
// =============================================================================

/// A persisted bug report. `id` and `created_at` come from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BugReport {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub assigned_to: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Candidate bug submitted by a user (JSON body or HTML form)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBug {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assigned_to: String,
}

impl CreateBug {
    /// Trims text fields and enforces the required-field rules.
    /// Returns the normalized input or a user-facing message.
    pub fn validate(self) -> Result<Self, String> {
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let assigned_to = self.assigned_to.trim().to_string();

        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if description.is_empty() {
            return Err("Description is required".to_string());
        }
        if assigned_to.is_empty() {
            return Err("Assignee email is required".to_string());
        }
        if assigned_to.len() > MAX_EMAIL_LEN {
            return Err(format!(
                "Assignee email must be at most {} characters",
                MAX_EMAIL_LEN
            ));
        }
        if !is_valid_email(&assigned_to) {
            return Err("Assignee must be a valid email address".to_string());
        }

        Ok(Self {
            title,
            description,
            priority: self.priority,
            assigned_to,
        })
    }
}
