//! Lead form validation and notification email composition.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum length of the trimmed project goal.
pub const MIN_GOAL_LEN: usize = 10;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A contact form as posted; any field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub project_stage: Option<String>,
    #[serde(default)]
    pub project_goal: Option<String>,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub project_stage: String,
    pub project_goal: String,
}

/// Subject and plain-text body of the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadEmail {
    pub subject: String,
    pub body: String,
}

/// Whether `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl LeadForm {
    /// Validate every field, collecting all messages in field order.
    pub fn validate(self) -> Result<LeadSubmission, Vec<String>> {
        let mut errors = Vec::new();

        if filled(&self.name).is_none() {
            errors.push("Name is required".to_string());
        }

        match filled(&self.email) {
            None => errors.push("Email is required".to_string()),
            Some(email) if !is_valid_email(email) => {
                errors.push("Invalid email format".to_string());
            }
            Some(_) => {}
        }

        if filled(&self.project_type).is_none() {
            errors.push("Project type is required".to_string());
        }

        if filled(&self.project_stage).is_none() {
            errors.push("Project stage is required".to_string());
        }

        match filled(&self.project_goal) {
            None => errors.push("Project goal is required".to_string()),
            Some(goal) if goal.trim().chars().count() < MIN_GOAL_LEN => {
                errors.push(format!(
                    "Project goal must be at least {MIN_GOAL_LEN} characters"
                ));
            }
            Some(_) => {}
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LeadSubmission {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            project_type: self.project_type.unwrap_or_default(),
            project_stage: self.project_stage.unwrap_or_default(),
            project_goal: self.project_goal.unwrap_or_default(),
        })
    }
}

/// Display label for a project type key; unknown keys pass through.
#[must_use]
pub fn project_type_label(key: &str) -> &str {
    match key {
        "web" => "Website / Web Application",
        "mobile" => "Mobile Application",
        "saas" => "SaaS Platform",
        "other" => "Other",
        other => other,
    }
}

/// Display label for a project stage key; unknown keys pass through.
#[must_use]
pub fn project_stage_label(key: &str) -> &str {
    match key {
        "idea" => "Idea / Concept",
        "planning" => "Planning / Requirements",
        "in_progress" => "In Progress / Needs Help",
        "redesign" => "Redesign / Improvement",
        other => other,
    }
}

impl LeadSubmission {
    /// Compose the notification sent to the site owner.
    #[must_use]
    pub fn email(&self) -> LeadEmail {
        let project_type = project_type_label(&self.project_type);
        let body = format!(
            "New Project Inquiry Received

Contact Information:
- Name: {name}
- Email: {email}

Project Details:
- Project Type: {project_type}
- Project Stage: {stage}
- Project Goal:
{goal}

---
This inquiry was submitted through the portfolio contact form.",
            name = self.name,
            email = self.email,
            stage = project_stage_label(&self.project_stage),
            goal = self.project_goal,
        );

        LeadEmail {
            subject: format!("New Project Inquiry: {project_type}"),
            body,
        }
    }
}
