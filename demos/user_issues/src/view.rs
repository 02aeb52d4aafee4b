use crate::board::{Issue, Organization, Project};
use actionrx::Async;

/// The "My Issues" section, split into its two tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIssues {
    pub assigned: Vec<Issue>,
    pub reported: Vec<Issue>,
}

impl UserIssues {
    /// `None` when the user has no issues at all; the section is then omitted.
    pub fn partition(user_id: &str, issues: &[Issue]) -> Option<Self> {
        if issues.is_empty() {
            return None;
        }
        let assigned = issues
            .iter()
            .filter(|issue| issue.assignee.as_ref().is_some_and(|a| a.id == user_id))
            .cloned()
            .collect();
        let reported = issues
            .iter()
            .filter(|issue| issue.reporter.id == user_id)
            .cloned()
            .collect();
        Some(UserIssues { assigned, reported })
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["My Issues".to_string()];
        for (tab, issues) in [
            ("Assigned to You", &self.assigned),
            ("Reported by You", &self.reported),
        ] {
            lines.push(format!("[{tab}]"));
            lines.extend(issues.iter().map(issue_card));
        }
        lines
    }
}

pub fn issue_card(issue: &Issue) -> String {
    let assignee = issue
        .assignee
        .as_ref()
        .map_or("Unassigned", |user| user.name.as_str());
    format!(
        "  {}-{} {} [{}] {:?} -> {}",
        issue.project, issue.id, issue.title, issue.status, issue.priority, assignee
    )
}

/// One line per project, or a placeholder when the organization has none.
pub fn project_list(projects: &[Project]) -> Vec<String> {
    if projects.is_empty() {
        return vec!["  (no projects yet)".to_string()];
    }
    projects
        .iter()
        .map(|project| format!("  {} {}", project.key, project.name))
        .collect()
}

pub fn organization_header(state: &Async<Organization>) -> String {
    match state {
        Async::Success { value } => format!("{} Projects", value.name),
        Async::Fail { error, .. } => error.to_string(),
        _ => "Loading...".to_string(),
    }
}
