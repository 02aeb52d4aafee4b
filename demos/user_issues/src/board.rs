use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

pub const SIGN_IN_PATH: &str = "/sign-in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub key: String,
    pub name: String,
    pub organization_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStatus {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueStatus::Todo => "TODO",
            IssueStatus::InProgress => "IN PROGRESS",
            IssueStatus::InReview => "IN REVIEW",
            IssueStatus::Done => "DONE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssuePriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: u32,
    pub title: String,
    pub project: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub assignee: Option<User>,
    pub reporter: User,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Unauthorized: sign in at {redirect}")]
    Unauthenticated { redirect: &'static str },
    #[error("Organization not found")]
    OrganizationNotFound(String),
    #[error("Issue {0} not found")]
    IssueNotFound(u32),
    #[error("Board service unavailable: {0}")]
    Unavailable(String),
}

/// In-process stand-in for the board's server actions.
pub struct InMemoryBoard {
    session: Option<User>,
    organizations: HashMap<String, Organization>,
    projects: Vec<Project>,
    issues: Mutex<Vec<Issue>>,
    latency: Duration,
    read_only: bool,
}

impl InMemoryBoard {
    pub fn seeded(session: Option<User>, latency: Duration) -> Self {
        let alice = user("user_alice", "Alice");
        let bob = user("user_bob", "Bob");
        let acme = Organization {
            id: "org_acme".to_string(),
            slug: "acme".to_string(),
            name: "Acme".to_string(),
        };
        let projects = vec![
            project("WEB", "Web App", &acme),
            project("OPS", "Operations", &acme),
        ];
        let issues = vec![
            issue(1, "Login page rejects valid emails", "WEB", IssueStatus::InProgress, IssuePriority::High, Some(&alice), &bob),
            issue(2, "Sprint board drag and drop", "WEB", IssueStatus::Todo, IssuePriority::Medium, Some(&bob), &alice),
            issue(3, "Nightly export times out", "OPS", IssueStatus::InReview, IssuePriority::Urgent, Some(&alice), &alice),
            issue(4, "Rename billing project", "OPS", IssueStatus::Todo, IssuePriority::Low, None, &bob),
        ];

        InMemoryBoard {
            session,
            organizations: HashMap::from([(acme.id.clone(), acme)]),
            projects,
            issues: Mutex::new(issues),
            latency,
            read_only: false,
        }
    }

    /// Rejects every write with [`BoardError::Unavailable`].
    pub fn read_only(self) -> Self {
        InMemoryBoard {
            read_only: true,
            ..self
        }
    }

    pub async fn current_user(&self) -> Result<User, BoardError> {
        sleep(self.latency).await;
        self.session.clone().ok_or(BoardError::Unauthenticated {
            redirect: SIGN_IN_PATH,
        })
    }

    pub async fn get_organization(&self, org_id: &str) -> Result<Organization, BoardError> {
        sleep(self.latency).await;
        self.organizations
            .get(org_id)
            .cloned()
            .ok_or_else(|| BoardError::OrganizationNotFound(org_id.to_string()))
    }

    pub async fn get_projects(&self, org_id: &str) -> Result<Vec<Project>, BoardError> {
        sleep(self.latency).await;
        if !self.organizations.contains_key(org_id) {
            return Err(BoardError::OrganizationNotFound(org_id.to_string()));
        }
        Ok(self
            .projects
            .iter()
            .filter(|project| project.organization_id == org_id)
            .cloned()
            .collect())
    }

    /// Issues the user is assigned to or reported, most urgent first.
    pub async fn get_user_issues(&self, user_id: &str) -> Result<Vec<Issue>, BoardError> {
        sleep(self.latency).await;
        let issues = self.issues.lock().unwrap_or_else(PoisonError::into_inner);
        let mut mine: Vec<Issue> = issues
            .iter()
            .filter(|issue| involves(issue, user_id))
            .cloned()
            .collect();
        mine.sort_by_key(|issue| Reverse(issue.priority));
        Ok(mine)
    }

    pub async fn update_issue_status(
        &self,
        issue_id: u32,
        status: IssueStatus,
    ) -> Result<Issue, BoardError> {
        sleep(self.latency).await;
        if self.read_only {
            return Err(BoardError::Unavailable("board is read-only".to_string()));
        }
        let mut issues = self.issues.lock().unwrap_or_else(PoisonError::into_inner);
        let issue = issues
            .iter_mut()
            .find(|issue| issue.id == issue_id)
            .ok_or(BoardError::IssueNotFound(issue_id))?;
        issue.status = status;
        Ok(issue.clone())
    }
}

fn involves(issue: &Issue, user_id: &str) -> bool {
    issue.reporter.id == user_id
        || issue
            .assignee
            .as_ref()
            .is_some_and(|assignee| assignee.id == user_id)
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn project(key: &str, name: &str, organization: &Organization) -> Project {
    Project {
        key: key.to_string(),
        name: name.to_string(),
        organization_id: organization.id.clone(),
    }
}

fn issue(
    id: u32,
    title: &str,
    project: &str,
    status: IssueStatus,
    priority: IssuePriority,
    assignee: Option<&User>,
    reporter: &User,
) -> Issue {
    Issue {
        id,
        title: title.to_string(),
        project: project.to_string(),
        status,
        priority,
        assignee: assignee.cloned(),
        reporter: reporter.clone(),
    }
}
