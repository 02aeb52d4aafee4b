use crate::board::{InMemoryBoard, Issue, IssueStatus, Organization, Project, User};
use crate::tracing_setup::tracing_init;
use crate::view::{organization_header, project_list, UserIssues};
use actionrx::{ActionRunner, Async, ChannelNotifier};
use futures_signals::signal::SignalExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
mod board;
mod tracing_setup;
mod view;

const LATENCY: Duration = Duration::from_millis(30);

struct OrganizationPage {
    organization: ActionRunner<String, Organization>,
    projects: ActionRunner<String, Vec<Project>>,
    issues: ActionRunner<String, Vec<Issue>>,
    status_update: ActionRunner<(u32, IssueStatus), Issue>,
}

impl OrganizationPage {
    fn new(board: &Arc<InMemoryBoard>, notifier: &ChannelNotifier) -> Self {
        let organization: ActionRunner<String, Organization> = {
            let board = board.clone();
            ActionRunner::builder(move |org_id: String| {
                let board = board.clone();
                async move { board.get_organization(&org_id).await }
            })
            .name("organization")
            .notifier(notifier.with_source("organization"))
            .build()
        };
        let projects: ActionRunner<String, Vec<Project>> = {
            let board = board.clone();
            ActionRunner::builder(move |org_id: String| {
                let board = board.clone();
                async move { board.get_projects(&org_id).await }
            })
            .name("projects")
            .notifier(notifier.with_source("projects"))
            .build()
        };
        let issues: ActionRunner<String, Vec<Issue>> = {
            let board = board.clone();
            ActionRunner::builder(move |user_id: String| {
                let board = board.clone();
                async move { board.get_user_issues(&user_id).await }
            })
            .name("user-issues")
            .notifier(notifier.with_source("user-issues"))
            .build()
        };
        let status_update: ActionRunner<(u32, IssueStatus), Issue> = {
            let board = board.clone();
            ActionRunner::builder(move |(issue_id, status): (u32, IssueStatus)| {
                let board = board.clone();
                async move { board.update_issue_status(issue_id, status).await }
            })
            .name("issue-status")
            .notifier(notifier.with_source("issue-status"))
            .build()
        };
        OrganizationPage {
            organization,
            projects,
            issues,
            status_update,
        }
    }

    /// Renders the page for `org_id`. Returns `false` when the organization
    /// could not be loaded, in which case nothing below the header is shown.
    async fn render(&self, org_id: &str, user: &User) -> bool {
        self.organization.invoke(org_id.to_string());
        self.organization
            .signal()
            .stop_if(|state| state.is_complete())
            .for_each(|state| async move {
                info!("  Page | {}", organization_header(&state));
            })
            .await;
        // a failed lookup keeps the last organization as data; don't render it
        let Async::Success { value: organization } = self.organization.state() else {
            return false;
        };
        info!("  Page | organization slug: {}", organization.slug);

        self.projects.invoke(organization.id.clone()).await;
        match self.projects.data() {
            Some(projects) => project_list(&projects)
                .iter()
                .for_each(|line| info!("  Page | {line}")),
            None => info!("  Page | (projects unavailable)"),
        }

        self.issues.invoke(user.id.clone()).await;
        self.render_issues(&user.id);
        true
    }

    fn render_issues(&self, user_id: &str) {
        let issues = self.issues.data().unwrap_or_default();
        match UserIssues::partition(user_id, &issues) {
            Some(view) => view.render().iter().for_each(|line| info!("  Page | {line}")),
            None => info!("  Page | (no issues, section hidden)"),
        }
    }

    /// Shows the new status right away and reloads when the write fails.
    async fn move_issue(&self, user_id: &str, issue_id: u32, status: IssueStatus) {
        if let Some(mut issues) = self.issues.data() {
            if let Some(issue) = issues.iter_mut().find(|issue| issue.id == issue_id) {
                issue.status = status;
            }
            self.issues.set_data(issues);
            info!("  Page | optimistic move of #{issue_id} to {status}");
        }

        self.status_update.invoke((issue_id, status)).await;
        if self.status_update.error().is_some() {
            warn!("  Page | write failed, reloading issues");
            self.issues.invoke(user_id.to_string()).await;
        }
        self.render_issues(user_id);
    }
}

#[tokio::main]
async fn main() {
    tracing_init();

    let (notifier, mut toasts) = ChannelNotifier::channel();
    let toaster = tokio::spawn(async move {
        while let Some(toast) = toasts.recv().await {
            let source = toast.source.unwrap_or_default();
            warn!("  Toast | [{source}] {}", toast.message);
        }
    });

    let alice = User {
        id: "user_alice".to_string(),
        name: "Alice".to_string(),
    };

    info!("==========================================");
    warn!("A. Signed-out visitor is redirected");
    let board = Arc::new(InMemoryBoard::seeded(None, LATENCY));
    if let Err(error) = board.current_user().await {
        info!("  Page | {error}");
    }

    info!("==========================================");
    warn!("B. Organization page for a signed-in user");
    let board = Arc::new(InMemoryBoard::seeded(Some(alice.clone()), LATENCY));
    let page = OrganizationPage::new(&board, &notifier);
    match board.current_user().await {
        Ok(user) => {
            page.render("org_acme", &user).await;
        }
        Err(error) => info!("  Page | {error}"),
    }

    info!("==========================================");
    warn!("C. Unknown organization");
    page.render("org_missing", &alice).await;

    info!("==========================================");
    warn!("D. Optimistic status change");
    page.render("org_acme", &alice).await;
    page.move_issue(&alice.id, 3, IssueStatus::Done).await;

    info!("==========================================");
    warn!("E. Optimistic change rolled back on failure");
    let board = Arc::new(InMemoryBoard::seeded(Some(alice.clone()), LATENCY).read_only());
    let page_read_only = OrganizationPage::new(&board, &notifier);
    page_read_only.render("org_acme", &alice).await;
    page_read_only
        .move_issue(&alice.id, 1, IssueStatus::Done)
        .await;

    drop(page);
    drop(page_read_only);
    drop(notifier);
    let _ = toaster.await;

    info!("==========================================");
    info!("  Main | Finish");
}
