//! Show command - render the review panel for an issue

use std::path::PathBuf;

use clap::Args;
use vetter_core::{ApplicationView, Config, PanelView};

use super::{load_issue, open_session, KindArg};

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue JSON file with its applications
    pub issue: PathBuf,

    /// Application to open, as an index into the issue's applications
    #[arg(short = 'i', long, default_value_t = 0)]
    pub request_index: usize,

    /// Category tab to switch to after opening
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: Option<KindArg>,

    /// Applicant to show within the category
    #[arg(short, long)]
    pub applicant: Option<usize>,

    /// Hide the decision controls
    #[arg(long)]
    pub read_only: bool,

    /// Print the panel as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    pub fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let issue = load_issue(&self.issue)?;
        if verbose {
            tracing::info!(
                issue = issue.number,
                requests = issue.requests_data.len(),
                "Loaded issue"
            );
        }

        let session = open_session(
            issue,
            self.request_index,
            self.read_only || config.review.read_only,
            self.kind,
            self.applicant,
        )?;
        let panel = PanelView::from_session(&session)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&panel)?);
        } else {
            print!("{}", render_panel(&panel));
        }

        Ok(())
    }
}

/// Plain-text rendering of the panel
pub fn render_panel(panel: &PanelView) -> String {
    let mut out = String::new();

    let heading = match &panel.issue_title {
        Some(title) => format!("Review Work Plan: #{} {}", panel.issue_number, title),
        None => format!("Review Work Plan: #{}", panel.issue_number),
    };
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.chars().count()));
    out.push_str("\n\n");

    out.push_str(&selector_line("Type", &panel.type_labels, panel.type_index));
    out.push_str(&selector_line("Applicant", &panel.applicants, panel.applicant_index));
    out.push('\n');

    out.push_str(&render_application(&panel.application));

    if panel.decision_enabled {
        out.push_str("\nDecision: vetter review --accept | --reject [--feedback TEXT]\n");
    }

    out
}

fn selector_line<S: AsRef<str>>(label: &str, options: &[S], active: usize) -> String {
    let items: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if i == active {
                format!("[{}]", option.as_ref())
            } else {
                option.as_ref().to_string()
            }
        })
        .collect();
    format!("{}: {}\n", label, items.join("  "))
}

fn render_application(view: &ApplicationView) -> String {
    let mut out = String::new();

    out.push_str(&format!("Applicant: {}", view.applicant_name));
    if view.applicant_name != view.applicant_login {
        out.push_str(&format!(" ({})", view.applicant_login));
    }
    out.push('\n');
    if let Some(url) = &view.applicant_url {
        out.push_str(&format!("  Profile: {}\n", url));
    }
    if let Some(date) = &view.application_date {
        out.push_str(&format!("  Applied: {}\n", date));
    }
    out.push('\n');

    out.push_str("Work Plan:\n");
    for line in view.workplan.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str(&format!("Estimated Hours: {}\n", view.hours));
    out.push_str(&format!("Estimated Completion: {}\n", view.eta));

    if let Some(status) = &view.status {
        out.push('\n');
        out.push_str(&format!("Status: {}\n", status.verdict()));
        out.push_str(&format!("  Reviewed: {}\n", status.review_date));
        if let Some(reviewer) = &status.reviewer {
            out.push_str(&format!("  Reviewer: {}\n", reviewer));
        }
        out.push_str(&format!("  Feedback: {}\n", status.feedback));
    }

    out
}
