//! Terminal rendering of timeline entries
//!
//! Pure presentation: formats messages for the terminal with colored
//! markers and prints them. No state lives here.

use colored::Colorize;

use crate::session::message::{ActivityPhase, Analysis, ComplianceStatus, Message, MessageBody};

/// Print the welcome banner shown when entering interactive mode
pub fn print_banner(base_url: &str) {
    println!("{}", "Complichat".bold());
    println!("Compliance-analysis assistant — backend: {}", base_url);
    println!();
    println!("Try:");
    println!("  \"Analyze uploaded PDF for risks\"");
    println!("  \"What are the audit requirements?\"");
    println!("  \"Check for GDPR compliance\"");
    println!();
    println!("Type /help for commands, /exit to quit.");
    println!();
}

/// Print one timeline entry
pub fn print_message(message: &Message) {
    println!("{}", format_message(message));
}

/// Format one timeline entry for the terminal
pub fn format_message(message: &Message) -> String {
    match &message.body {
        MessageBody::User { content } => format!("{} {}", "you:".bold(), content),
        MessageBody::Thinking { content } => format!("{}", content.dimmed()),
        MessageBody::Assistant { content, analysis } => format_assistant(content, analysis),
        MessageBody::Activity { content, phase } => format_activity(content, *phase),
    }
}

fn format_assistant(content: &str, analysis: &Analysis) -> String {
    let mut out = String::new();
    out.push_str(content);

    if let Some(status) = analysis.status {
        out.push_str(&format!("\n\n{}", status_badge(status)));
    }

    if let Some(reasoning) = &analysis.reasoning {
        out.push_str(&format!(
            "\n\n{}\n{}",
            "Detailed analysis:".bold(),
            reasoning
        ));
    }

    if !analysis.relevant_clauses.is_empty() {
        out.push_str(&format!("\n\n{}", "Relevant regulatory clauses:".bold()));
        for clause in &analysis.relevant_clauses {
            out.push_str(&format!("\n  - {}", clause));
        }
    }

    if !analysis.sources.is_empty() {
        out.push_str(&format!("\n\n{}", "Sources referenced:".bold()));
        for source in &analysis.sources {
            match source.page_number {
                Some(page) => {
                    out.push_str(&format!("\n  - {} (p.{})", source.document_name, page))
                }
                None => out.push_str(&format!("\n  - {}", source.document_name)),
            }
        }
    }

    out
}

fn format_activity(content: &str, phase: ActivityPhase) -> String {
    match phase {
        ActivityPhase::Loading => format!("{} {}", "...".dimmed(), content.dimmed()),
        ActivityPhase::Success => format!("{} {}", "ok".green(), content),
        ActivityPhase::Error => format!("{} {}", "error".red(), content),
    }
}

fn status_badge(status: ComplianceStatus) -> String {
    let label = status.to_string().to_uppercase();
    match status {
        ComplianceStatus::Compliant => format!("[{}]", label.green().bold()),
        ComplianceStatus::NonCompliant => format!("[{}]", label.red().bold()),
        ComplianceStatus::NeedsReview => format!("[{}]", label.yellow().bold()),
    }
}

/// Format the interactive prompt, tagging the active document when set
pub fn format_prompt(active_document: Option<&str>) -> String {
    match active_document {
        Some(name) => format!("[{}] >> ", name),
        None => ">> ".to_string(),
    }
}
