use sitechat_core::lead::{LeadReport, StepOutcome};
use sitechat_core::{ChatError, Transcript};

pub fn reply_line(persona: &str, reply: &str) -> String {
    format!("{persona}'s Assistant: {reply}")
}

pub fn history(persona: &str, transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return "No messages yet.".to_string();
    }
    let mut out = String::from("Chat History:\n");
    for turn in transcript {
        out.push_str(&format!("You: {}\n", turn.question()));
        out.push_str(&reply_line(persona, turn.answer()));
        out.push('\n');
    }
    out
}

/// Completion failures and CV failures are worded differently so visitors
/// can tell which part went wrong.
pub fn error(err: &ChatError) -> String {
    match err {
        ChatError::InvalidLead(msg) => msg.clone(),
        e if e.is_lead_capture() => format!("Could not send CV: {e}"),
        e if e.is_completion() => format!("Assistant unavailable: {e}"),
        e => format!("Error: {e}"),
    }
}

/// Same wording as [`error`], for callers that exit on the failure.
pub fn failure(err: &ChatError) -> anyhow::Error {
    anyhow::anyhow!(error(err))
}

pub fn lead_report(persona: &str, report: &LeadReport) -> String {
    if report.is_success() {
        return format!("Email sent! {persona}'s CV and chat summary are on the way.");
    }
    let mut out = String::new();
    match report.delivery {
        StepOutcome::Failed(_) => out.push_str("Could not send CV."),
        _ => out.push_str(&format!(
            "Email sent! {persona}'s CV and chat summary are on the way."
        )),
    }
    for (step, reason) in report.failures() {
        out.push_str(&format!("\n  {step} failed: {reason}"));
    }
    out
}
