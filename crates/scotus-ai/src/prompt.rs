//! Instruction text sent to the research model.

use scotus_core::{Category, Dataset, Status, Urgency};

pub const SYSTEM_PROMPT: &str = "\
You are a Supreme Court research analyst. Your job is to review the current state of \
tracked SCOTUS cases and return updated JSON data reflecting any changes in status, \
new developments, or new cases worth tracking.

Focus on cases involving:
- Agency independence and presidential removal power
- Executive authority and emergency powers
- Separation of powers between branches

You must return ONLY valid JSON matching the exact schema provided. No markdown, \
no commentary, no code fences, just the raw JSON object.";

/// Render the user prompt for one research run.
///
/// Deterministic in `(current, today)`: the same dataset and date always
/// produce the same text.
pub fn build_user_prompt(current: &Dataset, today: &str) -> Result<String, serde_json::Error> {
    let current_json = serde_json::to_string_pretty(current)?;
    Ok(format!(
        "Today is {today}. Below is the current cases.json for the SCOTUS Tracker.\n\
         Review each case and update it based on your knowledge of the {term} Supreme Court term.\n\
         \n\
         For each existing case:\n\
         1. Update \"status\" if it has changed (e.g., from \"Argued\" to \"Decided\", or \"Pending\" to \"Argued\")\n\
         2. Update \"statusDetail\" with the latest information\n\
         3. Update \"background\" if there are significant new developments\n\
         4. Update \"firstOrder\" and \"secondOrder\" effects if the case has been decided or if new analysis is warranted\n\
         5. Update \"urgency\" if circumstances have changed\n\
         6. Add new sources if relevant\n\
         \n\
         Also: if there are NEW major cases this term involving agency independence, executive\n\
         authority, or separation of powers that are NOT already tracked, add them with a new\n\
         unique id (starting from {next_id}).\n\
         \n\
         Valid statuses: {statuses}\n\
         Valid urgency levels: {urgencies}\n\
         Valid categories: {categories}\n\
         \n\
         Every case must have these fields: {fields}\n\
         \n\
         Return the complete updated JSON object with this exact structure:\n\
         {{\n  \
           \"lastUpdated\": \"{today}\",\n  \
           \"term\": \"{term}\",\n  \
           \"cases\": [ ... all cases with the same fields ... ]\n\
         }}\n\
         \n\
         Current data:\n\
         {current_json}\n\
         \n\
         Return ONLY the updated JSON. If nothing has changed, return the data as-is with\n\
         today's date as lastUpdated.",
        term = current.term_label(),
        next_id = current.next_id(),
        statuses = quoted(Status::ALL.map(Status::as_str)),
        urgencies = quoted(Urgency::ALL.map(Urgency::as_str)),
        categories = quoted(Category::ALL.map(Category::as_str)),
        fields = scotus_core::validate::REQUIRED_FIELDS.join(", "),
    ))
}

fn quoted<const N: usize>(values: [&str; N]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
