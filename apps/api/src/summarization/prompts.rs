// Prompt templates for the three summarization flows.
// Placeholders are replaced with `str::replace` before sending; the system
// instruction is llm_client::prompts::JSON_ONLY_SYSTEM for all of them.

/// Summarize template. Replace `{transcript}` and `{custom_instructions}`.
pub const SUMMARIZE_PROMPT_TEMPLATE: &str = r#"You are an AI assistant. Your task is to summarize the given meeting transcript.
Return a JSON object with a single key "summary".
The value of "summary" must be a clear, concise summary in bullet points (not a verbatim copy).
Focus on:
- Key discussion points
- Decisions made
- Action items (if mentioned)
{custom_instructions}
Transcript:
{transcript}
"#;

/// Refine template. Replace `{initial_summary}` and `{user_edits}`.
pub const REFINE_PROMPT_TEMPLATE: &str = r#"You are an AI assistant that refines summaries based on user edits.

The initial summary is:
{initial_summary}

The user has made the following edits:
{user_edits}

Please incorporate the user edits into the summary and refine it to be more accurate, concise, and informative.
Return a JSON object with a single key "refinedSummary" holding the complete refined summary.
"#;

/// Customize template. Replace `{transcript}`, `{original_summary}` and `{custom_prompt}`.
pub const CUSTOMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert AI assistant specializing in refining meeting summaries.

You will take an existing summary and refine it based on custom instructions provided by the user.
Your goal is to tailor the summary to the user's specific needs and focus on particular aspects of the meeting, taking into account the original transcript.

Original Transcript: {transcript}
Original Summary: {original_summary}
Custom Instructions: {custom_prompt}

Return a JSON object with a single key "refinedSummary" holding the refined summary.
"#;
