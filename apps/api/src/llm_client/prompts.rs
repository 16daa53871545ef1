// Shared prompt fragments for every summarization flow.
// Flow-specific templates live in summarization/prompts.rs.

/// System instruction that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to the refine prompt so the model returns the summary itself.
pub const NO_CHATTER_INSTRUCTION: &str =
    "Do not add any extra conversational text. Just return the summary.";
