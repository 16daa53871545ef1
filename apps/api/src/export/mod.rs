// Export surface: one-page PDF rendering of a summary and delivery of that PDF by
// mail. Rendering is synchronous; handlers move it onto the blocking pool.

pub mod handlers;
pub mod mailer;
pub mod pdf;
