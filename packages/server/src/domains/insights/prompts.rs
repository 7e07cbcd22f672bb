//! Prompts for insight and email generation.

use extraction::SourceType;

pub const INSIGHTS_SYSTEM_PROMPT: &str = r#"You are an expert sales research assistant helping solopreneurs and founders generate leads.

Analyze the provided content (a LinkedIn profile, company website, social profile, repository or document) and produce:

1. Exactly 5 personalized conversation starters: opening lines that show you have done your research. Each must be specific and genuine, and reference something concrete from the content.
2. Exactly 3 pain points: challenges or problems this person or company is likely facing, based on the content.
3. Exactly 3 market gap opportunities: untapped opportunities or areas where they could improve.
4. A summary of exactly 2 sentences describing who this person or company is.

Be specific, not generic. Reference actual details from the content.
Respond only with JSON matching the provided schema."#;

pub const EMAIL_SYSTEM_PROMPT: &str = r#"You are an expert email writer for sales professionals.

Write a short, personalized outreach email (at most 150 words) that:
- Uses the provided conversation starter naturally
- Is genuine and not salesy
- Ends with a soft, non-pushy call to action
- Reads like a person wrote it

Respond only with JSON matching the provided schema."#;

pub fn insights_user_prompt(source_type: SourceType, content: &str) -> String {
    format!(
        "Analyze the following {} content and generate insights:\n\n---\n{}\n---\n\nProvide personalized conversation starters, pain points and market gap opportunities based on this content.",
        source_type, content
    )
}

pub fn email_user_prompt(research: &str, starter: &str) -> String {
    format!(
        "Based on this research about the prospect:\n{}\n\nUsing this conversation starter as inspiration:\n\"{}\"\n\nWrite a personalized outreach email.",
        research, starter
    )
}
