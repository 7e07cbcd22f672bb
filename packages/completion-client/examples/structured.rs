//! Structured output example: ask for a typed JSON answer.
//!
//! Run with `MISTRAL_API_KEY` set.

use completion_client::{CompletionClient, MISTRAL_SMALL};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct Prospect {
    /// The person's name
    name: String,
    /// Their company
    company: String,
    /// One sentence on what they work on
    focus: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CompletionClient::from_env()?;

    let system = "Extract prospect information from text.";
    let user = "Ana Ruiz runs growth at Fernwood Labs, where she is rebuilding their onboarding funnel.";

    let prospect: Prospect = client.extract(MISTRAL_SMALL, system, user).await?;

    println!("Name:    {}", prospect.name);
    println!("Company: {}", prospect.company);
    println!("Focus:   {}", prospect.focus);

    Ok(())
}
