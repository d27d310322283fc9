//! Console layer: output, prompts, and the fixed screens of the session.

mod output;
mod prompt;

#[cfg(test)]
pub use output::MemoryReporter;
pub use output::{ConsoleReporter, Reporter, Tone};
#[cfg(test)]
pub use prompt::{Answer, ScriptedPrompter};
pub use prompt::{DialoguerPrompter, Prompter};

const RULE_WIDTH: usize = 50;

/// Prints the banner shown once at startup.
pub fn show_welcome(out: &mut dyn Reporter, endpoint: &str) {
    out.heading("Vibes Manager");
    out.plain("Welcome to the Vibes Manager!");
    out.plain("Manage your vibes in Azure Cosmos DB: add new vibes, remove existing ones,");
    out.plain("and view your entire collection.");
    out.info(&format!("Make sure your Cosmos DB account is reachable at {endpoint}"));
}

/// Prints the separator that opens each pass through the main menu.
pub fn show_rule(out: &mut dyn Reporter) {
    out.plain("");
    out.plain(&"=".repeat(RULE_WIDTH));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_mentions_endpoint() {
        let mut out = MemoryReporter::new();
        show_welcome(&mut out, "https://localhost:8081");
        assert!(out.contains_with(Tone::Info, "https://localhost:8081"));
    }

    #[test]
    fn test_rule_width() {
        let mut out = MemoryReporter::new();
        show_rule(&mut out);
        assert_eq!(out.lines()[1].1.len(), 50);
    }
}
