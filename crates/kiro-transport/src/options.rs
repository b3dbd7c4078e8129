//! Session configuration
//!
//! A flat record of independent optional fields, constructed once per
//! session and read-only thereafter. No field has cross-field invariants.

use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration for a Kiro agent session
///
/// Created by the caller before starting a session and never mutated by the
/// transport.
#[derive(Debug, Clone, Default)]
pub struct KiroAgentOptions {
    /// System prompt for the session
    pub system_prompt: Option<String>,

    /// Model identifier
    pub model: Option<String>,

    /// Maximum number of conversation turns
    pub max_turns: Option<u32>,

    /// Sampling temperature
    pub temperature: Option<f64>,

    /// Tool names the child may use without prompting. Order is preserved
    /// as given; no deduplication.
    pub allowed_tools: Vec<String>,

    /// Trust every tool. Independent of `allowed_tools`; both may be set,
    /// and last-wins semantics are left to the CLI.
    pub trust_all_tools: bool,

    /// External tool-server definitions, keyed by server name
    pub mcp_servers: HashMap<String, serde_json::Value>,

    /// Working directory for the child process. Defaults to the caller's
    /// current directory.
    pub cwd: Option<PathBuf>,

    /// Explicit path to the CLI executable, overriding resolution
    pub cli_path: Option<PathBuf>,

    /// Verbosity level; each unit adds one `-v` flag
    pub verbose: u8,

    /// Session identifier to resume
    pub resume_session: Option<String>,
}

impl KiroAgentOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the maximum number of turns
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the trusted tool names, preserving the given order
    pub fn with_allowed_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Trust all tools
    pub fn with_trust_all_tools(mut self, trust: bool) -> Self {
        self.trust_all_tools = trust;
        self
    }

    /// Add an external tool-server definition
    pub fn add_mcp_server(
        mut self,
        name: impl Into<String>,
        definition: serde_json::Value,
    ) -> Self {
        self.mcp_servers.insert(name.into(), definition);
        self
    }

    /// Set the working directory for the child process
    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Set an explicit path to the CLI executable
    pub fn with_cli_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cli_path = Some(path.into());
        self
    }

    /// Set the verbosity level
    pub fn with_verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Resume an existing session
    pub fn with_resume_session(mut self, session_id: impl Into<String>) -> Self {
        self.resume_session = Some(session_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = KiroAgentOptions::new();
        assert!(options.system_prompt.is_none());
        assert!(options.allowed_tools.is_empty());
        assert!(!options.trust_all_tools);
        assert_eq!(options.verbose, 0);
        assert!(options.cli_path.is_none());
    }

    #[test]
    fn test_builder() {
        let options = KiroAgentOptions::new()
            .with_system_prompt("You are a helpful assistant")
            .with_model("kiro-large")
            .with_max_turns(3)
            .with_allowed_tools(["Bash", "Read"])
            .with_trust_all_tools(true)
            .with_cwd("/tmp")
            .with_verbose(2)
            .with_resume_session("sess_42");

        assert_eq!(
            options.system_prompt.as_deref(),
            Some("You are a helpful assistant")
        );
        assert_eq!(options.model.as_deref(), Some("kiro-large"));
        assert_eq!(options.max_turns, Some(3));
        assert_eq!(options.allowed_tools, vec!["Bash", "Read"]);
        assert!(options.trust_all_tools);
        assert_eq!(options.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
        assert_eq!(options.verbose, 2);
        assert_eq!(options.resume_session.as_deref(), Some("sess_42"));
    }

    #[test]
    fn test_allowed_tools_preserve_order() {
        let options = KiroAgentOptions::new().with_allowed_tools(["Write", "Bash", "Write"]);
        assert_eq!(options.allowed_tools, vec!["Write", "Bash", "Write"]);
    }
}
