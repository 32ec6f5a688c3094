//! Launch command assembly

use super::request::{OpenOption, OpenRequest};
use std::path::Path;

/// Ordered command-line tokens: executable, option pairs, target file last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    tokens: Vec<String>,
}

impl LaunchCommand {
    /// Build the command for opening `request` with `executable`.
    ///
    /// Pure: nothing is checked against the filesystem.
    pub fn build(executable: &Path, request: &OpenRequest) -> Self {
        let mut tokens = vec![executable.to_string_lossy().into_owned()];

        for option in OpenOption::ALL {
            if let Some(value) = request.option(option) {
                tokens.push(option.flag().to_string());
                tokens.push(value.to_string());
            }
        }

        tokens.push(request.file.to_string_lossy().into_owned());
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// Render as a single shell-invocable string
    pub fn to_shell_string(&self) -> String {
        self.tokens
            .iter()
            .map(|t| quote_token(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_token(token: &str) -> String {
    let needs_quotes = token.is_empty() || token.chars().any(|c| c.is_whitespace() || c == '"');
    if !needs_quotes {
        return token.to_string();
    }
    format!("\"{}\"", token.replace('"', "\\\""))
}
