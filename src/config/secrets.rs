// ABOUTME: Platform access tokens read from the process environment.
// ABOUTME: Missing tokens are not an error; each step degrades on its own.

use super::Config;
use std::fmt;

/// A secret value that never prints in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short form safe for logs: `[masked]` for short tokens, else the first
    /// six and last four characters.
    pub fn masked(&self) -> String {
        mask(&self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.masked())
    }
}

pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.is_empty() {
        return "[empty]".to_string();
    }
    if chars.len() <= 12 {
        return "[masked]".to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub backend_token: Option<Token>,
    pub database_token: Option<Token>,
}

impl Secrets {
    /// Read both tokens using the variable names from `config`.
    /// Blank values count as unset.
    pub fn from_env(config: &Config) -> Self {
        Self {
            backend_token: read_token(&config.backend.token_env),
            database_token: read_token(&config.database.token_env),
        }
    }
}

fn read_token(var: &str) -> Option<Token> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Token::new)
}
