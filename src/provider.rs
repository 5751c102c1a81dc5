//! Agent providers that carry their own model lists

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Agent backend whose models are listed and managed.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// The `claude` CLI.
    #[default]
    Claude,
    /// The Cursor agent.
    Cursor,
    /// The `codex` CLI.
    Codex,
}

impl Provider {
    /// All supported providers, in display order.
    pub const ALL: &'static [Self] = &[Self::Claude, Self::Cursor, Self::Codex];

    /// Lowercase identifier used on the command line and in storage keys.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Cursor => "cursor",
            Self::Codex => "codex",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Cursor => "Cursor",
            Self::Codex => "Codex",
        }
    }

    /// Durable storage key holding this provider's custom models.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Claude => "claude-custom-models",
            Self::Cursor => "cursor-custom-models",
            Self::Codex => "codex-custom-models",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a string names no known provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider '{0}' (expected one of: claude, cursor, codex)")]
pub struct ParseProviderError(String);

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseProviderError(s.to_string()))
    }
}
