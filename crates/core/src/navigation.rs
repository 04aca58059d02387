// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Navigation destinations and link classification

use serde::{Deserialize, Serialize};

/// An attempted navigation, as captured by the interceptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "to", rename_all = "snake_case")]
pub enum Destination {
    Push(String),
    Replace(String),
    Back,
    Forward,
    /// In-app link click; proceeds as a push to the link's href
    Link(String),
}

impl Destination {
    /// Route this destination lands on, when it is known up front
    pub fn route(&self) -> Option<&str> {
        match self {
            Destination::Push(to) | Destination::Replace(to) | Destination::Link(to) => Some(to),
            Destination::Back | Destination::Forward => None,
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Push(to) => write!(f, "push {}", to),
            Destination::Replace(to) => write!(f, "replace {}", to),
            Destination::Back => write!(f, "back"),
            Destination::Forward => write!(f, "forward"),
            Destination::Link(to) => write!(f, "link {}", to),
        }
    }
}

/// A clicked anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub href: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub download: bool,
}

impl LinkTarget {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: None,
            download: false,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_download(mut self) -> Self {
        self.download = true;
        self
    }

    /// Links that leave the guarded domain and are never intercepted:
    /// absolute or protocol-relative URLs, scheme URIs (`mailto:` and the
    /// like), anything opening outside the current frame, and downloads.
    pub fn is_external(&self) -> bool {
        if self.download {
            return true;
        }
        if let Some(target) = &self.target {
            if !target.is_empty() && !target.eq_ignore_ascii_case("_self") {
                return true;
            }
        }
        let href = self.href.trim();
        href.starts_with("//") || has_scheme(href)
    }
}

/// `scheme:` prefix per RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// What the caller should do with a link click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDisposition {
    /// Let the default action happen
    PassThrough,
    /// Default action must be prevented; the attempt was captured
    Intercepted,
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
