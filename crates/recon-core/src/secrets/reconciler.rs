//! Deciding whether a secrets file must be rewritten

use recon_cipher::{KeyMaterial, decrypt_tree};
use recon_content::{Mismatch, mismatches, yaml};
use std::fmt;

use super::desired::{Desired, unwrap_sensitive};
use crate::Result;

/// What should happen to a secrets file's content.
///
/// Both outcomes carry the sensitivity of the desired document, so the host
/// can redact reports whether or not the content is rewritten.
#[derive(Clone, PartialEq, Eq)]
pub enum ContentDecision {
    /// The decrypted file already equals the desired document.
    Unchanged { sensitive: bool },
    /// Write `content`, redacting it from reports when `sensitive`.
    Replace { content: String, sensitive: bool },
}

impl ContentDecision {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Unchanged { .. } => None,
            Self::Replace { content, .. } => Some(content),
        }
    }

    pub fn is_sensitive(&self) -> bool {
        match self {
            Self::Unchanged { sensitive } | Self::Replace { sensitive, .. } => *sensitive,
        }
    }
}

impl fmt::Debug for ContentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged { sensitive } => f
                .debug_struct("Unchanged")
                .field("sensitive", sensitive)
                .finish(),
            Self::Replace {
                content,
                sensitive: false,
            } => f
                .debug_struct("Replace")
                .field("content", content)
                .field("sensitive", &false)
                .finish(),
            Self::Replace {
                sensitive: true, ..
            } => f
                .debug_struct("Replace")
                .field("content", &"<sensitive>")
                .field("sensitive", &true)
                .finish(),
        }
    }
}

/// Decide whether `current` must be replaced by the serialized `desired`.
///
/// Without current content or without a key there is nothing to compare
/// against, so the file is replaced. Otherwise the current document has its
/// ciphertext-tagged values decrypted with `key` and is compared with the
/// desired document, coercing integer-looking strings at every leaf.
pub fn decide(
    desired: &Desired,
    current: Option<&str>,
    key: Option<&KeyMaterial>,
) -> Result<ContentDecision> {
    let (target, sensitivity) = unwrap_sensitive(desired);
    let sensitive = sensitivity.is_sensitive();
    let replace = ContentDecision::Replace {
        content: yaml::render(&target)?,
        sensitive,
    };

    let (Some(current), Some(key)) = (current, key) else {
        tracing::debug!(
            has_current = current.is_some(),
            has_key = key.is_some(),
            "Nothing to compare against, replacing content"
        );
        return Ok(replace);
    };

    let current_tree = match yaml::parse(current) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::warn!("Current content is not valid YAML, replacing it: {}", e);
            return Ok(replace);
        }
    };

    let decrypted = decrypt_tree(current_tree, key);
    let found = mismatches(&target, &decrypted);

    if found.is_empty() {
        tracing::debug!("Decrypted content matches target state");
        Ok(ContentDecision::Unchanged { sensitive })
    } else {
        tracing::debug!(
            paths = ?found.iter().map(Mismatch::path).collect::<Vec<_>>(),
            "Decrypted content did not match target state"
        );
        Ok(replace)
    }
}
