//! Tiered token resolution.
//!
//! Turns a free-text token into a ranked set of resource matches with
//! deterministic precedence:
//!
//! 1. Empty token: every resource, in snapshot order.
//! 2. Purely numeric token: 1-based index into the previous search
//!    result; out of range yields an empty result, never an error.
//!    Numeric tokens never fall through to attribute matching.
//! 3. Exactly one resource whose searched attributes equal the token.
//!    Two or more exact matches are demoted to the substring tier.
//! 4. Substring match over the same attribute set.
//!
//! The attribute set and case policy are configuration, not hard-coded.

use crate::inventory::Resource;

/// A resource attribute the resolver may match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAttr {
    /// Host identifier.
    Hostname,
    /// Network address.
    Address,
    /// Free-text annotation.
    Comment,
}

impl SearchAttr {
    fn value<'a>(&self, resource: &'a Resource) -> &'a str {
        match self {
            SearchAttr::Hostname => &resource.hostname,
            SearchAttr::Address => &resource.address,
            SearchAttr::Comment => &resource.comment,
        }
    }
}

/// Which attributes are searched and how tokens compare against them.
#[derive(Debug, Clone)]
pub struct SearchSpec {
    /// Attributes consulted by the exact and substring tiers.
    pub attributes: Vec<SearchAttr>,
    /// Fold case before comparing.
    pub case_insensitive: bool,
}

impl Default for SearchSpec {
    fn default() -> Self {
        Self {
            attributes: vec![SearchAttr::Hostname, SearchAttr::Address, SearchAttr::Comment],
            case_insensitive: false,
        }
    }
}

impl SearchSpec {
    /// True when any searched attribute equals the token.
    fn matches_exact(&self, resource: &Resource, token: &str) -> bool {
        self.attributes.iter().any(|attr| {
            let value = attr.value(resource);
            if self.case_insensitive {
                value.eq_ignore_ascii_case(token)
            } else {
                value == token
            }
        })
    }

    /// True when any searched attribute contains the token.
    fn matches_substring(&self, resource: &Resource, token: &str) -> bool {
        self.attributes.iter().any(|attr| {
            let value = attr.value(resource);
            if self.case_insensitive {
                value.to_ascii_lowercase().contains(&token.to_ascii_lowercase())
            } else {
                value.contains(token)
            }
        })
    }
}

/// Resolve `token` against a fixed resource snapshot.
///
/// `previous` is the session's current search result; it anchors the
/// 1-based numeric disambiguation tier. Pure and deterministic for a
/// given snapshot.
pub fn resolve(
    token: &str,
    resources: &[Resource],
    previous: &[Resource],
    spec: &SearchSpec,
) -> Vec<Resource> {
    let token = token.trim();

    if token.is_empty() {
        return resources.to_vec();
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        return match token.parse::<usize>() {
            Ok(index) if index >= 1 && index <= previous.len() => {
                vec![previous[index - 1].clone()]
            }
            _ => Vec::new(),
        };
    }

    let exact: Vec<&Resource> = resources
        .iter()
        .filter(|r| spec.matches_exact(r, token))
        .collect();
    if let [only] = exact.as_slice() {
        return vec![(*only).clone()];
    }

    resources
        .iter()
        .filter(|r| spec.matches_substring(r, token))
        .cloned()
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
