//! Menu command classification.
//!
//! Maps one trimmed logical line to one of the fixed menu actions.
//! Matching is case-sensitive over a small literal alphabet plus two
//! structural patterns (`/query` and `g<digits>`). Parsing owns no
//! state and performs no I/O; routing happens in the session.

/// A classified menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/` + text: search and display the result.
    Search(String),
    /// `p`, `P`, or menu code `3`: list all resources.
    ListResources,
    /// `g`, `G`, or menu code `4`: list all resource groups.
    ListGroups,
    /// `g` + digits: list the members of the 1-based group index.
    GroupMembers(usize),
    /// `q`, `Q`, or menu code `0`: end the session.
    Quit,
    /// `h`, `H`, or menu code `9`: redisplay the banner.
    Help,
    /// Any other non-empty token: attempt to connect.
    Connect(String),
    /// Empty line: nothing to do.
    Noop,
}

impl Command {
    /// Classify one trimmed logical line.
    pub fn parse(line: &str) -> Self {
        if line.is_empty() {
            return Command::Noop;
        }
        if line.starts_with('/') {
            return Command::Search(line.trim_start_matches('/').to_string());
        }
        match line {
            "p" | "P" | "3" => return Command::ListResources,
            "g" | "G" | "4" => return Command::ListGroups,
            "q" | "Q" | "0" => return Command::Quit,
            "h" | "H" | "9" => return Command::Help,
            _ => {}
        }
        if let Some(digits) = line.strip_prefix('g') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(index) = digits.parse::<usize>() {
                    return Command::GroupMembers(index);
                }
            }
        }
        Command::Connect(line.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_strips_leading_slashes() {
        assert_eq!(Command::parse("/web"), Command::Search("web".to_string()));
        assert_eq!(Command::parse("//web"), Command::Search("web".to_string()));
        assert_eq!(Command::parse("/"), Command::Search(String::new()));
    }

    #[test]
    fn resource_listing_literals() {
        for token in ["p", "P", "3"] {
            assert_eq!(Command::parse(token), Command::ListResources);
        }
    }

    #[test]
    fn group_listing_literals() {
        for token in ["g", "G", "4"] {
            assert_eq!(Command::parse(token), Command::ListGroups);
        }
    }

    #[test]
    fn quit_literals() {
        for token in ["q", "Q", "0"] {
            assert_eq!(Command::parse(token), Command::Quit);
        }
    }

    #[test]
    fn help_literals() {
        for token in ["h", "H", "9"] {
            assert_eq!(Command::parse(token), Command::Help);
        }
    }

    #[test]
    fn group_index_pattern() {
        assert_eq!(Command::parse("g1"), Command::GroupMembers(1));
        assert_eq!(Command::parse("g42"), Command::GroupMembers(42));
        // Leading zeros still parse as the same index.
        assert_eq!(Command::parse("g03"), Command::GroupMembers(3));
    }

    #[test]
    fn group_prefix_without_digits_is_a_connect_token() {
        assert_eq!(Command::parse("gx"), Command::Connect("gx".to_string()));
        assert_eq!(Command::parse("g1a"), Command::Connect("g1a".to_string()));
    }

    #[test]
    fn uppercase_group_index_is_a_connect_token() {
        // Matching is case-sensitive; only lowercase `g` takes an index.
        assert_eq!(Command::parse("G1"), Command::Connect("G1".to_string()));
    }

    #[test]
    fn empty_line_is_noop() {
        assert_eq!(Command::parse(""), Command::Noop);
    }

    #[test]
    fn other_tokens_attempt_connect() {
        assert_eq!(Command::parse("web1"), Command::Connect("web1".to_string()));
        // Plain numbers outside the menu codes go to the resolver for
        // numeric disambiguation.
        assert_eq!(Command::parse("2"), Command::Connect("2".to_string()));
        assert_eq!(Command::parse("10"), Command::Connect("10".to_string()));
    }
}
