//! Opportunity Classifier
//!
//! Pure predicate over a decoded log notification and a configured set of
//! watched SPL token addresses. Flags sandwich opportunities: a watched
//! token appearing in the logs of a transaction that performs a swap or buy.

use crate::decoder::LogsNotification;

/// Action keywords that mark a log line as a trade we can front-run.
///
/// The (swap OR buy) variant is used: either keyword alone satisfies the
/// action half of the predicate.
pub const ACTION_KEYWORDS: &[&str] = &["swap", "buy"];

/// Set of watched SPL token addresses, folded to lowercase for
/// case-insensitive matching.
///
/// Immutable after construction. Reloading configuration means building a
/// new set with [`WatchedTokenSet::parse`], never mutating a shared one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedTokenSet {
    tokens: Vec<String>,
}

impl WatchedTokenSet {
    /// Parse a comma-delimited token address list
    ///
    /// Entries are trimmed and empty entries are discarded, so `""`,
    /// `","` and `" , "` all produce an empty set.
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();
        Self { tokens }
    }

    /// Number of watched tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if no tokens are being watched
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check whether any watched token appears as a substring of `line`
    ///
    /// # Arguments
    /// * `line` - A single log line, any case
    pub fn matches_line(&self, line: &str) -> bool {
        let line = line.to_lowercase();
        self.tokens.iter().any(|token| line.contains(token))
    }
}

/// Check whether a notification is a sandwich opportunity
///
/// Pure and deterministic: no side effects, same result on repeated calls
/// with identical inputs. The predicate is a conjunction:
/// - any watched token appears case-insensitively in any log line, AND
/// - any log line contains an action keyword ("swap" or "buy").
///
/// The two halves need not match in the same log line. An empty watched
/// set never matches, so a blank token configuration cannot flag every
/// message. This is a permissive substring heuristic, not a parser of the
/// log grammar.
pub fn is_sandwich_opportunity(notification: &LogsNotification, tokens: &WatchedTokenSet) -> bool {
    if tokens.is_empty() {
        return false;
    }

    let token_match = notification.logs.iter().any(|log| tokens.matches_line(log));
    let action_match = notification.logs.iter().any(|log| {
        let log = log.to_lowercase();
        ACTION_KEYWORDS.iter().any(|keyword| log.contains(keyword))
    });

    token_match && action_match
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(logs: &[&str]) -> LogsNotification {
        LogsNotification {
            signature: Some("sig".to_string()),
            err: None,
            logs: logs.iter().map(|l| l.to_string()).collect(),
            subscription: Some(1),
        }
    }

    // ==================== WatchedTokenSet::parse tests ====================

    #[test]
    fn test_parse_single_token() {
        let set = WatchedTokenSet::parse("TokenA");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_parse_multiple_tokens_with_whitespace() {
        let set = WatchedTokenSet::parse("TokenA, TokenB ,  TokenC");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_parse_empty_string_yields_empty_set() {
        assert!(WatchedTokenSet::parse("").is_empty());
    }

    #[test]
    fn test_parse_only_delimiters_yields_empty_set() {
        assert!(WatchedTokenSet::parse(", ,  ,").is_empty());
    }

    #[test]
    fn test_parse_folds_case() {
        let set = WatchedTokenSet::parse("TOKENA");
        assert!(set.matches_line("mint tokena transferred"));
    }

    // ==================== matches_line tests ====================

    #[test]
    fn test_matches_line_substring() {
        let set = WatchedTokenSet::parse("TokenA");
        assert!(set.matches_line("Program log: mint TokenA transferred"));
    }

    #[test]
    fn test_matches_line_case_insensitive() {
        let set = WatchedTokenSet::parse("tokena");
        assert!(set.matches_line("mint TOKENA transferred"));
    }

    #[test]
    fn test_matches_line_no_match() {
        let set = WatchedTokenSet::parse("TokenA");
        assert!(!set.matches_line("mint TokenB transferred"));
    }

    #[test]
    fn test_matches_line_empty_set_never_matches() {
        let set = WatchedTokenSet::parse("");
        assert!(!set.matches_line("anything at all"));
    }

    // ==================== is_sandwich_opportunity tests ====================

    #[test]
    fn test_opportunity_token_and_swap_match() {
        let tokens = WatchedTokenSet::parse("TokenA, TokenB");
        let n = notification(&[
            "Program log: swap executed",
            "mint TokenA transferred",
        ]);
        assert!(is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_opportunity_token_and_buy_match() {
        let tokens = WatchedTokenSet::parse("TokenA");
        let n = notification(&["buy order filled for TokenA"]);
        assert!(is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_no_opportunity_without_action_keyword() {
        let tokens = WatchedTokenSet::parse("TokenA");
        let n = notification(&["transfer TokenA completed"]);
        assert!(!is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_no_opportunity_without_token_match() {
        let tokens = WatchedTokenSet::parse("TokenA");
        let n = notification(&["Program log: swap executed", "mint TokenZ"]);
        assert!(!is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_empty_token_set_never_matches() {
        let tokens = WatchedTokenSet::parse("");
        let n = notification(&["swap TokenA for TokenB"]);
        assert!(!is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_empty_logs_never_match() {
        let tokens = WatchedTokenSet::parse("TokenA");
        let n = notification(&[]);
        assert!(!is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_matching_is_case_insensitive_both_halves() {
        let tokens = WatchedTokenSet::parse("tokena");
        let n = notification(&["SWAP executed", "mint TOKENA"]);
        assert!(is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_matches_may_span_different_log_lines() {
        let tokens = WatchedTokenSet::parse("TokenA");
        let n = notification(&["line one: TokenA", "line two: swap"]);
        assert!(is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_substring_not_token_boundary_matching() {
        // Permissive by design: "swapped" contains "swap"
        let tokens = WatchedTokenSet::parse("TokenA");
        let n = notification(&["TokenAmount swapped"]);
        assert!(is_sandwich_opportunity(&n, &tokens));
    }

    #[test]
    fn test_deterministic_on_repeated_calls() {
        let tokens = WatchedTokenSet::parse("TokenA");
        let n = notification(&["swap TokenA"]);
        let first = is_sandwich_opportunity(&n, &tokens);
        for _ in 0..10 {
            assert_eq!(is_sandwich_opportunity(&n, &tokens), first);
        }
    }

    #[test]
    fn test_predicate_is_a_strict_conjunction() {
        let tokens = WatchedTokenSet::parse("TokenA");

        let both = notification(&["swap TokenA"]);
        let token_only = notification(&["TokenA transferred"]);
        let action_only = notification(&["swap TokenB"]);

        assert!(is_sandwich_opportunity(&both, &tokens));
        assert!(!is_sandwich_opportunity(&token_only, &tokens));
        assert!(!is_sandwich_opportunity(&action_only, &tokens));
    }

    // ==================== ACTION_KEYWORDS tests ====================

    #[test]
    fn test_action_keywords_contain_swap_and_buy() {
        assert!(ACTION_KEYWORDS.contains(&"swap"));
        assert!(ACTION_KEYWORDS.contains(&"buy"));
    }

    #[test]
    fn test_action_keywords_are_lowercase() {
        for keyword in ACTION_KEYWORDS {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
    }
}
