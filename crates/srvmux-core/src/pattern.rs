//! Acknowledgment pattern construction.

use regex::Regex;

use crate::error::Error;

/// Escape candidate phrases and join them into a single alternation.
/// Matching is a substring search, not full-line equality, because log
/// lines carry a timestamp/level prefix around the phrase.
pub fn ack_pattern(phrases: &[&str]) -> Result<Regex, Error> {
    let escaped: Vec<String> = phrases.iter().map(|p| regex::escape(p)).collect();
    Ok(Regex::new(&format!("({})", escaped.join("|")))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_phrase_inside_timestamped_line() {
        let re = ack_pattern(&["Saved the world", "Save complete"]).expect("valid pattern");
        assert!(re.is_match("[12:00:00] [Server thread/INFO]: Saved the world"));
        assert!(re.is_match("[12:00:01] Save complete."));
        assert!(!re.is_match("[12:00:02] Saving chunks"));
    }

    #[test]
    fn escapes_regex_metacharacters() {
        let re = ack_pattern(&["Done (1.234s)!"]).expect("valid pattern");
        assert!(re.is_match("[12:00:00] Done (1.234s)! For help, type \"help\""));
        assert!(!re.is_match("[12:00:00] Done X1Y234sZ!"));
    }
}
