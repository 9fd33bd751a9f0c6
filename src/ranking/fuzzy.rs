//! Subsequence fuzzy scorer for directory basenames.
//!
//! A pattern matches when its characters appear, case-insensitively and in
//! order, somewhere in the basename of the candidate path. Matches are then
//! scored in a single greedy left-to-right pass:
//!
//! - every matched character earns [`SCORE_MATCH`], plus [`SCORE_CASE_MATCH`]
//!   when the original case agrees as well
//! - the first pattern character earns [`SCORE_FIRST_CHAR`]
//! - continuing a contiguous run earns [`SCORE_CONSECUTIVE`]
//! - matching at the start of the basename or right after a word boundary
//!   (`/ - _ space .`) earns [`SCORE_WORD_BOUNDARY`]
//! - characters skipped before the first match cost [`PENALTY_LEADING`] each,
//!   capped at [`PENALTY_MAX_LEADING`]
//! - breaking a run after a match costs [`PENALTY_NON_CONSECUTIVE`]
//!
//! A length-ratio bonus then favors patterns that cover more of a shorter
//! basename. Any accepted match scores strictly above zero.

use crate::models::entry::basename;

pub const SCORE_MATCH: i32 = 16;
pub const SCORE_CASE_MATCH: i32 = 1;
pub const SCORE_CONSECUTIVE: i32 = 32;
pub const SCORE_WORD_BOUNDARY: i32 = 8;
pub const SCORE_FIRST_CHAR: i32 = 32;
pub const PENALTY_LEADING: i32 = -2;
pub const PENALTY_MAX_LEADING: i32 = -12;
pub const PENALTY_NON_CONSECUTIVE: i32 = -1;
/// Weight of `pattern_len / basename_len` in the final score
pub const LENGTH_BONUS_WEIGHT: f64 = 50.0;

/// Score how well `pattern` fuzzy-matches the basename of `path`.
///
/// Returns 0 when the pattern is empty, the basename is empty, or the pattern
/// is not a case-insensitive ordered subsequence of the basename.
///
/// # Examples
///
/// ```
/// use zoink::fuzzy_match;
///
/// assert!(fuzzy_match("/home/user/projects", "proj") > 0);
/// assert_eq!(fuzzy_match("/home/user/projects", "xyz"), 0);
/// // Only the basename is matched
/// assert_eq!(fuzzy_match("/home/user/projects", "home"), 0);
/// ```
pub fn fuzzy_match(path: &str, pattern: &str) -> u32 {
    if pattern.is_empty() {
        return 0;
    }

    let text: Vec<char> = basename(path).chars().collect();
    if text.is_empty() {
        return 0;
    }
    let pattern: Vec<char> = pattern.chars().collect();

    let text_lower: Vec<char> = text.iter().map(|&c| fold_case(c)).collect();
    let pattern_lower: Vec<char> = pattern.iter().map(|&c| fold_case(c)).collect();

    if !is_subsequence(&text_lower, &pattern_lower) {
        return 0;
    }

    let score = score_match(&text, &text_lower, &pattern, &pattern_lower);
    u32::try_from(score).unwrap_or(0)
}

/// True when every pattern char appears in `text` in order (gaps allowed)
pub fn is_subsequence(text: &[char], pattern: &[char]) -> bool {
    let mut remaining = text.iter();
    pattern.iter().all(|p| remaining.any(|t| t == p))
}

/// Word boundary characters award a bonus to the match that follows them
pub fn is_word_boundary(c: char) -> bool {
    matches!(c, '/' | '-' | '_' | ' ' | '.')
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn score_match(text: &[char], text_lower: &[char], pattern: &[char], pattern_lower: &[char]) -> i32 {
    let mut score = 0;
    let mut pattern_idx = 0;
    let mut consecutive = 0;
    let mut leading_penalty = 0;

    for (text_idx, &text_char) in text_lower.iter().enumerate() {
        if pattern_idx == pattern_lower.len() {
            break;
        }

        if text_char == pattern_lower[pattern_idx] {
            let mut current = SCORE_MATCH;

            if text[text_idx] == pattern[pattern_idx] {
                current += SCORE_CASE_MATCH;
            }
            if pattern_idx == 0 {
                current += SCORE_FIRST_CHAR;
            }
            if consecutive > 0 {
                current += SCORE_CONSECUTIVE;
            }
            if text_idx == 0 || is_word_boundary(text[text_idx - 1]) {
                current += SCORE_WORD_BOUNDARY;
            }

            consecutive += 1;
            pattern_idx += 1;
            score += current;
        } else {
            if pattern_idx == 0 {
                leading_penalty = (leading_penalty + PENALTY_LEADING).max(PENALTY_MAX_LEADING);
            }
            if consecutive > 0 {
                score += PENALTY_NON_CONSECUTIVE;
            }
            consecutive = 0;
        }
    }

    if pattern_idx < pattern_lower.len() {
        return 0;
    }

    score += leading_penalty;
    score + (pattern.len() as f64 / text.len() as f64 * LENGTH_BONUS_WEIGHT) as i32
}
