//! Scoring and ranking: fuzzy matching on basenames, exponential-decay
//! frecency, and the query policy that combines them.

pub mod frecency;
pub mod fuzzy;
pub mod query;

pub use frecency::{calculate_frecency, entry_frecency, recency_factor};
pub use fuzzy::{fuzzy_match, is_subsequence, is_word_boundary};
pub use query::{combine_scores, rank_entries};
