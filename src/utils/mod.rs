pub mod paths;
pub mod timestamps;

pub use paths::{clean_path, format_path_with_tilde, normalize_path};
pub use timestamps::{format_last_visit, format_unix};
