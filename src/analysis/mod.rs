pub mod matches;
pub mod rankings;
pub mod upsets;

pub use matches::normalize_matches;
pub use rankings::build_rank_table;
pub use upsets::{find_upsets, Upset};
