use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, UpsetError};
use crate::robotevents::models::RawRanking;

/// Team display name -> rank (1 is best).
pub type RankTable = HashMap<String, u32>;

/// Reduce raw ranking records to a name -> rank table.
///
/// A team name seen twice keeps the later rank.
pub fn build_rank_table(records: &[Value]) -> Result<RankTable> {
    let mut table = RankTable::with_capacity(records.len());
    for record in records {
        let ranking =
            RawRanking::deserialize(record).map_err(|e| UpsetError::decode("ranking", e))?;
        table.insert(ranking.team.name, ranking.rank);
    }
    Ok(table)
}
