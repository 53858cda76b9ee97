//! Upset detection for qualification matches.
//!
//! Each alliance is scored by the mean rank of its two teams (rank 1 is best,
//! so a *larger* mean is a *worse* alliance). A match is an upset when the
//! worse alliance scores strictly more points:
//!
//!   (blue_avg > red_avg && blue_score > red_score) ||
//!   (blue_avg < red_avg && blue_score < red_score)
//!
//! Equal means are never an upset, whatever the score. Upsets are ordered by
//! `avg_diff = |blue_avg - red_avg|`, largest first.
use super::matches::QualMatch;
use super::rankings::RankTable;
use crate::error::{Result, UpsetError};

/// A qualification match together with its alliance rank statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Upset {
    pub matchup: QualMatch,
    pub blue_avg: f64,
    pub red_avg: f64,
    pub avg_diff: f64,
}

/// Return the upsets among `matches`, sorted by `avg_diff` descending.
///
/// Fails with [`UpsetError::MissingRanking`] as soon as a team in any match
/// is absent from `rankings`. Matches with equal `avg_diff` keep their input
/// order.
pub fn find_upsets(matches: &[QualMatch], rankings: &RankTable) -> Result<Vec<Upset>> {
    let mut upsets = Vec::new();

    for m in matches {
        let blue_avg = alliance_average(&m.blue, rankings)?;
        let red_avg = alliance_average(&m.red, rankings)?;

        if is_upset(blue_avg, red_avg, m.blue_score, m.red_score) {
            upsets.push(Upset {
                matchup: m.clone(),
                blue_avg,
                red_avg,
                avg_diff: (blue_avg - red_avg).abs(),
            });
        }
    }

    // `sort_by` is stable, so ties stay in match order
    upsets.sort_by(|a, b| b.avg_diff.total_cmp(&a.avg_diff));
    Ok(upsets)
}

/// Whether the worse-ranked alliance (larger average) strictly outscored the other.
pub fn is_upset(blue_avg: f64, red_avg: f64, blue_score: i32, red_score: i32) -> bool {
    (blue_avg > red_avg && blue_score > red_score) || (blue_avg < red_avg && blue_score < red_score)
}

fn alliance_average(teams: &[String; 2], rankings: &RankTable) -> Result<f64> {
    let first = rank_of(&teams[0], rankings)?;
    let second = rank_of(&teams[1], rankings)?;
    Ok((f64::from(first) + f64::from(second)) / 2.0)
}

fn rank_of(team: &str, rankings: &RankTable) -> Result<u32> {
    rankings
        .get(team)
        .copied()
        .ok_or_else(|| UpsetError::MissingRanking(team.to_string()))
}
