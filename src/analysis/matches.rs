use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, UpsetError};
use crate::robotevents::models::{RawAlliance, RawMatch, RoundProbe};

/// RobotEvents `round` value for qualification matches.
pub const QUALIFICATION_ROUND: i64 = 2;

/// A qualification match flattened to scores and team names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualMatch {
    pub matchnum: u32,
    pub blue_score: i32,
    pub red_score: i32,
    /// First and second blue team, in API order.
    pub blue: [String; 2],
    /// First and second red team, in API order.
    pub red: [String; 2],
}

/// Keep only qualification records and flatten each one.
///
/// Non-qualification records are dropped without decoding the rest of their
/// fields. A qualification record missing any field fails the whole batch.
pub fn normalize_matches(records: &[Value]) -> Result<Vec<QualMatch>> {
    let mut out = Vec::new();

    for record in records {
        let probe = RoundProbe::deserialize(record)
            .map_err(|e| UpsetError::decode("match round", e))?;
        if probe.round != QUALIFICATION_ROUND {
            continue;
        }

        let raw = RawMatch::deserialize(record)
            .map_err(|e| UpsetError::decode("qualification match", e))?;
        out.push(flatten(raw)?);
    }

    Ok(out)
}

fn flatten(raw: RawMatch) -> Result<QualMatch> {
    let matchnum = raw.matchnum;
    let mut alliances = raw.alliances.into_iter();
    let (blue, red) = match (alliances.next(), alliances.next()) {
        (Some(blue), Some(red)) => (blue, red),
        _ => return Err(shape_error(matchnum, "expected two alliances")),
    };

    let blue_score = blue.score;
    let red_score = red.score;
    Ok(QualMatch {
        matchnum,
        blue_score,
        red_score,
        blue: team_pair(blue, matchnum)?,
        red: team_pair(red, matchnum)?,
    })
}

fn team_pair(alliance: RawAlliance, matchnum: u32) -> Result<[String; 2]> {
    let mut teams = alliance.teams.into_iter();
    match (teams.next(), teams.next()) {
        (Some(first), Some(second)) => Ok([first.team.name, second.team.name]),
        _ => Err(shape_error(matchnum, "expected two teams per alliance")),
    }
}

fn shape_error(matchnum: u32, msg: &str) -> UpsetError {
    UpsetError::decode(
        format!("qualification match #{}", matchnum),
        serde::de::Error::custom(msg),
    )
}
