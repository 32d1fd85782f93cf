// Projected player pool loaded from a CSV sheet.
//
// Columns: name, position, team, fantasy_points, position_rank. `games` and
// any other extra columns are ignored.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::draft::pick::{PickBook, Position};

/// A player from the projection sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPlayer {
    pub name: String,
    pub position: Position,
    pub team: String,
    pub fantasy_points: f64,
    /// Rank within the position (1 = best), if the sheet provides one.
    pub position_rank: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlayerPoolError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    name: String,
    position: String,
    #[serde(default)]
    team: String,
    fantasy_points: f64,
    #[serde(default)]
    position_rank: Option<u32>,
}

fn load_from_reader<R: Read>(rdr: R) -> Result<Vec<ProjectedPlayer>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => {
                let name = raw.name.trim();
                if name.is_empty() {
                    continue;
                }
                let Some(position) = Position::from_str_pos(&raw.position) else {
                    warn!("skipping player '{}': unknown position '{}'", name, raw.position);
                    continue;
                };
                if !raw.fantasy_points.is_finite() {
                    warn!("skipping player '{}': non-finite fantasy_points", name);
                    continue;
                }
                players.push(ProjectedPlayer {
                    name: name.to_string(),
                    position,
                    team: raw.team.trim().to_string(),
                    fantasy_points: raw.fantasy_points,
                    position_rank: raw.position_rank,
                });
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Load the pool from `path`.
pub fn load_players(path: &Path) -> Result<Vec<ProjectedPlayer>, PlayerPoolError> {
    let file = std::fs::File::open(path).map_err(|e| PlayerPoolError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_from_reader(file).map_err(|e| PlayerPoolError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the pool, treating a missing file as an empty pool.
pub fn load_players_or_empty(path: &Path) -> Result<Vec<ProjectedPlayer>, PlayerPoolError> {
    match load_players(path) {
        Err(PlayerPoolError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            warn!(
                "player sheet {} not found, available list will be empty",
                path.display()
            );
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Players not yet drafted, best projection first.
///
/// Drafted players are matched by name, ignoring case and surrounding
/// whitespace.
pub fn available<'a>(pool: &'a [ProjectedPlayer], book: &PickBook) -> Vec<&'a ProjectedPlayer> {
    let drafted: HashSet<String> = book
        .made()
        .filter_map(|p| p.player.as_ref())
        .map(|p| p.name.trim().to_lowercase())
        .collect();

    let mut remaining: Vec<&ProjectedPlayer> = pool
        .iter()
        .filter(|p| !drafted.contains(&p.name.to_lowercase()))
        .collect();
    remaining.sort_by(|a, b| b.fantasy_points.total_cmp(&a.fantasy_points));
    remaining
}
