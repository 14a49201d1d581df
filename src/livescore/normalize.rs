//! Translation of LiveScore's `results.json` payload into [`GameRecord`]s.
//!
//! This is the only place that knows the provider's key names.  The payload
//! looks like:
//!
//! ```text
//! pageProps.initialData.eventsByMatchType: [
//!   { CompN: "Premier League", Snm: "Regular Season",
//!     Events: [ { Esd: "20240101120000",
//!                 T1: [{ Nm: "Team A" }], T2: [{ Nm: "Team B" }],
//!                 Tr1: "2", Tr2: "0", Eps: "FT" }, … ] },
//!   …
//! ]
//! ```
//!
//! Missing keys and `null`s degrade to empty containers or sentinel values.
//! A container that is present but has the wrong JSON type means the schema
//! moved under us, and the whole call fails with no partial output.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::models::GameRecord;

const GROUPS_PATH: &[&str] = &["pageProps", "initialData", "eventsByMatchType"];

const COMPETITION: &str = "CompN";
const STAGE: &str = "Snm";
const EVENTS: &str = "Events";
const START_DATE: &str = "Esd";
const HOME_REF: &str = "T1";
const AWAY_REF: &str = "T2";
const TEAM_NAME: &str = "Nm";
const HOME_SCORE: &str = "Tr1";
const AWAY_SCORE: &str = "Tr2";
const STATUS: &str = "Eps";

/// Placeholder for a missing team, competition, stage or status.
pub const NOT_AVAILABLE: &str = "N/A";
/// Score placeholder when either side has no score yet.
pub const NO_SCORE: &str = "vs";

const RAW_DATE_FORMAT: &str = "%Y%m%d%H%M%S";
const RAW_DATE_LEN: usize = 14;
const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Flatten the payload into records, in group order then event order,
/// stopping once `limit` records have been produced.
pub fn normalize(payload: &Value, limit: Option<usize>) -> Result<Vec<GameRecord>> {
    let groups = array_or_empty(lookup(payload, GROUPS_PATH)?, "eventsByMatchType")?;
    let reached = |n: usize| limit.is_some_and(|l| n >= l);

    let mut games = Vec::new();

    'groups: for (gi, group) in groups.iter().enumerate() {
        if reached(games.len()) {
            break;
        }
        if !group.is_object() {
            return Err(ScrapeError::Normalization(format!(
                "eventsByMatchType[{}] is not an object",
                gi
            )));
        }

        let competition = text_or_na(group.get(COMPETITION));
        let stage = text_or_na(group.get(STAGE));
        let events = array_or_empty(group.get(EVENTS), &format!("eventsByMatchType[{}].Events", gi))?;

        for (ei, event) in events.iter().enumerate() {
            if reached(games.len()) {
                break 'groups;
            }
            if !event.is_object() {
                return Err(ScrapeError::Normalization(format!(
                    "eventsByMatchType[{}].Events[{}] is not an object",
                    gi, ei
                )));
            }
            games.push(normalize_event(event, &competition, &stage));
        }
    }

    debug!("Normalized {} game(s) from {} group(s)", games.len(), groups.len());
    Ok(games)
}

fn normalize_event(event: &Value, competition: &str, stage: &str) -> GameRecord {
    let raw_date = event.get(START_DATE).and_then(scalar_text).unwrap_or_default();

    GameRecord {
        date: format_event_date(&raw_date),
        home_team: team_name(event.get(HOME_REF)),
        away_team: team_name(event.get(AWAY_REF)),
        score: format_score(event.get(HOME_SCORE), event.get(AWAY_SCORE)),
        competition: competition.to_string(),
        stage: stage.to_string(),
        status: text_or_na(event.get(STATUS)),
    }
}

/// Walk `path` through nested objects. A missing key or `null` anywhere ends
/// the walk with `None`; a non-object in the middle is a schema error.
pub fn lookup<'a>(root: &'a Value, path: &[&str]) -> Result<Option<&'a Value>> {
    let mut current = root;
    for (depth, key) in path.iter().enumerate() {
        current = match current {
            Value::Null => return Ok(None),
            Value::Object(map) => match map.get(*key) {
                Some(v) => v,
                None => return Ok(None),
            },
            _ => {
                let at = if depth == 0 {
                    "payload root".to_string()
                } else {
                    path[..depth].join(".")
                };
                return Err(ScrapeError::Normalization(format!(
                    "expected an object at {}",
                    at
                )));
            }
        };
    }
    Ok(match current {
        Value::Null => None,
        v => Some(v),
    })
}

fn array_or_empty<'a>(value: Option<&'a Value>, what: &str) -> Result<&'a [Value]> {
    match value {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ScrapeError::Normalization(format!(
            "{} is not an array",
            what
        ))),
    }
}

/// Strings pass through; numbers are rendered as text. Anything else counts
/// as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or_na(value: Option<&Value>) -> String {
    value
        .and_then(scalar_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First entry's `Nm` of a team-reference array.
fn team_name(refs: Option<&Value>) -> String {
    refs.and_then(Value::as_array)
        .and_then(|teams| teams.first())
        .and_then(|team| team.get(TEAM_NAME))
        .and_then(scalar_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// "H-A" when both sides are present and non-empty. A literal "0" counts as
/// present, so a goalless draw reads "0-0".
pub fn format_score(home: Option<&Value>, away: Option<&Value>) -> String {
    let present = |v: Option<&Value>| v.and_then(scalar_text).filter(|s| !s.is_empty());
    match (present(home), present(away)) {
        (Some(h), Some(a)) => format!("{}-{}", h, a),
        _ => NO_SCORE.to_string(),
    }
}

/// "20240315143000" → "2024-03-15 14:30". Anything that is not exactly
/// fourteen digits forming a valid date-time comes back unchanged.
pub fn format_event_date(raw: &str) -> String {
    if raw.len() == RAW_DATE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, RAW_DATE_FORMAT) {
            return dt.format(DISPLAY_DATE_FORMAT).to_string();
        }
    }
    debug!("Keeping unparseable event date as-is: {:?}", raw);
    raw.to_string()
}
