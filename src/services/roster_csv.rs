use std::io::Read;
use thiserror::Error;

use crate::models::{ParticipantRecord, Roster, RosterError, SeniorityScale, UnknownSeniorityPolicy};

/// Errors that can occur while reading a roster CSV
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: '{value}' is not a valid value for {column}")]
    InvalidFlag {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: missing value for {column}")]
    MissingValue { row: usize, column: &'static str },

    #[error(transparent)]
    Roster(#[from] RosterError),
}

const NAME_COL: &str = "name";
const CITY_COL: &str = "city";
const STATE_COL: &str = "state";
const REGION_COL: &str = "region";
const SENIORITY_COL: &str = "seniority";
const IS_MENTOR_COL: &str = "is_mentor";
const IS_MENTEE_COL: &str = "is_mentee";
const ALLOWLIST_COL: &str = "mentee_seniority_allowlist";
const PERSON_DENYLIST_COL: &str = "person_denylist";
const MENTOR_REGION_DENYLIST_COL: &str = "mentor_region_denylist";
const MENTEE_REGION_DENYLIST_COL: &str = "mentee_region_denylist";
const INTERESTS_COL: &str = "interests";

const REQUIRED_COLUMNS: [&str; 5] = [NAME_COL, CITY_COL, STATE_COL, REGION_COL, SENIORITY_COL];

/// Separator for list-valued cells
const LIST_SEPARATOR: char = ';';

/// Column positions resolved from the header row
#[derive(Debug)]
struct Schema {
    name: usize,
    city: usize,
    state: usize,
    region: usize,
    seniority: usize,
    is_mentor: Option<usize>,
    is_mentee: Option<usize>,
    allowlist: Option<usize>,
    person_denylist: Option<usize>,
    mentor_region_denylist: Option<usize>,
    mentee_region_denylist: Option<usize>,
    interests: Option<usize>,
}

impl Schema {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |column: &str| normalized.iter().position(|h| h == column);

        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match find(column) {
                Some(pos) => *slot = pos,
                None => missing.push(column.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        let [name, city, state, region, seniority] = positions;

        Ok(Self {
            name,
            city,
            state,
            region,
            seniority,
            is_mentor: find(IS_MENTOR_COL),
            is_mentee: find(IS_MENTEE_COL),
            allowlist: find(ALLOWLIST_COL),
            person_denylist: find(PERSON_DENYLIST_COL),
            mentor_region_denylist: find(MENTOR_REGION_DENYLIST_COL),
            mentee_region_denylist: find(MENTEE_REGION_DENYLIST_COL),
            interests: find(INTERESTS_COL),
        })
    }
}

/// Parse roster rows into records
///
/// Returns `(row, record)` pairs where `row` is the 1-based data row, header
/// excluded. Blank rows are skipped but still counted.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<(usize, ParticipantRecord)>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let schema = Schema::from_headers(csv_reader.headers()?)?;
    let mut records = Vec::new();

    for (idx, result) in csv_reader.records().enumerate() {
        let row = idx + 1;
        let record = result?;

        if record.iter().all(|value| value.trim().is_empty()) {
            tracing::debug!("Skipping blank row {}", row);
            continue;
        }

        let cell = |pos: usize| record.get(pos).map(str::trim).unwrap_or("");
        let required = |pos: usize, column: &'static str| -> Result<String, IngestError> {
            match cell(pos) {
                "" => Err(IngestError::MissingValue { row, column }),
                value => Ok(value.to_string()),
            }
        };
        let flag = |pos: Option<usize>, column: &'static str| -> Result<bool, IngestError> {
            match pos {
                None => Ok(true),
                Some(pos) => parse_flag(cell(pos)).ok_or_else(|| IngestError::InvalidFlag {
                    row,
                    column,
                    value: cell(pos).to_string(),
                }),
            }
        };
        let list = |pos: Option<usize>| pos.map(|p| split_list(cell(p))).unwrap_or_default();

        records.push((
            row,
            ParticipantRecord {
                name: required(schema.name, NAME_COL)?,
                city: required(schema.city, CITY_COL)?,
                state: required(schema.state, STATE_COL)?,
                region: required(schema.region, REGION_COL)?,
                seniority: required(schema.seniority, SENIORITY_COL)?,
                is_mentor: flag(schema.is_mentor, IS_MENTOR_COL)?,
                is_mentee: flag(schema.is_mentee, IS_MENTEE_COL)?,
                mentee_seniority_allowlist: list(schema.allowlist),
                person_denylist: list(schema.person_denylist),
                mentor_region_denylist: list(schema.mentor_region_denylist),
                mentee_region_denylist: list(schema.mentee_region_denylist),
                interests: list(schema.interests),
            },
        ));
    }

    tracing::debug!("Parsed {} roster rows", records.len());

    Ok(records)
}

/// Parse a roster CSV straight into a [`Roster`]
pub fn load_roster<R: Read>(
    reader: R,
    scale: &SeniorityScale,
    policy: UnknownSeniorityPolicy,
) -> Result<Roster, IngestError> {
    let rows = parse_records(reader)?;
    Ok(Roster::from_rows(rows, scale, policy)?)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "x" => Some(true),
        "false" | "no" | "n" | "0" | "" => Some(false),
        _ => None,
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
