use crate::workout::{BodyPart, NewWorkout, ParseBodyPartError, WorkoutRecord, YMD_FMT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;
use tracing::{debug, info, warn};

/// Read & write access to a user's logged workouts.  Ranges are inclusive,
/// and records are returned in ascending date order, with records on the
/// same date kept in the order they were logged.
pub(crate) trait WorkoutSource {
    fn all(&self, user: Option<&str>) -> Result<Vec<WorkoutRecord>, StoreError>;

    fn workouts_between(
        &self,
        user: Option<&str>,
        start: Date,
        end: Date,
    ) -> Result<Vec<WorkoutRecord>, StoreError> {
        let mut workouts = self.all(user)?;
        workouts.retain(|w| (start..=end).contains(&w.date));
        Ok(workouts)
    }

    fn insert(&mut self, user: Option<&str>, workout: NewWorkout) -> Result<WorkoutRecord, StoreError>;
}

/// A workout log kept in a JSON file containing an array of rows.  Rows
/// keep any fields this program doesn't know about, and rows that can't be
/// read as workouts are skipped but preserved when the file is rewritten.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct JsonStore {
    path: PathBuf,
    rows: Vec<Value>,
    records: Vec<WorkoutRecord>,
    skipped: usize,
}

impl JsonStore {
    /// Load the log at `path`.  A nonexistent file is treated as an empty
    /// log.
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<JsonStore, StoreError> {
        let path = path.as_ref().to_owned();
        let rows = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Vec<Value>>(&bytes).map_err(|source| {
                StoreError::Parse {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "workout log does not exist yet");
                Vec::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0;
        for (i, row) in rows.iter().enumerate() {
            match WorkoutRow::from_value(row).and_then(WorkoutRow::into_record) {
                Ok(rec) => records.push(rec),
                Err(e) => {
                    warn!(path = %path.display(), row = i, "skipping unreadable workout: {e}");
                    skipped += 1;
                }
            }
        }
        // Stable, so same-day records stay in file order
        records.sort_by_key(|r| r.date);
        debug!(path = %path.display(), workouts = records.len(), skipped, "loaded workout log");
        Ok(JsonStore {
            path,
            rows,
            records,
            skipped,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Number of rows that could not be read as workouts
    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let mut payload = serde_json::to_vec_pretty(&self.rows).map_err(StoreError::Encode)?;
        payload.push(b'\n');
        fs::write(&self.path, payload).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl WorkoutSource for JsonStore {
    fn all(&self, user: Option<&str>) -> Result<Vec<WorkoutRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| user.is_none_or(|u| r.user_id.as_deref() == Some(u)))
            .cloned()
            .collect())
    }

    fn insert(&mut self, user: Option<&str>, workout: NewWorkout) -> Result<WorkoutRecord, StoreError> {
        let record = workout.into_record(user.map(str::to_owned));
        let row = WorkoutRow::from_record(&record)?;
        self.rows.push(row);
        if let Err(e) = self.save() {
            self.rows.pop();
            return Err(e);
        }
        info!(
            path = %self.path.display(),
            date = %record.date,
            body_part = %record.body_part,
            "logged workout"
        );
        let pos = self.records.partition_point(|r| r.date <= record.date);
        self.records.insert(pos, record.clone());
        Ok(record)
    }
}

/// A workout as stored on disk.  Field names match the columns of the hosted
/// `workouts` table, with the shorter names accepted as aliases.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct WorkoutRow {
    #[serde(alias = "date")]
    workout_date: String,
    body_part: String,
    #[serde(alias = "mood")]
    mood_rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intensity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    struggles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

impl WorkoutRow {
    fn from_value(value: &Value) -> Result<WorkoutRow, RowError> {
        WorkoutRow::deserialize(value).map_err(RowError::Malformed)
    }

    fn from_record(record: &WorkoutRecord) -> Result<Value, StoreError> {
        let workout_date = record
            .date
            .format(YMD_FMT)
            .map_err(|_| StoreError::UnformattableDate(record.date))?;
        let row = WorkoutRow {
            workout_date,
            body_part: record.body_part.to_string(),
            mood_rating: Some(record.mood),
            intensity: record.intensity,
            notes: record.notes.clone(),
            struggles: record.struggles.clone(),
            user_id: record.user_id.clone(),
        };
        serde_json::to_value(row).map_err(StoreError::Encode)
    }

    fn into_record(self) -> Result<WorkoutRecord, RowError> {
        // Accept full timestamps by only looking at the date part
        let datestr = self
            .workout_date
            .split_once('T')
            .map_or(self.workout_date.as_str(), |(d, _)| d);
        let date = Date::parse(datestr, YMD_FMT)
            .map_err(|_| RowError::BadDate(self.workout_date.clone()))?;
        let body_part = self.body_part.parse::<BodyPart>()?;
        let mood = self.mood_rating.ok_or(RowError::MissingMood)?;
        Ok(WorkoutRecord {
            intensity: self.intensity,
            notes: self.notes,
            struggles: self.struggles,
            user_id: self.user_id,
            ..WorkoutRecord::new(date, body_part, mood)
        })
    }
}

#[derive(Debug, Error)]
enum RowError {
    #[error("malformed row: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("invalid workout date {0:?}")]
    BadDate(String),
    #[error(transparent)]
    BodyPart(#[from] ParseBodyPartError),
    #[error("no mood rating")]
    MissingMood,
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to read workout log {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse workout log {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write workout log {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode workout")]
    Encode(#[source] serde_json::Error),
    #[error("cannot store workout dated {0}")]
    UnformattableDate(Date),
}
