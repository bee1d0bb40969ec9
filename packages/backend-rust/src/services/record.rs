use chrono::{DateTime, Utc};

use playlearn_algo::{NewResultRecord, RecordError, ResultRecord};

use crate::store::{LogError, ResultLog};

/// Outcome of a record submission that passed validation.
#[derive(Debug)]
pub enum Submission {
    Stored(ResultRecord),
    /// The log rejected the append; the validated record is still returned so the
    /// caller can use the round outcome.
    Unpersisted { record: ResultRecord, error: LogError },
}

impl Submission {
    pub fn record(&self) -> &ResultRecord {
        match self {
            Self::Stored(record) | Self::Unpersisted { record, .. } => record,
        }
    }
}

/// Validate `input` against the server clock and append it to the profile's log.
///
/// Only invalid input is an error; a failing log degrades to
/// [`Submission::Unpersisted`].
pub fn submit(
    log: &dyn ResultLog,
    profile: &str,
    input: NewResultRecord,
    now: DateTime<Utc>,
) -> Result<Submission, RecordError> {
    let record = input.validate(now)?;

    match log.append(profile, record.clone()) {
        Ok(()) => {
            tracing::debug!(
                profile,
                record_id = %record.id,
                game_type = %record.game_type,
                score = record.score,
                "result recorded"
            );
            Ok(Submission::Stored(record))
        }
        Err(error) => {
            tracing::warn!(profile, record_id = %record.id, error = %error, "result not persisted");
            Ok(Submission::Unpersisted { record, error })
        }
    }
}

/// Records of `profile`, optionally restricted to one session, in append order.
pub fn history(
    log: &dyn ResultLog,
    profile: &str,
    session_id: Option<&str>,
) -> Result<Vec<ResultRecord>, LogError> {
    let records = log.list(profile)?;
    Ok(match session_id.map(str::trim).filter(|s| !s.is_empty()) {
        Some(session) => records.into_iter().filter(|r| r.session_id == session).collect(),
        None => records,
    })
}
