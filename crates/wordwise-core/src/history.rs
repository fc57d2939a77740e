//! Append-only log of analysis results.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::scorer::{AnalysisResult, FlaggedWord};
use crate::storage::database::parse_timestamp;
use crate::storage::Database;

/// One recorded analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Row id once stored.
    pub id: Option<i64>,
    pub query_text: String,
    pub efficiency_score: f64,
    pub flagged_words: Vec<FlaggedWord>,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            id: None,
            query_text: result.text.clone(),
            efficiency_score: result.efficiency_score,
            flagged_words: result.flagged.clone(),
            suggestions: result.suggestions.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Destination for analysis records.
pub trait AnalysisLog {
    /// Append `record`, returning its id.
    fn append(&self, record: &AnalysisRecord) -> Result<i64>;
}

/// Analysis history stored in the `analysis_results` table.
pub struct AnalysisHistory<'db> {
    db: &'db Database,
}

fn decode_json_list<T: for<'de> Deserialize<'de>>(raw: Option<String>, id: i64) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(id, error = %e, "unreadable JSON column in analysis_results");
        Vec::new()
    })
}

fn row_to_record(row: &Row) -> Result<AnalysisRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let raw_timestamp: Option<String> = row.get(5)?;
    let timestamp = match raw_timestamp.as_deref().and_then(parse_timestamp) {
        Some(ts) => ts,
        None => {
            warn!(id, raw = ?raw_timestamp, "unreadable analyzed_at; using the Unix epoch");
            DateTime::<Utc>::UNIX_EPOCH
        }
    };

    Ok(AnalysisRecord {
        id: Some(id),
        query_text: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        efficiency_score: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
        flagged_words: decode_json_list(row.get(3)?, id),
        suggestions: decode_json_list(row.get(4)?, id),
        timestamp,
    })
}

impl<'db> AnalysisHistory<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// The newest `limit` records, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: u32) -> Result<Vec<AnalysisRecord>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, query_text, efficiency_score, flagged_words, suggestions, analyzed_at
             FROM analysis_results
             ORDER BY id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], row_to_record)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Number of recorded analyses.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .db
            .conn()
            .query_row("SELECT COUNT(*) FROM analysis_results", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Mean score across all records, `None` when the log is empty.
    pub fn average_score(&self) -> Result<Option<f64>> {
        Ok(self.db.conn().query_row(
            "SELECT AVG(efficiency_score) FROM analysis_results",
            [],
            |row| row.get(0),
        )?)
    }
}

impl AnalysisLog for AnalysisHistory<'_> {
    fn append(&self, record: &AnalysisRecord) -> Result<i64> {
        self.db.conn().execute(
            "INSERT INTO analysis_results (query_text, efficiency_score, flagged_words, suggestions, analyzed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.query_text,
                record.efficiency_score,
                serde_json::to_string(&record.flagged_words)?,
                serde_json::to_string(&record.suggestions)?,
                record.timestamp.to_rfc3339(),
            ],
        )?;
        let id = self.db.conn().last_insert_rowid();
        debug!(id, "analysis recorded");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, score: f64) -> AnalysisRecord {
        AnalysisRecord {
            id: None,
            query_text: text.into(),
            efficiency_score: score,
            flagged_words: vec![FlaggedWord {
                word: "some".into(),
                category: "vague_quantifiers".into(),
                impact: -0.8,
            }],
            suggestions: vec!["replace with an exact number or measurement".into()],
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn append_and_read_back() {
        let db = Database::open_memory().unwrap();
        let history = AnalysisHistory::new(&db);
        let id = history.append(&record("some text", 0.5)).unwrap();

        let recent = history.recent(10).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, Some(id));
        assert_eq!(recent[0].query_text, "some text");
        assert_eq!(recent[0].flagged_words[0].category, "vague_quantifiers");
        assert_eq!(recent[0].suggestions.len(), 1);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let db = Database::open_memory().unwrap();
        let history = AnalysisHistory::new(&db);
        for i in 0..5 {
            history.append(&record(&format!("q{i}"), 1.0)).unwrap();
        }
        let recent = history.recent(2).unwrap();
        let texts: Vec<_> = recent.iter().map(|r| r.query_text.as_str()).collect();
        assert_eq!(texts, vec!["q4", "q3"]);
        assert_eq!(history.count().unwrap(), 5);
    }

    #[test]
    fn average_score_of_empty_log_is_none() {
        let db = Database::open_memory().unwrap();
        let history = AnalysisHistory::new(&db);
        assert_eq!(history.average_score().unwrap(), None);

        history.append(&record("a", 0.5)).unwrap();
        history.append(&record("b", 1.0)).unwrap();
        assert!((history.average_score().unwrap().unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn unreadable_timestamp_is_not_replaced_by_now() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO analysis_results (query_text, efficiency_score, analyzed_at)
                 VALUES ('odd', 1.0, 'yesterday-ish')",
                [],
            )
            .unwrap();

        let recent = AnalysisHistory::new(&db).recent(1).unwrap();
        assert_eq!(recent[0].timestamp, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn legacy_rows_are_readable() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO analysis_results (query_text, efficiency_score, flagged_words, suggestions, analyzed_at)
                 VALUES ('old', 0.9, '[[\"later\", \"temporal_ambiguity\", -0.8]]', 'not json', '2024-05-01 10:00:00')",
                [],
            )
            .unwrap();

        let recent = AnalysisHistory::new(&db).recent(1).unwrap();
        assert_eq!(recent[0].flagged_words[0].word, "later");
        assert!(recent[0].suggestions.is_empty());
        assert_eq!(
            recent[0].timestamp,
            parse_timestamp("2024-05-01T10:00:00Z").unwrap()
        );
    }
}
