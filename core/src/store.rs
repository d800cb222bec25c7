//! SQLite persistence port.
//!
//! RULE: Only store.rs talks to the database. The evaluator never
//! executes SQL, and identity (uuid) plus timestamps (chrono) are
//! assigned here, at the boundary — the evaluation itself stays pure.
//!
//! The port surface is deliberately narrow: save, find, list.

use crate::{error::EvalResult, evaluator::EvaluationReport, types::EvaluationId};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// One persisted evaluation: summary columns for querying, full
/// report JSON for replay.
#[derive(Debug, Clone)]
pub struct EvaluationRecord {
    pub evaluation_id: EvaluationId,
    pub created_at: String,
    pub category: String,
    pub amount_cents: i64,
    pub total_fee_cents: i64,
    pub effective_rate_pct: f64,
    pub compliant: bool,
    pub score: u32,
    pub report_json: String,
}

impl EvaluationRecord {
    /// Deserialize the stored report.
    pub fn report(&self) -> EvalResult<EvaluationReport> {
        Ok(serde_json::from_str(&self.report_json)?)
    }
}

pub struct EvalStore {
    conn: Connection,
}

impl EvalStore {
    /// Open (or create) the evaluation database at `path`.
    pub fn open(path: &str) -> EvalResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EvalResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EvalResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_evaluations.sql"))?;
        Ok(())
    }

    /// Persist one evaluation report. Returns the assigned id.
    pub fn save_evaluation(&self, report: &EvaluationReport) -> EvalResult<EvaluationId> {
        let evaluation_id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO evaluation (evaluation_id, created_at, category, amount_cents,
                                     total_fee_cents, effective_rate_pct, compliant, score,
                                     report_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                evaluation_id,
                created_at,
                report.request.category.as_str(),
                report.request.amount_cents,
                report.breakdown.total_cents,
                report.breakdown.effective_rate_pct,
                report.verdict.compliant as i64,
                report.verdict.score as i64,
                serde_json::to_string(report)?,
            ],
        )?;
        log::debug!("store: saved evaluation {evaluation_id}");
        Ok(evaluation_id)
    }

    pub fn find_evaluation(&self, evaluation_id: &str) -> EvalResult<Option<EvaluationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT evaluation_id, created_at, category, amount_cents, total_fee_cents,
                    effective_rate_pct, compliant, score, report_json
             FROM evaluation WHERE evaluation_id = ?1",
        )?;
        let record = stmt
            .query_row(params![evaluation_id], row_to_record)
            .optional()?;
        Ok(record)
    }

    /// Most recent evaluations first.
    pub fn list_evaluations(&self, limit: usize) -> EvalResult<Vec<EvaluationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT evaluation_id, created_at, category, amount_cents, total_fee_cents,
                    effective_rate_pct, compliant, score, report_json
             FROM evaluation ORDER BY created_at DESC, evaluation_id LIMIT ?1",
        )?;
        let records = stmt
            .query_map(params![limit as i64], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<EvaluationRecord> {
    Ok(EvaluationRecord {
        evaluation_id: row.get(0)?,
        created_at: row.get(1)?,
        category: row.get(2)?,
        amount_cents: row.get(3)?,
        total_fee_cents: row.get(4)?,
        effective_rate_pct: row.get(5)?,
        compliant: row.get::<_, i64>(6)? != 0,
        score: row.get::<_, i64>(7)? as u32,
        report_json: row.get(8)?,
    })
}
