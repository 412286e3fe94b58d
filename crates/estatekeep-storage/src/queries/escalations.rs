// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation lifecycle queries.
//!
//! An asset has at most one pending escalation. The partial unique index
//! `idx_escalations_one_pending` enforces it; [`create_escalation_if_none_pending`]
//! checks first inside an immediate transaction so callers get the existing
//! row back instead of a constraint error.

use chrono::{DateTime, Utc};
use estatekeep_core::EstateError;
use estatekeep_core::types::{Escalation, EscalationStatus, OpenEscalation};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};

use crate::codec::{enum_col, opt_ts, opt_ts_col, ts, ts_col};
use crate::database::Database;

const ESCALATION_COLUMNS: &str =
    "x.id, x.asset_id, x.level, x.reason, x.status, x.triggered_date, x.resolved_date";

fn escalation_from_row(row: &Row<'_>) -> rusqlite::Result<Escalation> {
    Ok(Escalation {
        id: row.get(0)?,
        asset_id: row.get(1)?,
        level: row.get(2)?,
        reason: row.get(3)?,
        status: enum_col(row, 4)?,
        triggered_date: ts_col(row, 5)?,
        resolved_date: opt_ts_col(row, 6)?,
    })
}

fn select_escalation(conn: &Connection, id: &str) -> rusqlite::Result<Option<Escalation>> {
    let sql = format!("SELECT {ESCALATION_COLUMNS} FROM escalations x WHERE x.id = ?1");
    conn.query_row(&sql, params![id], escalation_from_row)
        .optional()
}

fn select_pending(conn: &Connection, asset_id: &str) -> rusqlite::Result<Option<Escalation>> {
    let sql = format!(
        "SELECT {ESCALATION_COLUMNS} FROM escalations x
         WHERE x.asset_id = ?1 AND x.status = 'pending'"
    );
    conn.query_row(&sql, params![asset_id], escalation_from_row)
        .optional()
}

/// Get an escalation by ID.
pub async fn get_escalation(db: &Database, id: &str) -> Result<Option<Escalation>, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| select_escalation(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// The asset's pending escalation, if one exists.
pub async fn find_pending_escalation(
    db: &Database,
    asset_id: &str,
) -> Result<Option<Escalation>, EstateError> {
    let asset_id = asset_id.to_string();
    db.connection()
        .call(move |conn| select_pending(conn, &asset_id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert `escalation` unless the asset already has a pending one.
///
/// Returns the stored row and whether it was newly created. When a pending
/// escalation exists it is returned unchanged and nothing is written.
pub async fn create_escalation_if_none_pending(
    db: &Database,
    escalation: &Escalation,
) -> Result<(Escalation, bool), EstateError> {
    let escalation = escalation.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            if let Some(existing) = select_pending(&tx, &escalation.asset_id)? {
                tx.commit()?;
                return Ok((existing, false));
            }
            tx.execute(
                "INSERT INTO escalations
                    (id, asset_id, level, reason, status, triggered_date, resolved_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    escalation.id,
                    escalation.asset_id,
                    escalation.level,
                    escalation.reason,
                    escalation.status.to_string(),
                    ts(&escalation.triggered_date),
                    opt_ts(escalation.resolved_date.as_ref()),
                ],
            )?;
            tx.commit()?;
            Ok((escalation, true))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark an escalation resolved at `resolved_at`.
///
/// Resolving an already-resolved escalation re-stamps `resolved_date`.
/// Returns `None` if the escalation does not exist.
pub async fn resolve_escalation(
    db: &Database,
    id: &str,
    resolved_at: DateTime<Utc>,
) -> Result<Option<Escalation>, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE escalations SET status = ?1, resolved_date = ?2 WHERE id = ?3",
                params![EscalationStatus::Resolved.to_string(), ts(&resolved_at), id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            select_escalation(conn, &id)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Pending escalations for every asset of an estate, newest first.
pub async fn list_open_escalations(
    db: &Database,
    estate_id: &str,
) -> Result<Vec<OpenEscalation>, EstateError> {
    let estate_id = estate_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {ESCALATION_COLUMNS}, a.institution, a.asset_type
                 FROM escalations x
                 JOIN assets a ON a.id = x.asset_id
                 WHERE a.estate_id = ?1 AND x.status = 'pending'
                 ORDER BY x.triggered_date DESC, x.rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![estate_id], |row| {
                Ok(OpenEscalation {
                    escalation: escalation_from_row(row)?,
                    institution: row.get(7)?,
                    asset_type: row.get(8)?,
                })
            })?;
            let mut open = Vec::new();
            for row in rows {
                open.push(row?);
            }
            Ok(open)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Every escalation ever raised for an asset, newest first.
pub async fn list_escalations_for_asset(
    db: &Database,
    asset_id: &str,
) -> Result<Vec<Escalation>, EstateError> {
    let asset_id = asset_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {ESCALATION_COLUMNS} FROM escalations x
                 WHERE x.asset_id = ?1
                 ORDER BY x.triggered_date DESC, x.rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![asset_id], escalation_from_row)?;
            let mut escalations = Vec::new();
            for row in rows {
                escalations.push(row?);
            }
            Ok(escalations)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
