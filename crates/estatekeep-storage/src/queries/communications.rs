// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset communication CRUD operations.
//!
//! "Newest first" is `date DESC`, with insertion order breaking ties so two
//! events recorded in the same millisecond still have a stable order.

use chrono::{DateTime, Utc};
use estatekeep_core::EstateError;
use estatekeep_core::types::{AssetSummary, Communication, CommunicationDetail, UserSummary};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::codec::{enum_col, opt_ts, opt_ts_col, ts, ts_col};
use crate::database::Database;

const COMMUNICATION_COLUMNS: &str = "c.id, c.asset_id, c.comm_type, c.method, c.direction, \
     c.subject, c.content, c.response, c.response_date, c.next_action_date, \
     c.next_action_type, c.date, c.created_by_id";

const NEWEST_FIRST: &str = "ORDER BY c.date DESC, c.rowid DESC";

fn communication_from_row(row: &Row<'_>) -> rusqlite::Result<Communication> {
    Ok(Communication {
        id: row.get(0)?,
        asset_id: row.get(1)?,
        kind: enum_col(row, 2)?,
        method: enum_col(row, 3)?,
        direction: enum_col(row, 4)?,
        subject: row.get(5)?,
        content: row.get(6)?,
        response: row.get(7)?,
        response_date: opt_ts_col(row, 8)?,
        next_action_date: opt_ts_col(row, 9)?,
        next_action_type: row.get(10)?,
        date: ts_col(row, 11)?,
        created_by_id: row.get(12)?,
    })
}

fn select_communication(conn: &Connection, id: &str) -> rusqlite::Result<Option<Communication>> {
    let sql = format!("SELECT {COMMUNICATION_COLUMNS} FROM asset_communications c WHERE c.id = ?1");
    conn.query_row(&sql, params![id], communication_from_row)
        .optional()
}

/// Insert a new communication.
pub async fn insert_communication(db: &Database, comm: &Communication) -> Result<(), EstateError> {
    let comm = comm.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO asset_communications
                    (id, asset_id, comm_type, method, direction, subject, content, response,
                     response_date, next_action_date, next_action_type, date, created_by_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    comm.id,
                    comm.asset_id,
                    comm.kind.to_string(),
                    comm.method.to_string(),
                    comm.direction.to_string(),
                    comm.subject,
                    comm.content,
                    comm.response,
                    opt_ts(comm.response_date.as_ref()),
                    opt_ts(comm.next_action_date.as_ref()),
                    comm.next_action_type,
                    ts(&comm.date),
                    comm.created_by_id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a communication by ID.
pub async fn get_communication(
    db: &Database,
    id: &str,
) -> Result<Option<Communication>, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| select_communication(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a communication joined with its asset, estate, and creator.
pub async fn get_communication_detail(
    db: &Database,
    id: &str,
) -> Result<Option<CommunicationDetail>, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {COMMUNICATION_COLUMNS},
                        a.institution, a.asset_type, e.id, e.name,
                        u.name, u.email
                 FROM asset_communications c
                 JOIN assets a ON a.id = c.asset_id
                 JOIN estates e ON e.id = a.estate_id
                 JOIN users u ON u.id = c.created_by_id
                 WHERE c.id = ?1"
            );
            conn.query_row(&sql, params![id], |row| {
                let communication = communication_from_row(row)?;
                let asset = AssetSummary {
                    id: communication.asset_id.clone(),
                    institution: row.get(13)?,
                    asset_type: row.get(14)?,
                    estate_id: row.get(15)?,
                    estate_name: row.get(16)?,
                };
                let created_by = UserSummary {
                    id: communication.created_by_id.clone(),
                    name: row.get(17)?,
                    email: row.get(18)?,
                };
                Ok(CommunicationDetail {
                    communication,
                    asset,
                    created_by,
                })
            })
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all communications for an asset, newest first.
pub async fn list_communications(
    db: &Database,
    asset_id: &str,
) -> Result<Vec<Communication>, EstateError> {
    let asset_id = asset_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {COMMUNICATION_COLUMNS} FROM asset_communications c
                 WHERE c.asset_id = ?1 {NEWEST_FIRST}"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![asset_id], communication_from_row)?;
            let mut comms = Vec::new();
            for row in rows {
                comms.push(row?);
            }
            Ok(comms)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The asset's most recent communication, if any.
pub async fn latest_communication(
    db: &Database,
    asset_id: &str,
) -> Result<Option<Communication>, EstateError> {
    let asset_id = asset_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {COMMUNICATION_COLUMNS} FROM asset_communications c
                 WHERE c.asset_id = ?1 {NEWEST_FIRST} LIMIT 1"
            );
            conn.query_row(&sql, params![asset_id], communication_from_row)
                .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Attach a response to a communication. Returns `None` if it does not exist.
pub async fn set_communication_response(
    db: &Database,
    id: &str,
    response: &str,
    response_date: DateTime<Utc>,
) -> Result<Option<Communication>, EstateError> {
    let id = id.to_string();
    let response = response.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE asset_communications SET response = ?1, response_date = ?2 WHERE id = ?3",
                params![response, ts(&response_date), id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            select_communication(conn, &id)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a communication. Returns `false` if it did not exist.
pub async fn delete_communication(db: &Database, id: &str) -> Result<bool, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let changed =
                conn.execute("DELETE FROM asset_communications WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
