// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification CRUD operations.

use estatekeep_core::EstateError;
use estatekeep_core::types::Notification;
use rusqlite::{Row, params};

use crate::codec::{enum_col, ts, ts_col};
use crate::database::Database;

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        estate_id: row.get(2)?,
        asset_id: row.get(3)?,
        kind: enum_col(row, 4)?,
        title: row.get(5)?,
        message: row.get(6)?,
        read: row.get(7)?,
        created_at: ts_col(row, 8)?,
    })
}

/// Insert a new notification.
pub async fn insert_notification(db: &Database, n: &Notification) -> Result<(), EstateError> {
    let n = n.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO notifications
                    (id, user_id, estate_id, asset_id, kind, title, message, read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    n.id,
                    n.user_id,
                    n.estate_id,
                    n.asset_id,
                    n.kind.to_string(),
                    n.title,
                    n.message,
                    n.read,
                    ts(&n.created_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A user's notifications, newest first, optionally only unread ones.
pub async fn list_notifications(
    db: &Database,
    user_id: &str,
    unread_only: bool,
) -> Result<Vec<Notification>, EstateError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, estate_id, asset_id, kind, title, message, read, created_at
                 FROM notifications
                 WHERE user_id = ?1 AND (?2 = 0 OR read = 0)
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt.query_map(params![user_id, unread_only], notification_from_row)?;
            let mut notifications = Vec::new();
            for row in rows {
                notifications.push(row?);
            }
            Ok(notifications)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark a notification read. Returns `false` if it does not exist.
pub async fn mark_notification_read(db: &Database, id: &str) -> Result<bool, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let changed =
                conn.execute("UPDATE notifications SET read = 1 WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
