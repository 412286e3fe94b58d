// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Estate CRUD operations.

use estatekeep_core::EstateError;
use estatekeep_core::types::Estate;
use rusqlite::{Row, params};

use crate::codec::{ts, ts_col};
use crate::database::Database;

const ESTATE_COLUMNS: &str = "id, name, deceased_name, owner_id, created_at";

fn estate_from_row(row: &Row<'_>) -> rusqlite::Result<Estate> {
    Ok(Estate {
        id: row.get(0)?,
        name: row.get(1)?,
        deceased_name: row.get(2)?,
        owner_id: row.get(3)?,
        created_at: ts_col(row, 4)?,
    })
}

/// Create a new estate.
pub async fn create_estate(db: &Database, estate: &Estate) -> Result<(), EstateError> {
    let estate = estate.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO estates (id, name, deceased_name, owner_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    estate.id,
                    estate.name,
                    estate.deceased_name,
                    estate.owner_id,
                    ts(&estate.created_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get an estate by ID.
pub async fn get_estate(db: &Database, id: &str) -> Result<Option<Estate>, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!("SELECT {ESTATE_COLUMNS} FROM estates WHERE id = ?1");
            match conn.query_row(&sql, params![id], estate_from_row) {
                Ok(estate) => Ok(Some(estate)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all estates, oldest first.
pub async fn list_estates(db: &Database) -> Result<Vec<Estate>, EstateError> {
    db.connection()
        .call(|conn| {
            let sql =
                format!("SELECT {ESTATE_COLUMNS} FROM estates ORDER BY created_at ASC, id ASC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], estate_from_row)?;
            let mut estates = Vec::new();
            for row in rows {
                estates.push(row?);
            }
            Ok(estates)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
