// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset CRUD operations.
//!
//! `metadata` is stored as a JSON object. Only the typed last-contact
//! fields are interpreted; other keys pass through untouched.

use chrono::{DateTime, Utc};
use estatekeep_core::EstateError;
use estatekeep_core::types::{Asset, AssetMetadata, AssetStatus};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::codec::{enum_col, json_col, opt_json_col, to_json, ts, ts_col};
use crate::database::Database;

const ASSET_COLUMNS: &str = "id, estate_id, institution, asset_type, status, value, metadata, \
                             requirements, created_at, updated_at";

fn asset_from_row(row: &Row<'_>) -> rusqlite::Result<Asset> {
    Ok(Asset {
        id: row.get(0)?,
        estate_id: row.get(1)?,
        institution: row.get(2)?,
        asset_type: row.get(3)?,
        status: enum_col(row, 4)?,
        value: row.get(5)?,
        metadata: json_col(row, 6)?,
        requirements: opt_json_col(row, 7)?,
        created_at: ts_col(row, 8)?,
        updated_at: ts_col(row, 9)?,
    })
}

pub(crate) fn select_asset(conn: &Connection, id: &str) -> rusqlite::Result<Option<Asset>> {
    let sql = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = ?1");
    conn.query_row(&sql, params![id], asset_from_row).optional()
}

/// Create a new asset.
pub async fn create_asset(db: &Database, asset: &Asset) -> Result<(), EstateError> {
    let asset = asset.clone();
    db.connection()
        .call(move |conn| {
            let requirements = asset.requirements.as_ref().map(to_json).transpose()?;
            conn.execute(
                "INSERT INTO assets (id, estate_id, institution, asset_type, status, value,
                                     metadata, requirements, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    asset.id,
                    asset.estate_id,
                    asset.institution,
                    asset.asset_type,
                    asset.status.to_string(),
                    asset.value,
                    to_json(&asset.metadata)?,
                    requirements,
                    ts(&asset.created_at),
                    ts(&asset.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get an asset by ID.
pub async fn get_asset(db: &Database, id: &str) -> Result<Option<Asset>, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| select_asset(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// List every asset of an estate in creation order.
pub async fn list_assets_for_estate(
    db: &Database,
    estate_id: &str,
) -> Result<Vec<Asset>, EstateError> {
    let estate_id = estate_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {ASSET_COLUMNS} FROM assets WHERE estate_id = ?1
                 ORDER BY created_at ASC, rowid ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![estate_id], asset_from_row)?;
            let mut assets = Vec::new();
            for row in rows {
                assets.push(row?);
            }
            Ok(assets)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set an asset's lifecycle status. Returns the updated asset, or `None`
/// if no asset has that ID.
pub async fn update_asset_status(
    db: &Database,
    id: &str,
    status: AssetStatus,
    at: DateTime<Utc>,
) -> Result<Option<Asset>, EstateError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE assets SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.to_string(), ts(&at), id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            select_asset(conn, &id)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Overwrite an asset's metadata object. Returns `false` if no asset has that ID.
pub async fn update_asset_metadata(
    db: &Database,
    id: &str,
    metadata: &AssetMetadata,
    at: DateTime<Utc>,
) -> Result<bool, EstateError> {
    let id = id.to_string();
    let metadata = metadata.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE assets SET metadata = ?1, updated_at = ?2 WHERE id = ?3",
                params![to_json(&metadata)?, ts(&at), id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::fixtures::{asset, at, setup_seeded_db};
    use estatekeep_core::types::CommunicationMethod;

    #[tokio::test]
    async fn create_and_get_asset_roundtrips() {
        let (db, _dir) = setup_seeded_db().await;
        let mut a2 = asset("a2", "e1", AssetStatus::Discovered);
        a2.requirements = Some(serde_json::json!({"deathCertificate": true}));
        create_asset(&db, &a2).await.unwrap();

        let found = get_asset(&db, "a2").await.unwrap().unwrap();
        assert_eq!(found, a2);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_assets_is_scoped_to_estate() {
        let (db, _dir) = setup_seeded_db().await;
        create_asset(&db, &asset("a2", "e1", AssetStatus::Closed))
            .await
            .unwrap();

        let assets = list_assets_for_estate(&db, "e1").await.unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].id, "a1");

        assert!(list_assets_for_estate(&db, "other").await.unwrap().is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_status_returns_updated_asset() {
        let (db, _dir) = setup_seeded_db().await;
        let when = at("2026-02-01T12:00:00Z");

        let updated = update_asset_status(&db, "a1", AssetStatus::InReview, when)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AssetStatus::InReview);
        assert_eq!(updated.updated_at, when);

        let missing = update_asset_status(&db, "nope", AssetStatus::Closed, when)
            .await
            .unwrap();
        assert!(missing.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn metadata_roundtrips_with_extra_keys() {
        let (db, _dir) = setup_seeded_db().await;
        let mut meta = AssetMetadata::default();
        meta.last_contact = Some(at("2026-02-03T09:30:00Z"));
        meta.last_contact_method = Some(CommunicationMethod::Fax);
        meta.extra
            .insert("policyNumber".to_string(), serde_json::json!("P-778"));

        assert!(
            update_asset_metadata(&db, "a1", &meta, at("2026-02-03T09:30:00Z"))
                .await
                .unwrap()
        );
        let found = get_asset(&db, "a1").await.unwrap().unwrap();
        assert_eq!(found.metadata, meta);
        db.close().await.unwrap();
    }
}
