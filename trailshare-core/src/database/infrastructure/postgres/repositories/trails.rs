use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    PgPool, Postgres, QueryBuilder, Row,
    postgres::{PgPoolOptions, PgRow},
};
use tracing::{debug, info};
use trailshare_model::{
    AccountId, GeoPoint, Likeness, Trail, TrailKey, TrailKind,
};
use uuid::Uuid;

use crate::database::ports::trails::TrailRepository;
use crate::error::{Result, TrailError};
use crate::query::TrailQuery;

const TRAIL_COLUMNS: &str = "account_id, revision, path, thumb_exists, \
     mime_type, created_at, geo_lat, geo_lng, tags, bytes, kind, likeness, \
     evaluated_on";

#[derive(Debug, Clone)]
pub struct PostgresTrailRepository {
    pool: PgPool,
}

impl PostgresTrailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and apply pending migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| {
                TrailError::Database(format!("Failed to connect: {e}"))
            })?;

        crate::MIGRATOR.run(&pool).await.map_err(|e| {
            TrailError::Database(format!("Failed to run migrations: {e}"))
        })?;

        info!(max_connections, "connected to trail database");
        Ok(Self::new(pool))
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Trail> {
        let account: Uuid = row.try_get("account_id").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read account_id: {e}"))
        })?;
        let revision: String = row.try_get("revision").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read revision: {e}"))
        })?;
        let path: String = row.try_get("path").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read path: {e}"))
        })?;
        let thumb_exists: bool = row.try_get("thumb_exists").map_err(|e| {
            TrailError::InvalidRecord(format!(
                "Failed to read thumb_exists: {e}"
            ))
        })?;
        let mime_type: String = row.try_get("mime_type").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read mime_type: {e}"))
        })?;
        let created_at: DateTime<Utc> =
            row.try_get("created_at").map_err(|e| {
                TrailError::InvalidRecord(format!(
                    "Failed to read created_at: {e}"
                ))
            })?;
        let lat: f64 = row.try_get("geo_lat").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read geo_lat: {e}"))
        })?;
        let lng: f64 = row.try_get("geo_lng").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read geo_lng: {e}"))
        })?;
        let tags: Vec<String> = row.try_get("tags").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read tags: {e}"))
        })?;
        let bytes: i64 = row.try_get("bytes").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read bytes: {e}"))
        })?;
        let kind: i16 = row.try_get("kind").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read kind: {e}"))
        })?;
        let likeness: i16 = row.try_get("likeness").map_err(|e| {
            TrailError::InvalidRecord(format!("Failed to read likeness: {e}"))
        })?;
        let evaluated_on: Option<DateTime<Utc>> =
            row.try_get("evaluated_on").map_err(|e| {
                TrailError::InvalidRecord(format!(
                    "Failed to read evaluated_on: {e}"
                ))
            })?;

        Ok(Trail {
            account: AccountId(account),
            revision,
            path,
            thumb_exists,
            mime_type,
            created_at,
            geo_point: GeoPoint::new(lat, lng),
            tags,
            bytes,
            kind: TrailKind::try_from(kind)?,
            likeness: Likeness::try_from(likeness)?,
            evaluated_on,
        })
    }
}

/// Translate a [`TrailQuery`] into a bound `SELECT` over `trails`.
pub(crate) fn select_trails(query: &TrailQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {TRAIL_COLUMNS} FROM trails WHERE account_id = "
    ));
    builder.push_bind(query.account.to_uuid());

    if let Some(after) = query.filters.created_after {
        builder.push(" AND created_at > ").push_bind(after);
    }

    if let Some(likeness) = query.filters.likeness {
        builder.push(" AND likeness = ").push_bind(likeness.as_i16());
    }

    if let Some(sort) = query.sort {
        builder
            .push(" ORDER BY ")
            .push(sort.field.column())
            .push(" ")
            .push(sort.order.as_sql());
    }

    if let Some(limit) = query.limit {
        builder
            .push(" LIMIT ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    }

    builder
}

#[async_trait]
impl TrailRepository for PostgresTrailRepository {
    async fn load(&self, key: &TrailKey) -> Result<Trail> {
        let row = sqlx::query(&format!(
            "SELECT {TRAIL_COLUMNS} FROM trails \
             WHERE account_id = $1 AND revision = $2"
        ))
        .bind(key.account.to_uuid())
        .bind(&key.revision)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            TrailError::Database(format!("Failed to load trail {key}: {e}"))
        })?
        .ok_or_else(|| TrailError::NotFound(key.to_string()))?;

        Self::map_row(&row)
    }

    async fn save(&self, trail: &Trail) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trails (
                account_id, revision, path, thumb_exists, mime_type,
                created_at, geo_lat, geo_lng, tags, bytes, kind, likeness,
                evaluated_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (account_id, revision) DO UPDATE SET
                path = EXCLUDED.path,
                thumb_exists = EXCLUDED.thumb_exists,
                mime_type = EXCLUDED.mime_type,
                created_at = EXCLUDED.created_at,
                geo_lat = EXCLUDED.geo_lat,
                geo_lng = EXCLUDED.geo_lng,
                tags = EXCLUDED.tags,
                bytes = EXCLUDED.bytes,
                kind = EXCLUDED.kind,
                likeness = EXCLUDED.likeness,
                evaluated_on = EXCLUDED.evaluated_on
            "#,
        )
        .bind(trail.account.to_uuid())
        .bind(&trail.revision)
        .bind(&trail.path)
        .bind(trail.thumb_exists)
        .bind(&trail.mime_type)
        .bind(trail.created_at)
        .bind(trail.geo_point.lat)
        .bind(trail.geo_point.lng)
        .bind(&trail.tags)
        .bind(trail.bytes)
        .bind(trail.kind as i16)
        .bind(trail.likeness.as_i16())
        .bind(trail.evaluated_on)
        .execute(self.pool())
        .await
        .map_err(|e| {
            TrailError::Database(format!(
                "Failed to save trail {}: {e}",
                trail.key()
            ))
        })?;

        Ok(())
    }

    async fn query(&self, query: &TrailQuery) -> Result<Vec<Trail>> {
        let mut builder = select_trails(query);
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                TrailError::Database(format!("Failed to query trails: {e}"))
            })?;

        debug!(
            account = %query.account,
            rows = rows.len(),
            "postgres trail query"
        );

        rows.iter().map(Self::map_row).collect()
    }
}
