use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

/// All DDL runs under this advisory lock so concurrent instances cannot
/// interleave their bootstraps.
const SCHEMA_LOCK_ID: i64 = 6_219_301;

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &jot_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	/// Create missing tables and indexes. Idempotent; runs on every startup.
	pub async fn ensure_schema(&self) -> Result<()> {
		// A transaction pins the advisory lock to one connection and releases
		// it on commit.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		for statement in schema::render_schema().split(';') {
			let statement = statement.trim();

			if !statement.is_empty() {
				sqlx::query(statement).execute(&mut *tx).await?;
			}
		}

		tx.commit().await?;

		Ok(())
	}
}
