mod error;

pub use error::{Error, Result};

use std::{env, future::Future, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

/// Databases that exist on a stock Postgres and accept admin connections.
const ADMIN_DATABASES: [&str; 2] = ["postgres", "template1"];

pub fn env_dsn() -> Option<String> {
	env::var("JOT_PG_DSN").ok()
}

/// A throwaway database with a unique name, created on `new` and dropped by
/// `cleanup` (or from `Drop` as a fallback).
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error(format!("JOT_PG_DSN did not parse: {err}.")))?;
		let (admin, mut conn) = admin_connection(&base).await?;
		let name = format!("jot_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|err| Error(format!("CREATE DATABASE {name} failed: {err}.")))?;

		Ok(Self {
			dsn: base.database(&name).to_url_lossy().to_string(),
			name,
			admin,
			dropped: false,
		})
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.drop_database().await
	}

	async fn drop_database(&mut self) -> Result<()> {
		if self.dropped {
			return Ok(());
		}

		drop_database(&self.name, &self.admin).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let admin = self.admin.clone();
		// `Drop` may run inside an async test; the blocking work needs its own
		// runtime on its own thread.
		let cleaner = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error(format!("Failed to build cleanup runtime: {err}.")))
				.and_then(|runtime| runtime.block_on(drop_database(&name, &admin)));

			if let Err(err) = outcome {
				eprintln!("Leaked test database {name}: {err}");
			}
		});
		let _ = cleaner.join();
	}
}

/// Run `f` against a fresh database and drop the database afterwards, even
/// when `f` fails.
pub async fn with_test_db<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestDatabase) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let mut db = TestDatabase::new(base_dsn).await?;
	let result = f(&db).await;

	match db.drop_database().await {
		Ok(()) => result,
		Err(err) if result.is_ok() => Err(err),
		// A cleanup failure must not mask the test's own error.
		Err(err) => {
			eprintln!("Test database cleanup warning: {err}");

			result
		},
	}
}

async fn admin_connection(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut last = None;

	for database in ADMIN_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => last = Some(err),
		}
	}

	Err(Error(format!("No admin database accepted a connection: {last:?}.")))
}

async fn drop_database(name: &str, admin: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin)
		.await
		.map_err(|err| Error(format!("Admin connection for cleanup failed: {err}.")))?;

	// Postgres refuses to drop a database with live sessions.
	let _ = sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.fetch_all(&mut conn)
	.await;

	sqlx::query(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str())
		.execute(&mut conn)
		.await
		.map_err(|err| Error(format!("DROP DATABASE {name} failed: {err}.")))?;

	Ok(())
}
