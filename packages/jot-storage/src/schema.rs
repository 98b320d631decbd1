/// `init.sql` pulls the per-table files in via psql-style `\ir` includes;
/// they are embedded at compile time and expanded here.
const INIT_SQL: &str = include_str!("../../../sql/init.sql");
const TABLE_FILES: [(&str, &str); 2] = [
	("tables/001_users.sql", include_str!("../../../sql/tables/001_users.sql")),
	("tables/002_notes.sql", include_str!("../../../sql/tables/002_notes.sql")),
];

pub fn render_schema() -> String {
	let mut rendered = String::new();

	for line in INIT_SQL.lines() {
		let included = line.trim().strip_prefix("\\ir ").and_then(|path| {
			TABLE_FILES.iter().find(|(name, _)| *name == path.trim()).map(|(_, sql)| *sql)
		});

		rendered.push_str(included.unwrap_or(line));
		rendered.push('\n');
	}

	rendered
}
