use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = jot_api::Args::parse();

	jot_api::run(args).await
}
