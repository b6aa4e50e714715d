use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = lyre_api::Args::parse();

	lyre_api::run(args).await
}
