use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = vitae_api::Args::parse();
	vitae_api::run(args).await
}
