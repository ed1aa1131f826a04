use anyhow::{Context, Result};
use clap::Parser;
use logicapp_api::{ArmClient, ArmConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod dry_run;

use args::{Cli, Command, CreateArgs};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Create(create) => run_create(cli.subscription_id, create).await,
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_create(subscription_id: Option<String>, args: CreateArgs) -> Result<()> {
    let input = args.to_input();
    // Bad input is reported ahead of missing configuration.
    input.validate()?;

    let config = ArmConfig::from_env().with_subscription_id(subscription_id);
    let client = ArmClient::new(config).context("configure resource manager client")?;
    debug!(subscription = %client.subscription_id, dry_run = args.dry_run, "running create");

    if args.dry_run {
        let prepared = logicapp_engine::prepare_workflow(&input, &client).await?;
        let request = client
            .create_workflow_request(&prepared.resource_group, &prepared.name, &prepared.request)
            .build()
            .context("build create request")?;
        let body = serde_json::to_value(&prepared.request)?;
        let out = dry_run::describe_request(&request, &body);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let created = logicapp_engine::create_workflow(&input, &client, &client).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}
