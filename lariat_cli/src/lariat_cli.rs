// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use clap::Parser;

use lariat_api::deployer::FunctionDeployerAPI;
use lariat_api::function_identity::FunctionIdentity;
use lariat_cli::deployment::RecordedDeployment;
use lariat_cli::descriptor::ApplicationDescriptor;

/// Name of the application descriptor, looked up under the project path.
const DESCRIPTOR_FILE: &str = "lariat.toml";

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Wire the declared event sources of an already-built application to
    /// its deployed function.
    Deploy {
        /// Path of the project to deploy.
        #[arg(default_value_t = String::from("."))]
        project: String,
    },
}

#[derive(Debug, clap::Parser)]
#[command(long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Credential profile used to build the provider clients.
    #[arg(short, long, default_value_t = String::from(""))]
    profile: String,
    /// Enable debug-level logging.
    #[arg(short, long, default_value_t = false)]
    debug: bool,
    /// Compute and print the full plan of grants and registrations without
    /// issuing any provider call.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Write a template application descriptor to the given path and quit.
    #[arg(short, long, default_value_t = String::from(""))]
    template: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(match args.debug {
        true => "debug",
        false => "info",
    }))
    .init();

    if !args.template.is_empty() {
        lariat_api::util::create_template(&args.template, lariat_cli::lariat_default_descriptor().as_str())?;
        return Ok(());
    }

    match args.command {
        None => log::debug!("Bye"),
        Some(Commands::Deploy { project }) => {
            let project = std::path::PathBuf::from(project);
            let descriptor_path = project.join(DESCRIPTOR_FILE);
            if std::fs::metadata(&descriptor_path).is_err() {
                return Err(anyhow::anyhow!(
                    "application descriptor does not exist or cannot be accessed: {}",
                    descriptor_path.display()
                ));
            }
            let descriptor: ApplicationDescriptor = toml::from_str(&std::fs::read_to_string(&descriptor_path)?)?;
            let catalog = lariat_cli::descriptor_to_catalog(descriptor);
            log::debug!(
                "descriptor declares {} schedule(s), {} topic(s), {} bucket(s)",
                catalog.schedules.len(),
                catalog.topics.len(),
                catalog.buckets.len()
            );

            let function = match args.dry_run {
                true => {
                    log::info!("dry run: no provider call will be issued");
                    FunctionIdentity::placeholder()
                }
                false => {
                    let mut deployer = RecordedDeployment { project: project.clone() };
                    deployer.build_and_deploy(&project).await?
                }
            };
            log::info!("wiring event sources to '{}'", function);

            let mut provider = lariat_api::aws_impl::provider::AwsProvider::new(match args.profile.is_empty() {
                true => None,
                false => Some(args.profile.clone()),
            })
            .await;
            let mut reconciler = lariat_reconciler::reconciler::Reconciler::new(&mut provider, args.dry_run);
            let summary = reconciler.reconcile(&function, &catalog).await?;
            println!("{}", summary);
        }
    }
    Ok(())
}
