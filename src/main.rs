mod cli;
mod deploy;
mod logger;
mod model;
mod server;

use std::{path::Path, process::ExitCode};

use clap::Parser;
use manifest::prelude::Stack;

use crate::{
    cli::{Cli, Command, RenderTarget},
    deploy::{compose::render_compose, env::check_env_file, nginx},
    server::{
        config::Config,
        error::{deploy::DeployError, AppError},
        model::route::RouteTable,
        service::collect::CollectStaticService,
        startup,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logger::init_logger(cli.verbose);

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Serve => {
            let config = Config::from_env()?;
            startup::serve(&config).await?;
        }
        Command::CollectStatic { from, to } => {
            CollectStaticService::new(from, to).run().await?;
        }
        Command::Render { target } => match target {
            RenderTarget::Compose {
                variant,
                namespace,
                output,
            } => {
                let stack = Stack::foodgram(variant, &namespace);
                emit(&render_compose(&stack)?, output.as_deref())?;
            }
            RenderTarget::Nginx { output } => {
                let config = Config::from_env()?;
                let options = nginx::NginxOptions {
                    listen_port: config.listen_addr.port(),
                    client_max_body_size: config.max_body_size,
                };
                let rendered = nginx::render_nginx(&RouteTable::foodgram(&config), &options);
                emit(&rendered, output.as_deref())?;
            }
        },
        Command::Check {
            variant,
            namespace,
            env_file,
        } => {
            let stack = Stack::foodgram(variant, &namespace);
            let mut ok = true;

            if let Err(issues) = stack.check() {
                for issue in issues {
                    eprintln!("{}", issue);
                }
                ok = false;
            }
            if let Err(e) = check_env_file(&env_file) {
                eprintln!("{}", e);
                ok = false;
            }

            if !ok {
                return Ok(ExitCode::FAILURE);
            }
            tracing::info!(
                "Stack '{}' is consistent: {} services, {} volumes",
                stack.name,
                stack.services.len(),
                stack.volumes.len()
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Writes rendered output to `path`, or stdout when no path is given.
fn emit(contents: &str, path: Option<&Path>) -> Result<(), DeployError> {
    match path {
        Some(path) => {
            std::fs::write(path, contents).map_err(|source| DeployError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", contents),
    }
    Ok(())
}
