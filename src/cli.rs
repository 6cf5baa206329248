use std::path::PathBuf;

use clap::{Parser, Subcommand};
use manifest::prelude::Variant;

/// Foodgram gateway and deployment toolkit.
#[derive(Parser, Debug)]
#[command(name = "foodgram", version, about)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the gateway: proxy /admin/ and /api/, serve docs, media and static files
    Serve,

    /// Copy compiled frontend assets into the static volume, then exit
    CollectStatic {
        /// Build output directory
        #[arg(long, default_value = "/app/build")]
        from: PathBuf,

        /// Mount point of the static volume
        #[arg(long, default_value = "/frontend_static")]
        to: PathBuf,
    },

    /// Render deployment files
    Render {
        #[command(subcommand)]
        target: RenderTarget,
    },

    /// Check the stack manifest and the env file it requires
    Check {
        /// Stack flavour: production (registry images) or local (build from sources)
        #[arg(long, default_value = "production")]
        variant: Variant,

        /// Registry namespace of the production images
        #[arg(long, default_value = "foodgram")]
        namespace: String,

        /// Env file every service reads
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum RenderTarget {
    /// Orchestration manifest for the four-service stack
    Compose {
        #[arg(long, default_value = "production")]
        variant: Variant,

        #[arg(long, default_value = "foodgram")]
        namespace: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// nginx server block equivalent to the gateway routing
    Nginx {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
