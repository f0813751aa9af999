use clap::{Parser, Subcommand};

/// `translator-providers` - inspect and use the translation provider registry.
#[derive(Parser, Debug)]
#[command(name = "translator-providers")]
#[command(author = "theonlyhennygod")]
#[command(version)]
#[command(about = "Provider registry and detection for multi-backend translation.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show registered and available providers with model recommendations
    Status {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,

        /// Also run a network health check against every registered provider
        #[arg(long)]
        probe: bool,
    },

    /// List every known provider and whether it is registered and available
    List,

    /// Show which provider would be selected
    Detect {
        /// Resolve this provider explicitly instead of detecting a default
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Show recommended models for a provider (no credentials needed)
    Models {
        /// Provider name (openai, anthropic, vertexai, ollama)
        name: String,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Send a single prompt through the selected provider
    Complete {
        /// Text to send
        prompt: String,

        /// Provider to use (default: detected)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model to use (default: the provider's configured model)
        #[arg(long)]
        model: Option<String>,

        /// System prompt
        #[arg(short, long)]
        system: Option<String>,

        /// Temperature (0.0 - 2.0)
        #[arg(short, long, default_value = "0.3")]
        temperature: f64,
    },
}
