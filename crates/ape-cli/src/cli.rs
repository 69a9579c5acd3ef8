//! CLI argument definitions for ape.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ape",
    version,
    about = "a productive environment for feature-oriented product lines",
    long_about = "ape manages containers of products, generates product equations from \
                  FeatureIDE configurations and orders features so that every declared \
                  ordering constraint holds."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the ape root, the active product and all containers
    Info,

    /// Print a shell snippet that changes into a product directory
    Cd {
        /// Product of interest: <container>:<product> or <product>
        poi: String,
    },

    /// Print a shell snippet that activates a product
    Switch {
        /// Product of interest: <container>:<product> or <product>
        poi: String,
    },

    /// Switch to a product and change into its directory
    #[command(alias = "zap")]
    Teleport {
        /// Product of interest: <container>:<product> or <product>
        poi: String,
    },

    /// Order the features of an equation file
    Order {
        /// Equation file, one feature per line
        #[arg(short, long)]
        equation: PathBuf,
        /// feature_order.json with ordering declarations
        #[arg(short, long)]
        constraints: PathBuf,
    },

    /// Validate a product equation against the feature model
    Validate {
        /// Product of interest; defaults to the active product
        #[arg(long)]
        poi: Option<String>,
    },

    /// Check the order of a feature list against order constraints
    CheckOrder {
        /// model.xml or equation file listing the features in order
        #[arg(short, long, requires = "constraints")]
        features: Option<PathBuf>,
        /// feature_order.json with order constraints
        #[arg(short, long, requires = "features")]
        constraints: Option<PathBuf>,
        /// Check the product line model.xml of this product of interest;
        /// used when no files are given, defaults to the active product
        #[arg(long, conflicts_with = "features")]
        poi: Option<String>,
        /// Fail when a constrained feature is missing from the list
        #[arg(long)]
        strict: bool,
    },

    /// Generate a product equation from its FeatureIDE configuration
    ConfigToEquation {
        /// Product of interest; defaults to the active product
        #[arg(long)]
        poi: Option<String>,
    },

    /// Print the enriched feature dependency graph in DOT format
    Graph {
        /// feature_order.json with ordering declarations
        #[arg(short, long)]
        constraints: PathBuf,
        /// Equation whose features are added to the graph
        #[arg(short, long)]
        equation: Option<PathBuf>,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
