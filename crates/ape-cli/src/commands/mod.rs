//! Command dispatch and handler modules.

mod check_order;
mod config_to_equation;
mod context;
mod graph;
mod info;
mod order;
mod validate;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    tracing::debug!("running {:?}", cli.command);
    match cli.command {
        Command::Info => info::exec(),
        Command::Cd { poi } => context::cd(&poi),
        Command::Switch { poi } => context::switch(&poi),
        Command::Teleport { poi } => context::teleport(&poi),
        Command::Order {
            equation,
            constraints,
        } => order::exec(&equation, &constraints),
        Command::Validate { poi } => validate::exec(poi.as_deref()),
        Command::CheckOrder {
            features,
            constraints,
            poi,
            strict,
        } => match (features, constraints) {
            (Some(features), Some(constraints)) => {
                check_order::exec(&features, &constraints, strict)
            }
            _ => check_order::exec_model(poi.as_deref(), strict),
        },
        Command::ConfigToEquation { poi } => config_to_equation::exec(poi.as_deref()),
        Command::Graph {
            constraints,
            equation,
        } => graph::exec(&constraints, equation.as_deref()),
    }
}
