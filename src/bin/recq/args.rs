use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lists the record kinds the API knows about, with their wire codes.
    Entities,
    /// Lists the filter operators, with their wire codes and operand counts.
    Operators,
    /// Validates a JSON query body without sending it anywhere.
    ///
    /// Pass the body as an argument, or "-" to read it from stdin.
    Check { body: String },
}
