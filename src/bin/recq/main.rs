mod args;
mod commands;

use args::{Args, Command};
use clap::Parser;
use colored::Colorize;
use record_query::registry::{EntityType, FilterOperator};

fn main() {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Entities => list_entities(),
        Command::Operators => list_operators(),
        Command::Check { body } => commands::check(body),
    }
}

fn list_entities() {
    println!("Entity types:");

    for entity in EntityType::ALL {
        println!("  {:>2}: {}", entity.code(), entity.name().bold());
    }
}

fn list_operators() {
    println!("Filter operators:");

    for operator in FilterOperator::ALL {
        println!(
            "  {:>2}: {} ({})",
            operator.code(),
            operator.name().bold(),
            operator.operand_count()
        );
    }
}
