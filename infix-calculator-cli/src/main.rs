use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use infix_calculator::interpreter::{postfix_to_string, tokens_to_string};
use infix_calculator::{infix_to_postfix, parse, tokenize, Calculator, Strategy};
use log::{debug, warn};
use std::collections::HashMap;

/// Calculates the given infix expression
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to calculate
    expression: String,

    /// How the expression is parsed and evaluated
    #[clap(short, long, value_enum, default_value = "tree")]
    strategy: StrategyArgument,

    /// Binds a variable to a value, may be repeated
    #[clap(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<(String, f64)>,

    /// Print the expression in postfix notation
    #[clap(long)]
    postfix: bool,

    /// Print the expression tree
    #[clap(long)]
    tree: bool,

    /// Print the expression in normalised infix notation
    #[clap(long)]
    infix: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StrategyArgument {
    Tree,
    ShuntingYard,
    /// Evaluate with both strategies and fail if they disagree
    Both,
}

fn parse_binding(binding: &str) -> Result<(String, f64), String> {
    let (name, value) = binding
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", binding))?;
    let name = name.trim();
    if name.is_empty() || !name.starts_with(char::is_alphabetic) {
        return Err(format!("'{}' is not a valid variable name", name));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("invalid value for '{}': {}", name, error))?;
    Ok((name.to_string(), value))
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let variables: HashMap<String, f64> = args.bindings.iter().cloned().collect();
    debug!("Variables: {:?}", variables);

    print_representations(&args, &variables)?;

    let value = match args.strategy {
        StrategyArgument::Tree => {
            Calculator::new(Strategy::SyntaxTree, &variables).calculate(&args.expression)
        }
        StrategyArgument::ShuntingYard => {
            Calculator::new(Strategy::ShuntingYard, &variables).calculate(&args.expression)
        }
        StrategyArgument::Both => {
            Calculator::new(Strategy::default(), &variables).cross_check(&args.expression)
        }
    }
    .with_context(|| format!("could not calculate '{}'", args.expression))?;

    println!("{}", value);
    Ok(())
}

fn print_representations(args: &Arguments, variables: &HashMap<String, f64>) -> Result<()> {
    let tokens = tokenize(&args.expression)
        .with_context(|| format!("could not tokenize '{}'", args.expression))?;
    if tokens.is_empty() {
        return Ok(());
    }

    if args.postfix {
        let postfix = infix_to_postfix(&tokens).context("could not convert to postfix")?;
        println!("{}", postfix_to_string(&postfix));
    }

    let tree = match parse(&tokens) {
        Ok(tree) => tree,
        // Reported by the calculation itself.
        Err(_) if !args.tree && !args.infix => return Ok(()),
        Err(error) => return Err(error).context("could not build expression tree"),
    };
    if args.tree {
        print!("{}", tree);
    }
    if args.infix {
        println!("{}", tokens_to_string(&tree.to_infix()));
    }

    let unbound: Vec<String> = tree
        .variables()
        .into_iter()
        .filter(|name| !variables.contains_key(name))
        .collect();
    if !unbound.is_empty() {
        warn!("Unbound variables: {}", unbound.join(", "));
    }
    Ok(())
}
