mod quote;
mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Exercise storefront checkout and variant resolution outside a browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a shipping quote for a region and show the resulting checkout summary.
    Quote {
        /// Region (state) as offered by the checkout form, e.g. "Lagos".
        region: String,
        /// Cart subtotal in naira.
        #[arg(long, default_value = "0")]
        subtotal: Decimal,
    },
    /// Resolve a variant from a product's embedded variants JSON.
    Resolve {
        /// File holding the variants array.
        #[arg(long)]
        variants: PathBuf,
        /// Option pick as `name=value`; repeat in click order.
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
        /// Report no match until every option has been picked.
        #[arg(long)]
        require_complete: bool,
    },
}

fn parse_selection(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(storefront_core::load_log_level()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Quote { region, subtotal } => {
            let config = storefront_core::load_config()?;
            tracing::debug!(?config, "configuration loaded");
            quote::run_quote(&config, &region, subtotal).await
        }
        Commands::Resolve {
            variants,
            selections,
            require_complete,
        } => resolve::run_resolve(&variants, &selections, require_complete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_pairs() {
        assert_eq!(
            parse_selection("color=black").unwrap(),
            ("color".to_string(), "black".to_string())
        );
        assert_eq!(
            parse_selection(" length = 18 ").unwrap(),
            ("length".to_string(), "18".to_string())
        );
    }

    #[test]
    fn empty_value_is_allowed_but_name_is_not() {
        assert_eq!(
            parse_selection("color=").unwrap(),
            ("color".to_string(), String::new())
        );
        assert!(parse_selection("=black").is_err());
        assert!(parse_selection("black").is_err());
    }

    #[test]
    fn cli_parses_quote_with_subtotal() {
        let cli = Cli::try_parse_from(["storefront-cli", "quote", "Lagos", "--subtotal", "10000.50"])
            .expect("should parse");
        match cli.command {
            Commands::Quote { region, subtotal } => {
                assert_eq!(region, "Lagos");
                assert_eq!(subtotal.to_string(), "10000.50");
            }
            Commands::Resolve { .. } => panic!("expected quote"),
        }
    }

    #[test]
    fn cli_parses_repeated_selections() {
        let cli = Cli::try_parse_from([
            "storefront-cli",
            "resolve",
            "--variants",
            "variants.json",
            "--select",
            "length=18",
            "--select",
            "color=black",
        ])
        .expect("should parse");
        match cli.command {
            Commands::Resolve {
                selections,
                require_complete,
                ..
            } => {
                assert_eq!(selections.len(), 2);
                assert_eq!(selections[1], ("color".to_string(), "black".to_string()));
                assert!(!require_complete);
            }
            Commands::Quote { .. } => panic!("expected resolve"),
        }
    }
}
