use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use libdhmm::demo;
use libdhmm::structs::{Model, Observations};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("expected an emission index, found: {symbol}")]
pub struct IndexParseError {
    symbol: String,
}

#[derive(Subcommand)]
pub enum SubCommands {
    #[command(about = "Print the model parameters")]
    Show(ShowArgs),
    #[command(about = "Print the forward (alpha) matrix of an observation sequence")]
    Forward(QueryArgs),
    #[command(about = "Print the backward (beta) matrix and beta-zero vector of an observation sequence")]
    Backward(QueryArgs),
    #[command(about = "Print the posterior state probabilities of an observation sequence")]
    Posterior(QueryArgs),
    #[command(about = "Print the most probable state path of an observation sequence")]
    Viterbi(QueryArgs),
    #[command(about = "Draw a random state path and observation sequence from the model")]
    Sample(SampleArgs),
}

#[derive(Parser)]
#[command(name = "dhmm")]
#[command(about = "Forward-backward and Viterbi decoding with discrete hidden Markov models")]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DemoModel {
    Ncsa,
    Gene,
    Rochester,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ModelArgs {
    /// A JSON model file
    #[arg(short = 'm', long = "model", value_name = "MODEL.json")]
    pub model_path: Option<PathBuf>,

    /// Use one of the bundled models
    #[arg(short = 'd', long = "demo", value_enum)]
    pub demo: Option<DemoModel>,
}

impl ModelArgs {
    pub fn load(&self) -> anyhow::Result<Model> {
        match (&self.model_path, self.demo) {
            (Some(path), _) => Model::from_json_path(path),
            (None, Some(DemoModel::Ncsa)) => demo::ncsa(),
            (None, Some(DemoModel::Gene)) => demo::gene(),
            (None, Some(DemoModel::Rochester)) => demo::rochester(),
            (None, None) => Err(anyhow!("either --model or --demo is required")),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Print results as JSON instead of tables
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub model_args: ModelArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// The observed emission symbols
    #[arg(value_name = "SYMBOL", required = true, num_args = 1..)]
    pub symbols: Vec<String>,

    /// Read the symbols as 0-based emission indices instead of emission labels
    #[arg(short = 'i', long = "indices", default_value_t = false)]
    pub indices: bool,

    #[command(flatten)]
    pub model_args: ModelArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl QueryArgs {
    pub fn observations(&self) -> anyhow::Result<Observations> {
        if !self.indices {
            return Ok(Observations::Labels(self.symbols.clone()));
        }

        let indices = self
            .symbols
            .iter()
            .map(|symbol| {
                symbol.parse::<usize>().map_err(|_| IndexParseError {
                    symbol: symbol.clone(),
                })
            })
            .collect::<Result<Vec<usize>, IndexParseError>>()?;

        Ok(Observations::Indices(indices))
    }
}

#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    /// The number of observations to draw
    #[arg(short = 'n', long = "length", default_value_t = 10usize, value_name = "n")]
    pub length: usize,

    /// The random seed
    #[arg(short = 's', long = "seed", default_value_t = 0u64, value_name = "n")]
    pub seed: u64,

    #[command(flatten)]
    pub model_args: ModelArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["dhmm", "-vv", "posterior", "--demo", "gene", "A", "C"])?;
        assert_eq!(cli.verbose, 2);

        match cli.command {
            SubCommands::Posterior(args) => {
                assert!(matches!(args.model_args.demo, Some(DemoModel::Gene)));
                assert_eq!(
                    args.observations()?,
                    Observations::Labels(vec!["A".to_string(), "C".to_string()])
                );
            }
            _ => panic!("expected the posterior subcommand"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_indices() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["dhmm", "viterbi", "-d", "ncsa", "-i", "0", "1", "0"])?;
        match cli.command {
            SubCommands::Viterbi(args) => {
                assert_eq!(args.observations()?, Observations::Indices(vec![0, 1, 0]));
            }
            _ => panic!("expected the viterbi subcommand"),
        }
        Ok(())
    }

    #[test]
    fn test_bad_index() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["dhmm", "forward", "-d", "ncsa", "-i", "0", "x"])?;
        match cli.command {
            SubCommands::Forward(args) => {
                let err = args.observations().unwrap_err();
                assert!(err.downcast_ref::<IndexParseError>().is_some());
            }
            _ => panic!("expected the forward subcommand"),
        }
        Ok(())
    }

    #[test]
    fn test_model_source_is_required() {
        assert!(Cli::try_parse_from(["dhmm", "show"]).is_err());
        assert!(Cli::try_parse_from(["dhmm", "show", "-d", "gene", "-m", "model.json"]).is_err());
    }
}
