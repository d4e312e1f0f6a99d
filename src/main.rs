//! Numeracy Forge - Inspector
//!
//! Builds one structure from the command line and prints it, with its
//! gaps and distractors, as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use numeracy_forge::batch::synthesize_batch;
use numeracy_forge::core::error::Result;
use numeracy_forge::core::rng::seeded;
use numeracy_forge::core::{config, set_config, ForgeConfig};
use numeracy_forge::distractor::{distractors_for, Distractor, DistractorContext};
use numeracy_forge::division::{
    divide_with_remainder, interpret_remainder, DivisionResult, RemainderAnswer, RemainderContext,
};
use numeracy_forge::expression::{
    evaluation_steps, synthesize_with, BracketPattern, Expression, Step, SynthesisRequest,
};
use numeracy_forge::grid::{select_gaps, BoxMethodWorkflow, GapSet};
use numeracy_forge::place_value::{decompose, expanded_form, Decomposition};

/// Numeracy Forge - inspect generated arithmetic structures
#[derive(Parser, Debug)]
#[command(name = "numeracy-forge")]
#[command(about = "Build grids, expressions and divisions and print them as JSON")]
struct Args {
    /// Random seed for deterministic output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// TOML file overriding the default generation config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of distractors to generate
    #[arg(long, global = true, default_value_t = 3)]
    distractors: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place value parts of a number
    Decompose { n: u64 },

    /// Box method grid for A × B
    Grid {
        a: u64,
        b: u64,

        /// Cells to hide
        #[arg(long, default_value_t = 2)]
        gaps: usize,
    },

    /// Synthesize (or parse) an arithmetic expression
    Expr {
        /// Number of operators
        #[arg(long, default_value_t = 2)]
        operators: usize,

        #[arg(long)]
        brackets: bool,

        #[arg(long)]
        division: bool,

        /// Largest acceptable result
        #[arg(long)]
        max: Option<i64>,

        /// Parse this formula instead of synthesizing one
        #[arg(long)]
        formula: Option<String>,
    },

    /// Division with remainder
    Divide {
        dividend: u64,
        divisor: u64,

        /// How the remainder is interpreted
        #[arg(long, value_enum, default_value = "exact")]
        remainder: RemainderArg,
    },

    /// Many expressions at once, in parallel
    Batch {
        #[arg(long, default_value_t = 10)]
        count: u64,

        #[arg(long, default_value_t = 2)]
        operators: usize,

        #[arg(long)]
        brackets: bool,

        #[arg(long)]
        division: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RemainderArg {
    Up,
    Down,
    Ignore,
    Fraction,
    Exact,
}

impl From<RemainderArg> for RemainderContext {
    fn from(arg: RemainderArg) -> Self {
        match arg {
            RemainderArg::Up => RemainderContext::RoundUp,
            RemainderArg::Down => RemainderContext::RoundDown,
            RemainderArg::Ignore => RemainderContext::Ignore,
            RemainderArg::Fraction => RemainderContext::AsFraction,
            RemainderArg::Exact => RemainderContext::ExactRemainder,
        }
    }
}

#[derive(Serialize)]
struct DecomposeReport {
    decomposition: Decomposition,
    expanded_form: String,
    distractors: Vec<Distractor>,
}

#[derive(Serialize)]
struct GridReport {
    workflow: BoxMethodWorkflow,
    gaps: GapSet,
    distractors: Vec<Distractor>,
}

#[derive(Serialize)]
struct ExprReport {
    expression: Expression,
    steps: Vec<Step>,
    distractors: Vec<Distractor>,
}

#[derive(Serialize)]
struct DivideReport {
    division: DivisionResult,
    interpreted: RemainderAnswer,
    distractors: Vec<Distractor>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "numeracy_forge=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let loaded = ForgeConfig::load(path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("config already initialised, ignoring {}", path.display());
        }
    }

    let seed = args
        .seed
        .or(config().seed)
        .unwrap_or_else(rand::random);
    tracing::info!(seed, "numeracy-forge starting");
    let mut rng = seeded(seed);

    let json = match args.command {
        Command::Decompose { n } => {
            let context = DistractorContext::Decomposition(n);
            let decomposition = decompose(n);
            let distractors = distractors_for(&context, args.distractors, &mut rng);
            serde_json::to_string_pretty(&DecomposeReport {
                expanded_form: expanded_form(n),
                decomposition,
                distractors,
            })?
        }

        Command::Grid { a, b, gaps } => {
            let workflow = BoxMethodWorkflow::new(a, b)?;
            let gaps = select_gaps(&workflow.grid, gaps, &mut rng);
            let context = DistractorContext::Product(&workflow.grid);
            let distractors = distractors_for(&context, args.distractors, &mut rng);
            serde_json::to_string_pretty(&GridReport {
                workflow,
                gaps,
                distractors,
            })?
        }

        Command::Expr {
            operators,
            brackets,
            division,
            max,
            formula,
        } => {
            let expression = match formula {
                Some(formula) => Expression::parse(&formula)?,
                None => {
                    let mut request = SynthesisRequest::new(operators)
                        .with_brackets(brackets)
                        .with_division(division);
                    if let Some(max) = max {
                        request = request.with_max_magnitude(max);
                    }
                    synthesize_with(&request, &mut rng)?
                }
            };
            if expression.pattern == BracketPattern::Irregular {
                tracing::debug!(formula = %expression.formula, "irregular bracket layout");
            }
            let steps = evaluation_steps(&expression.tree)?;
            let context = DistractorContext::Expression(&expression.tree);
            let distractors = distractors_for(&context, args.distractors, &mut rng);
            serde_json::to_string_pretty(&ExprReport {
                expression,
                steps,
                distractors,
            })?
        }

        Command::Divide {
            dividend,
            divisor,
            remainder,
        } => {
            let division = divide_with_remainder(dividend, divisor)?;
            let context = DistractorContext::Division(division);
            let distractors = distractors_for(&context, args.distractors, &mut rng);
            serde_json::to_string_pretty(&DivideReport {
                division,
                interpreted: interpret_remainder(&division, remainder.into()),
                distractors,
            })?
        }

        Command::Batch {
            count,
            operators,
            brackets,
            division,
        } => {
            let request = SynthesisRequest::new(operators)
                .with_brackets(brackets)
                .with_division(division);
            let outcomes: Vec<_> = synthesize_batch(seed, count, &request)
                .iter()
                .map(|item| item.to_outcome())
                .collect();
            serde_json::to_string_pretty(&outcomes)?
        }
    };

    println!("{}", json);
    Ok(())
}
