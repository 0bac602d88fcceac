// Knights and knaves puzzle solver
//
// Reads `###`-separated puzzle corpora, translates each claim into clauses and
// enumerates every consistent knight/knave assignment.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::warn;

use knaves_rs::corpus::{parse_puzzle, split_corpus, template_log};
use knaves_rs::instance::{Claim, PuzzleInstance, Registry};
use knaves_rs::solver::{Options, Solver};
use knaves_rs::translator::catalog::{patterns, CATALOG_VERSION};
use knaves_rs::translator::Translator;
use knaves_rs::{KnavesError, Result};

#[derive(Parser, Debug)]
#[command(name = "knaves")]
#[command(about = "Knights and knaves puzzle solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve every puzzle in a corpus and print its models
    Solve {
        /// Corpus file with puzzles separated by ###
        file: PathBuf,

        /// Only solve this puzzle (1-based)
        #[arg(short, long)]
        puzzle: Option<usize>,

        /// Stop after this many models per puzzle
        #[arg(long)]
        max_models: Option<usize>,

        /// Give up on a puzzle after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// List the ids of puzzles with no or with several solutions
    List {
        /// Which puzzles to list
        which: Listing,

        /// Corpus file with puzzles separated by ###
        file: PathBuf,
    },

    /// Print the catalog shapes, or the templates seen in a corpus
    Templates {
        /// Corpus file; without it the catalog is printed
        file: Option<PathBuf>,
    },

    /// Show how a single claim is translated
    Claim {
        /// Who makes the claim
        #[arg(short, long)]
        speaker: String,

        /// Comma-separated names of everyone in the puzzle
        #[arg(short, long, value_delimiter = ',')]
        names: Vec<String>,

        /// Corpus file; reports whether its puzzles use the claim's template
        #[arg(short, long)]
        corpus: Option<PathBuf>,

        /// The claim text, e.g. "Bob is a knave"
        text: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Listing {
    /// Puzzles whose claims are inconsistent
    NoSolutions,
    /// Puzzles with more than one model
    MultipleSolutions,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve {
            file,
            puzzle,
            max_models,
            timeout_ms,
        } => solve_cmd(&file, puzzle, Options { max_models, timeout_ms }),
        Command::List { which, file } => list_cmd(&file, which),
        Command::Templates { file } => templates_cmd(file.as_deref()),
        Command::Claim {
            speaker,
            names,
            corpus,
            text,
        } => claim_cmd(&speaker, &names, corpus.as_deref(), &text),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_corpus(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| KnavesError::InvalidArgument(format!("cannot read {}: {}", path.display(), e)))
}

fn load(text: &str) -> Result<PuzzleInstance> {
    parse_puzzle(text)?.translate()
}

fn solve_cmd(path: &Path, only: Option<usize>, options: Options) -> Result<()> {
    let corpus = read_corpus(path)?;
    let puzzles = split_corpus(&corpus);
    if let Some(id) = only {
        if id == 0 || id > puzzles.len() {
            return Err(KnavesError::InvalidArgument(format!(
                "puzzle {} out of range 1..={}",
                id,
                puzzles.len()
            )));
        }
    }

    let solver = Solver::new(options);
    let mut failed = 0;
    for (i, text) in puzzles.iter().enumerate() {
        let id = i + 1;
        if only.is_some_and(|only| only != id) {
            continue;
        }

        println!("Puzzle {}", id);
        let solution = load(text).and_then(|puzzle| Ok((solver.solve(&puzzle)?, puzzle)));
        match solution {
            Ok((solution, puzzle)) if solution.is_sat() => {
                for model in solution.models() {
                    println!("[{}]", puzzle.render(model).join(", "));
                }
            }
            Ok(_) => println!("No solutions"),
            Err(e) => {
                failed += 1;
                println!("Error: {}", e);
            }
        }
        println!();
    }

    if failed > 0 {
        warn!("{} puzzle(s) could not be solved", failed);
    }
    Ok(())
}

fn list_cmd(path: &Path, which: Listing) -> Result<()> {
    let corpus = read_corpus(path)?;
    let solver = Solver::new(Options::default());

    let mut ids = Vec::new();
    for (i, text) in split_corpus(&corpus).iter().enumerate() {
        let count = match load(text).and_then(|p| solver.models(&p)?.take(2).collect::<Result<Vec<_>>>()) {
            Ok(models) => models.len(),
            Err(e) => {
                warn!("skipping puzzle {}: {}", i + 1, e);
                continue;
            }
        };
        let listed = match which {
            Listing::NoSolutions => count == 0,
            Listing::MultipleSolutions => count > 1,
        };
        if listed {
            ids.push((i + 1).to_string());
        }
    }

    if ids.is_empty() {
        println!("None");
    } else {
        println!("{}", ids.join(", "));
    }
    Ok(())
}

fn templates_cmd(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        println!("Catalog version {}", CATALOG_VERSION);
        for pattern in patterns() {
            println!("{:<20} {}", pattern.id(), pattern.shape());
        }
        return Ok(());
    };

    let log = template_log(&read_corpus(path)?);
    for template in log.iter() {
        println!("{}", template);
    }
    Ok(())
}

fn claim_cmd(speaker: &str, names: &[String], corpus: Option<&Path>, text: &str) -> Result<()> {
    let mut registry = Registry::from_names(names)?;
    registry.register(speaker)?;

    let translation = Translator::new(&registry).translate(&Claim::new(speaker, text))?;
    let participants: Vec<String> = translation
        .participants()
        .iter()
        .map(ToString::to_string)
        .collect();

    println!("template:     {}", translation.template());
    println!(
        "pattern:      {} ({:?})",
        translation.pattern().id(),
        translation.pattern().family()
    );
    println!("participants: {}", participants.join(", "));
    println!(
        "formula:      {} ⟺ {}",
        speaker,
        translation.formula().display(&registry)
    );
    println!("clauses:      {:?}", translation.clauses().to_dimacs());
    if let Some(path) = corpus {
        let known = template_log(&read_corpus(path)?).contains(translation.template());
        println!("in corpus:    {}", if known { "yes" } else { "no" });
    }
    Ok(())
}
