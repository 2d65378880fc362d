mod cli;

use billgrade::analyze::batch::{grade_batch, record_failures};
use billgrade::analyze::Grader;
use billgrade::config;
use billgrade::error::{GraderError, Result};
use billgrade::input;
use billgrade::report::{self, CriteriaReport, OutputFormat, Renderable};
use billgrade::store::json_file::DEFAULT_STORE_FILE;
use billgrade::store::{self as grade_store, GradeStore, JsonFileStore, StoreContext};
use billgrade::types::config::{GraderConfig, Methodology};
use billgrade::types::demographics::DemographicTable;
use billgrade::types::report::{GradedBill, StoredGrade};
use billgrade::types::scoring::Grade;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const ITEM_ERRORS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn load_grader_config(cli: &cli::Cli) -> Result<GraderConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&cli.config_root)?.unwrap_or_default(),
    };
    if let Some(methodology) = cli.methodology {
        cfg.grading.methodology = match methodology {
            cli::MethodologyArg::Original => Methodology::Original,
            cli::MethodologyArg::CensusBased => Methodology::CensusBased,
        };
    }
    if let Some(seed) = cli.seed {
        cfg.balancing.seed = Some(seed);
    }
    if cli.no_jitter {
        cfg.balancing.jitter = false;
    }
    Ok(cfg)
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let grader = Grader::new(&load_grader_config(&cli)?)?;
    let mut demographics = DemographicTable::builtin();
    if let Some(path) = &cli.demographics {
        demographics.merge(DemographicTable::load_json(path)?);
    }
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| cli.config_root.join(DEFAULT_STORE_FILE));
    let format = match cli.format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    };

    match cli.command {
        cli::Commands::Grade(cmd) => {
            let bill = input::load_bill(&cmd.path)?;
            let mut store = JsonFileStore::open(&store_path)?;
            let grade = grader.grade(&bill, &StoreContext::new(&store, &demographics))?;
            if cmd.save {
                store.upsert(StoredGrade::new(bill.clone(), grade.clone()))?;
            }
            let graded = GradedBill { bill, grade };
            println!("{}", report::render(Renderable::Grade(&graded), format)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Batch(cmd) => {
            let (bills, failures) = input::load_bills(&cmd.path)?;
            let mut store = JsonFileStore::open(&store_path)?;
            let mut batch = grade_batch(
                &grader,
                &bills,
                &StoreContext::new(&store, &demographics),
            );
            record_failures(&mut batch, failures);
            if cmd.save {
                for item in &batch.individual_grades {
                    store.upsert(StoredGrade::new(item.bill.clone(), item.grade.clone()))?;
                }
            }
            println!("{}", report::render(Renderable::Batch(&batch), format)?);
            if batch.errors.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::ITEM_ERRORS)
            }
        }
        cli::Commands::Stats(cmd) => {
            let store = JsonFileStore::open(&store_path)?;
            let stats = store.statistics(cmd.state.as_deref());
            println!("{}", report::render(Renderable::Statistics(&stats), format)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Override(cmd) => {
            let mut store = JsonFileStore::open(&store_path)?;
            if cmd.clear {
                store.clear_override(&cmd.bill_id)?;
                println!("override cleared: {}", cmd.bill_id);
                return Ok(exit_code::SUCCESS);
            }
            let (Some(grade), Some(score)) = (cmd.grade.as_deref(), cmd.score) else {
                return Err(GraderError::InvalidGrade(
                    "--grade and --score must be given together".to_string(),
                ));
            };
            let grade: Grade = grade.parse()?;
            let record = store
                .get(&cmd.bill_id)
                .ok_or_else(|| GraderError::BillNotFound(cmd.bill_id.clone()))?;
            let manual = grade_store::manual_override(&record, score, grade, &cmd.actor)?;
            store.set_override(&cmd.bill_id, manual)?;
            println!(
                "override set: {} -> {:.1} ({}) was {:.1} ({})",
                cmd.bill_id, score, grade, record.result.score, record.result.grade
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Regrade => {
            let mut store = JsonFileStore::open(&store_path)?;
            let summary = grade_store::regrade(&mut store, &grader, &demographics)?;
            println!("{}", report::render(Renderable::Regrade(&summary), format)?);
            if summary.errors.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::ITEM_ERRORS)
            }
        }
        cli::Commands::Criteria => {
            let criteria = CriteriaReport {
                methodology: grader.methodology(),
                weights: grader.weights().to_map(),
                criteria: grader.criteria().clone(),
            };
            println!("{}", report::render(Renderable::Criteria(&criteria), format)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
