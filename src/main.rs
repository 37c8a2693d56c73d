use clap::Parser;
use combi_calc::core::{ConfigProvider, Storage};
use combi_calc::utils::error::ErrorSeverity;
use combi_calc::utils::{logger, validation::Validate};
use combi_calc::{
    combination, count_functions, count_onto_functions, evaluate_detailed, factorial,
    permutation, stirling_second_kind, stirling_second_kind_f64, BatchArgs, BatchEngine,
    BatchPipeline, CalcError, CliConfig, Command, SplitStorage,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config.command) {
        tracing::error!(
            "{} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 3,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run(command: Command) -> Result<(), CalcError> {
    match command {
        Command::Eval { expression, steps } => {
            let expression = expression.join(" ");
            let evaluation = evaluate_detailed(&expression)?;
            if steps {
                println!("{}", evaluation.steps());
            }
            println!("{}", evaluation.result);
        }
        Command::Fact { n } => println!("{}", factorial(n)?),
        Command::Comb { n, r } => println!("{}", combination(n, r)?),
        Command::Perm { n, r } => println!("{}", permutation(n, r)?),
        Command::Stirling { m, n, float } => {
            if float {
                println!("{}", stirling_second_kind_f64(m, n));
            } else {
                println!("{}", stirling_second_kind(m, n)?);
            }
        }
        Command::Onto { m, n } => {
            let onto = count_onto_functions(m, n)?;
            println!("{}", onto);
            match count_functions(m, n) {
                Ok(total) => tracing::info!("{} of {} functions from {} to {} are onto", onto, total, m, n),
                Err(e) => tracing::debug!("total function count unavailable: {}", e),
            }
        }
        Command::Batch(args) => run_batch(&args)?,
    }
    Ok(())
}

fn run_batch(args: &BatchArgs) -> Result<(), CalcError> {
    let config = args.resolve()?;
    config.validate()?;
    tracing::info!(
        "Batch '{}': {} -> {} ({})",
        config.batch.name,
        config.input.path,
        config.output.path,
        config.output.formats.join(", ")
    );

    let storage = SplitStorage::new(config.output_path());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        let content = storage.read_to_string(config.input_path())?;
        for line in combi_calc::core::pipeline::parse_input(&content) {
            println!("{:>4}: {}", line.line, line.text);
        }
        return Ok(());
    }

    let pipeline = BatchPipeline::new(storage.clone(), config);
    let summary = BatchEngine::new(pipeline).run()?;
    println!(
        "✅ Evaluated {} expressions ({} failed)",
        summary.evaluated, summary.failed
    );
    for output in &summary.outputs {
        println!("📁 {}", storage.output_path(output).display());
    }
    Ok(())
}
