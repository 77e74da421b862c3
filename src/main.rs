// main.rs - CLI entry point

use dbcompare::cli::args::{CompareCommand, VisualizeCommand};
use dbcompare::cli::{Command, Config};
use dbcompare::prelude::*;
use dbcompare::tools::{DependencyRegistry, ExternalTool};
use std::str::FromStr;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if matches!(args.command, Command::GenerateConfig(_)) {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validated = validate_args(&args)?;

    println!("🧬 {}", dbcompare::get_info());
    println!(
        "🕒 Started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("📁 Root: {}", validated.layout.root.display());

    let start = Instant::now();
    let result = match &args.command {
        Command::Init(_) => run_init(&validated),
        Command::Check(_) => run_check(&validated),
        Command::Clean(_) => run_clean(&validated),
        Command::Makedb(_) => run_makedb(&validated),
        Command::Compare(cmd) => run_compare(&validated, cmd),
        Command::Visualize(cmd) => run_visualize(&validated, cmd),
        Command::GenerateConfig(_) => Ok(()),
    };

    println!(
        "⏱️  Total execution time: {:.2}s",
        start.elapsed().as_secs_f64()
    );
    result
}

fn run_init(v: &ValidationResult) -> Result<(), String> {
    v.layout.create_all()?;
    println!("\n✅ Folders have been created or already exist.\n");
    println!("📋 Instructions:");
    println!(
        "1. Paste the sequence files downloaded from databases (filename: e.g., APD) into {}",
        v.layout.sequences.display()
    );
    println!(
        "2. Place the visualisation script (visualize_rstudio.R) into {}",
        v.layout.functions.display()
    );
    Ok(())
}

fn run_check(v: &ValidationResult) -> Result<(), String> {
    println!("\n🔍 Checking dependencies...\n");
    let registry = DependencyRegistry::standard(&v.diamond, &v.rscript);

    let mut missing = 0;
    for (name, check) in registry.check_all() {
        if check.available {
            println!("  ✅ {} is installed ({})", name, check.diagnostic);
        } else {
            println!("  ❌ {} is not installed: {}", name, check.diagnostic);
            missing += 1;
        }
    }

    if missing > 0 {
        return Err(format!(
            "{} of {} dependencies are missing. Some features may not work.",
            missing,
            registry.len()
        ));
    }
    println!("\n✅ All dependencies are available");
    Ok(())
}

fn run_clean(v: &ValidationResult) -> Result<(), String> {
    let report = clean_databases(&v.layout, &v.filter)?;

    println!(
        "\n✅ Cleaning completed: {} databases written to {}",
        report.rows.len(),
        v.layout.cleaned.display()
    );
    println!(
        "📊 Cleaning statistics appended to {} (needed by the analysis stage, do not move it)",
        v.layout.ledger_path().display()
    );

    if !report.failures.is_empty() {
        for (path, e) in &report.failures {
            eprintln!("  ❌ {}: {}", path.display(), e);
        }
        return Err(format!("{} files could not be cleaned", report.failures.len()));
    }
    Ok(())
}

fn run_makedb(v: &ValidationResult) -> Result<(), String> {
    let check = v.diamond.check();
    if !check.available {
        return Err(format!("diamond is not available: {}", check.diagnostic));
    }

    let report = build_indices(&v.layout, &v.filter, &v.diamond)?;
    println!(
        "\n✅ DMND files creation completed: {} databases in {}",
        report.built.len(),
        v.layout.indices.display()
    );

    if !report.failures.is_empty() {
        return Err(format!(
            "{} DMND databases could not be created",
            report.failures.len()
        ));
    }
    Ok(())
}

fn run_compare(v: &ValidationResult, cmd: &CompareCommand) -> Result<(), String> {
    let selector = ReferenceSelector::from_str(&cmd.reference)?;
    println!(
        "⚙️  diamond blastp: {} threads, {} mode",
        v.diamond.threads,
        v.diamond.sensitivity.name()
    );

    let report = compare_databases(&v.layout, &selector, &v.filter, &v.diamond)?;

    println!("\n🎉 === DIAMOND COMPARISON COMPLETED ===");
    println!(
        "📊 Jobs: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    println!("📁 Results written to: {}", v.layout.results.display());

    if report.failed() > 0 {
        for (job, e) in report.failures() {
            eprintln!("  ❌ {} vs {}: {}", job.reference, job.query, e);
        }
        return Err(format!("{} comparison jobs failed", report.failed()));
    }
    Ok(())
}

fn run_visualize(v: &ValidationResult, cmd: &VisualizeCommand) -> Result<(), String> {
    let target = ReferenceSelector::from_str(&cmd.reference)?;
    let axis = AxisLimit::from_str(&cmd.max_length)?;
    let runner = ScriptRunner::for_script(&v.script, &v.rscript, &v.python)?;

    let stdout = visualize_results(&v.layout, &target, axis, &runner)?;
    if !stdout.trim().is_empty() {
        println!("\n{}", stdout.trim_end());
    }
    println!("\n✅ Script executed successfully");
    Ok(())
}
