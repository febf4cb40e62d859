use std::{env, path::PathBuf, process};

use cashflow_core::{config, engine::ForecastEngine, init, report};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    let Some(plan) = config::load_plan(&config_path)? else {
        return Ok(());
    };

    let outfile = plan.outfile.clone();
    let mut engine = ForecastEngine::new(plan.opening_balance, plan.window, plan.items);
    let rows = engine.run()?;
    report::write_ledger_file(&outfile, &rows)?;
    println!("wrote: {}", outfile.display());

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: cashflow_cli <plan.yaml>");
}
