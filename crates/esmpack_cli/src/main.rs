mod args;
mod logging;
mod types;

use std::{process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::{InputArgs, ReportArgs};
use clap::Parser;

use esmpack::{Bundler, BundlerOptions, Module, ScanOutput};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  report: ReportArgs,
}

fn print_module_graph(output: &ScanOutput) {
  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  let width = output.module_table.iter().map(|module| module.stable_id().len()).max().unwrap_or(0);

  for module in &output.module_table {
    let kind = match module {
      Module::Normal(module) if module.is_user_defined_entry => "entry",
      Module::Normal(_) => "module",
      Module::External(_) => "external",
    };
    println!(
      "{}{:pad$} {}{}",
      color.paint(module.stable_id()),
      "",
      dim.paint(format!("{kind} │ format: ")),
      module.format(),
      pad = width - module.stable_id().len()
    );

    let records = module.import_records();
    for (i, record) in records.iter().enumerate() {
      let branch = if i + 1 == records.len() { "└─" } else { "├─" };
      println!(
        "  {} {} {} {} {}",
        dim.paint(branch),
        record.specifier,
        dim.paint(format!("({})", record.kind)),
        dim.paint("→"),
        output.module_table[record.resolved_module()].stable_id()
      );
    }
  }
}

fn resolve_one(bundler: &Bundler, specifier: &str) -> ExitCode {
  let cwd = bundler.resolver().cwd();
  let importer = bundler.options().input.first().map(|item| cwd.join(&item.import));

  match bundler.resolver().resolve_path(specifier, importer.as_deref()) {
    Ok(resolved) => {
      println!(
        "{} {}",
        Colour::Cyan.paint(resolved.location.as_str()),
        Colour::White.dimmed().paint(resolved.format.as_str())
      );
      ExitCode::SUCCESS
    }
    Err(err) => {
      println!("{} [{}] {}", Colour::Red.paint("Error:"), err.kind(), err);
      ExitCode::FAILURE
    }
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Commands::parse();
  logging::init(args.report.verbose, args.report.json);

  let InputArgs { cwd, input, platform, conditions } = args.input;
  let input = input.map(|files| files.iter().map(|p| p.to_string_lossy().into()).collect());
  let cwd = match cwd.map(std::fs::canonicalize).transpose() {
    Ok(cwd) => cwd,
    Err(err) => {
      println!("{} Invalid --cwd: {err}", Colour::Red.paint("Error:"));
      return ExitCode::FAILURE;
    }
  };

  let mut bundler = Bundler::new(BundlerOptions {
    input,
    cwd,
    platform: platform.map(Into::into),
    conditions,
  });

  if let Some(specifier) = &args.report.resolve {
    return resolve_one(&bundler, specifier);
  }

  let start = Instant::now();
  match bundler.scan().await {
    Ok(output) => {
      for warning in &output.warnings {
        println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
      }

      print_module_graph(&output);

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!(
        "\n{} Scanned {} modules in {}",
        Colour::Green.paint("✔"),
        output.module_table.len(),
        Colour::White.bold().paint(elapsed)
      );
      ExitCode::SUCCESS
    }
    Err(errors) => {
      for error in &*errors {
        println!("{} {:#}", Colour::Red.paint("Error:"), error);
      }
      ExitCode::FAILURE
    }
  }
}
