// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! cspgen CLI - inject strict CSPs into built HTML pages

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::slice::Iter;

use anyhow::{bail, Context};
use cspgen::{
    generate_policy, parse_document, BatchInjector, CspOptions, OutputMode, Resource,
    ResourceWalker,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cspgen=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "inject" => inject(&args[2..]).await,
        "policy" => policy(&args[2..]),
        "resources" => resources(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("cspgen {}", cspgen::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"cspgen - Strict Content-Security-Policy injection for static pages

USAGE:
    cspgen <COMMAND> [OPTIONS] <FILE>...

COMMANDS:
    inject <file>...    Inject a CSP <meta> tag (stdout, or --in-place)
    policy <file>       Print the policy generated for a page
    resources <file>    Print the resources found in a page as JSON
    help                Show this help message
    version             Show version information

OPTIONS:
    -i, --in-place          Rewrite the input files
    --style-src <TOKEN>     Extra style-src source (repeatable)
    --script-src <TOKEN>    Extra script-src source (repeatable)
    --no-extract-styles     Do not derive style-src from the page
    --config <FILE>         JSON options: scriptSrc, styleSrc, extractStyles

EXAMPLES:
    cspgen inject _site/index.html
    cspgen inject --in-place _site/**/*.html
    cspgen inject -i --no-extract-styles --style-src "'unsafe-inline'" _site/dev.html
    cspgen policy _site/index.html

Set RUST_LOG=cspgen=debug for per-page details.
"#
    );
}

/// Parsed command line for the file-processing commands
#[derive(Debug)]
struct CliArgs {
    files: Vec<PathBuf>,
    in_place: bool,
    options: CspOptions,
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut files = Vec::new();
    let mut in_place = false;
    let mut config = None;
    let mut script_src = Vec::new();
    let mut style_src = Vec::new();
    let mut no_extract_styles = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-i" | "--in-place" => in_place = true,
            "--no-extract-styles" => no_extract_styles = true,
            "--style-src" => style_src.push(option_value(&mut iter, arg)?),
            "--script-src" => script_src.push(option_value(&mut iter, arg)?),
            "--config" => config = Some(PathBuf::from(option_value(&mut iter, arg)?)),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            file => files.push(PathBuf::from(file)),
        }
    }

    let mut options = match config {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            CspOptions::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CspOptions::default(),
    };
    options.script_src.extend(script_src);
    options.style_src.extend(style_src);
    if no_extract_styles {
        options.extract_styles = false;
    }

    Ok(CliArgs {
        files,
        in_place,
        options,
    })
}

fn option_value(iter: &mut Iter<'_, String>, flag: &str) -> anyhow::Result<String> {
    match iter.next() {
        Some(value) => Ok(value.clone()),
        None => bail!("Missing value for {}", flag),
    }
}

fn single_file(cli: &CliArgs) -> anyhow::Result<&PathBuf> {
    match cli.files.as_slice() {
        [file] => Ok(file),
        [] => bail!("No input file given"),
        _ => bail!("Expected exactly one input file"),
    }
}

async fn inject(args: &[String]) -> anyhow::Result<ExitCode> {
    let cli = parse_args(args)?;

    if cli.files.is_empty() {
        bail!("No input files given");
    }
    if !cli.in_place && cli.files.len() > 1 {
        bail!("Multiple input files require --in-place");
    }

    let mode = if cli.in_place {
        OutputMode::InPlace
    } else {
        OutputMode::Collect
    };

    let reports = BatchInjector::new(cli.options).mode(mode).run(cli.files).await;

    let mut failed = 0;
    for report in reports {
        match report.result {
            Ok(Some(html)) => print!("{}", html),
            Ok(None) => println!("✓ {}", report.path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("✗ {}", e);
            }
        }
    }

    if failed > 0 {
        eprintln!("{} file(s) failed", failed);
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn policy(args: &[String]) -> anyhow::Result<ExitCode> {
    let cli = parse_args(args)?;
    let path = single_file(&cli)?;

    let html = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let policy = generate_policy(&html, &cli.options)?;

    println!("{}", policy);
    Ok(ExitCode::SUCCESS)
}

fn resources(args: &[String]) -> anyhow::Result<ExitCode> {
    let cli = parse_args(args)?;
    let path = single_file(&cli)?;

    let html = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document = parse_document(&html)?;
    let found: Vec<Resource> = ResourceWalker::new(&document).collect();

    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = parse_args(&args(&["index.html"])).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("index.html")]);
        assert!(!cli.in_place);
        assert_eq!(cli.options, CspOptions::default());
    }

    #[test]
    fn test_parse_options() {
        let cli = parse_args(&args(&[
            "-i",
            "a.html",
            "--style-src",
            "'unsafe-inline'",
            "--script-src",
            "https:",
            "--no-extract-styles",
            "b.html",
        ]))
        .unwrap();

        assert!(cli.in_place);
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.options.style_src, vec!["'unsafe-inline'"]);
        assert_eq!(cli.options.script_src, vec!["https:"]);
        assert!(!cli.options.extract_styles);
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("csp.json");
        fs::write(&config, r#"{"styleSrc": ["ws://localhost:8080"]}"#).unwrap();

        let cli = parse_args(&args(&[
            "--config",
            config.to_str().unwrap(),
            "--style-src",
            "'unsafe-inline'",
            "page.html",
        ]))
        .unwrap();

        assert_eq!(
            cli.options.style_src,
            vec!["ws://localhost:8080", "'unsafe-inline'"]
        );
        assert!(cli.options.extract_styles);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--style-src"])).is_err());
        assert!(parse_args(&args(&["--bogus", "a.html"])).is_err());
        assert!(parse_args(&args(&["--config", "/does/not/exist.json"])).is_err());
    }

    #[test]
    fn test_single_file() {
        let cli = parse_args(&args(&["a.html", "b.html"])).unwrap();
        assert!(single_file(&cli).is_err());

        let cli = parse_args(&args(&[])).unwrap();
        assert!(single_file(&cli).is_err());
    }
}
