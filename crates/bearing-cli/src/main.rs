//! Generate a roller bearing against the in-memory host and print a JSON report.
//!
//! Usage: `bearing-gen [CONFIG.json] [--out REPORT.json] [--four-edges]`

use std::path::PathBuf;
use std::process::ExitCode;

use bearing_engine::{run, BearingConfig, ConfigError, GenerateError};
use bearing_ops::OuterBoundary;
use host_kernel::MemoryHost;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}\nusage: bearing-gen [CONFIG.json] [--out REPORT.json] [--four-edges]")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    four_edges: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--four-edges" => parsed.four_edges = true,
            "--out" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--out needs a path".to_string()))?;
                parsed.out = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown flag {flag}")));
            }
            path if parsed.config.is_none() => parsed.config = Some(PathBuf::from(path)),
            extra => return Err(CliError::Usage(format!("unexpected argument {extra}"))),
        }
    }
    Ok(parsed)
}

fn execute(args: Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => BearingConfig::load(path)?,
        None => BearingConfig::default(),
    };
    if args.four_edges {
        config.outer_boundary = OuterBoundary::FourEdges;
    }

    let mut host = MemoryHost::new();
    let output = run(&config, &mut host)?;
    let report = serde_json::to_string_pretty(&output)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, report).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{report}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bearing_engine=info,bearing_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match parse_args(std::env::args().skip(1)).and_then(execute) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, CliError> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_use_defaults() {
        let parsed = args(&[]).unwrap();
        assert!(parsed.config.is_none());
        assert!(parsed.out.is_none());
        assert!(!parsed.four_edges);
    }

    #[test]
    fn config_out_and_style() {
        let parsed = args(&["bearing.json", "--out", "report.json", "--four-edges"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("bearing.json")));
        assert_eq!(parsed.out, Some(PathBuf::from("report.json")));
        assert!(parsed.four_edges);
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        assert!(matches!(args(&["--out"]), Err(CliError::Usage(_))));
        assert!(matches!(args(&["--verbose"]), Err(CliError::Usage(_))));
        assert!(matches!(args(&["a.json", "b.json"]), Err(CliError::Usage(_))));
    }

    #[test]
    fn invalid_config_fails_without_output() {
        let dir = std::env::temp_dir().join(format!("bearing-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("bad.json");
        std::fs::write(&config, r#"{ "params": { "hole_radius": 0.6 } }"#).unwrap();
        let out = dir.join("report.json");

        let err = execute(Args {
            config: Some(config),
            out: Some(out.clone()),
            four_edges: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Generate(ref e) if e.is_validation()));
        assert!(!out.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
