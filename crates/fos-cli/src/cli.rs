use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fos",
    about = "Inspect and edit function object state files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML state configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List published results and their types
    Results(ResultsArgs),
    /// Print the type of one result
    Type(TypeArgs),
    /// Print a stored property or result
    Get(GetArgs),
    /// Write a property or result
    Set(SetArgs),
    /// List objects that have published results
    Objects(ObjectsArgs),
}

#[derive(Args)]
pub struct ResultsArgs {
    pub file: PathBuf,
    #[arg(short, long)]
    pub object: Option<String>,
}

#[derive(Args)]
pub struct TypeArgs {
    pub file: PathBuf,
    pub entry: String,
    #[arg(short, long)]
    pub object: Option<String>,
}

#[derive(Args)]
pub struct GetArgs {
    pub file: PathBuf,
    pub entry: String,
    #[arg(short, long)]
    pub object: Option<String>,
    /// Read from the results region
    #[arg(short, long)]
    pub result: bool,
}

#[derive(Args)]
pub struct SetArgs {
    pub file: PathBuf,
    pub entry: String,
    /// Tagged JSON value, e.g. '{"scalar": 0.31}'
    pub value: String,
    #[arg(short, long)]
    pub object: Option<String>,
    /// Write into the results region
    #[arg(short, long)]
    pub result: bool,
}

#[derive(Args)]
pub struct ObjectsArgs {
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_results() {
        let cli = Cli::try_parse_from(["fos", "results", "state.json"]).unwrap();
        if let Command::Results(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("state.json"));
            assert!(args.object.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_results_for_object() {
        let cli = Cli::try_parse_from(["fos", "results", "f", "-o", "forces1"]).unwrap();
        if let Command::Results(args) = cli.command {
            assert_eq!(args.object, Some("forces1".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_type() {
        let cli = Cli::try_parse_from(["fos", "type", "f", "Cd", "--object", "forces1"]).unwrap();
        if let Command::Type(args) = cli.command {
            assert_eq!(args.entry, "Cd");
            assert_eq!(args.object, Some("forces1".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_get_result() {
        let cli = Cli::try_parse_from(["fos", "get", "f", "Cd", "--result"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert!(args.result);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_set() {
        let cli = Cli::try_parse_from(["fos", "set", "f", "n", r#"{"label":3}"#]).unwrap();
        if let Command::Set(args) = cli.command {
            assert_eq!(args.value, r#"{"label":3}"#);
            assert!(!args.result);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["fos", "objects", "f", "-v", "--format", "json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn set_requires_value() {
        assert!(Cli::try_parse_from(["fos", "set", "f", "n"]).is_err());
    }
}
