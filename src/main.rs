use std::path::PathBuf;
use std::process::ExitCode;

use bibtex_linter::{parse_file, DuplicatePolicy, Error, LintReport, Ruleset, Verifier};

use clap::Parser as CLIParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Verify a .bib file using the rules of a bibliography style.
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Path to the .bib file to verify
    #[clap(parse(from_os_str), required_unless_present = "list-rules")]
    filepath: Option<PathBuf>,

    /// Name of the ruleset to verify against (default, ieeetr or IEEEtran)
    #[clap(value_name = "RULESET")]
    ruleset: Option<String>,

    /// Same as the RULESET argument, useful together with --list-rules
    #[clap(
        short = 'r',
        long = "ruleset",
        value_name = "RULESET",
        env = "BIBTEX_LINTER_RULESET"
    )]
    ruleset_option: Option<String>,

    /// Verify only the entry with this ID
    #[clap(short, long)]
    query_id: Option<String>,

    /// Fail when a field occurs twice in one entry instead of keeping the last value
    #[clap(long)]
    deny_duplicates: bool,

    /// List the rules of the selected ruleset and exit
    #[clap(long)]
    list_rules: bool,

    /// Increase logging verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,

    /// Print the report as JSON
    #[cfg(feature = "serde_json")]
    #[clap(long)]
    json: bool,
}

impl Settings {
    /// The positional ruleset wins over `--ruleset` and the environment
    fn ruleset_name(&self) -> &str {
        self.ruleset
            .as_deref()
            .or(self.ruleset_option.as_deref())
            .unwrap_or("default")
    }
}

fn init_logging(verbose: usize) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_human_readable(report: &LintReport) {
    println!("{}", report);
}

#[cfg(feature = "serde_json")]
fn print_json(report: &LintReport) -> Result<(), Error> {
    let json = serde_json::to_string(report).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

/// Returns whether every verified entry passed
fn run(s: &Settings) -> Result<bool, Error> {
    let ruleset: Ruleset = s.ruleset_name().parse()?;
    let verifier = Verifier::new(ruleset.registry());
    info!(ruleset = %ruleset, rules = verifier.registry().len(), "using ruleset");

    if s.list_rules {
        for rule in verifier.registry().iter() {
            println!("{}\t{}", rule.name, rule.target);
        }
        return Ok(true);
    }

    let filepath = match &s.filepath {
        Some(filepath) => filepath,
        None => return Ok(true),
    };
    let policy = if s.deny_duplicates {
        DuplicatePolicy::Deny
    } else {
        DuplicatePolicy::LastWins
    };

    let mut entries = parse_file(filepath, policy)?;
    debug!(path = %filepath.display(), entries = entries.len(), "parsed file");
    if let Some(query) = &s.query_id {
        entries.retain(|entry| &entry.name == query);
    }

    let report = LintReport::collect(&entries, &verifier);
    #[cfg(feature = "serde_json")]
    {
        if s.json {
            print_json(&report)?;
            return Ok(report.is_clean());
        }
    }
    print_human_readable(&report);
    Ok(report.is_clean())
}

fn main() -> ExitCode {
    let settings = Settings::parse();
    init_logging(settings.verbose);

    match run(&settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}
