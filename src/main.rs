use anyhow::Context as _;
use mvnwatch::engine::{BlockDispatcher, EventBroadcaster, PathNormalizer, RuleRegistry};
use mvnwatch::rules::maven;
use mvnwatch::{Config, Job, Palette, Rule, logging, maven as mvn, watch::ProjectWatcher};
use std::cell::Cell;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::rc::Rc;

fn main() {
    logging::init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("mvnwatch: error: {err:#}");
        std::process::exit(1);
    }
}

struct CliConfig {
    job: Job,
    color: bool,
    once: bool,
}

fn run(cli: CliConfig) -> anyhow::Result<()> {
    let config = Config::load()?;
    // Surface a broken rule table before watching anything.
    let rules = maven::rules()?;

    if cli.once {
        return build(&cli.job, &config, &rules, cli.color);
    }

    let project_dir = cli.job.project_dir();
    let watcher = ProjectWatcher::new(&project_dir, config.debounce_ms)?;
    log::info!("goals: {}", cli.job.goals.join(" "));

    while let Some(event) = watcher.recv() {
        log::info!("change detected: {}", event.path.display());
        if let Err(err) = build(&cli.job, &config, &rules, cli.color) {
            log::error!("build did not run: {err:#}");
        }
        // Collapse triggers that queued up while the build was running, so a
        // burst of saves yields at most one follow-up build.
        while watcher.try_recv().is_some() {}
    }

    Ok(())
}

/// One build invocation: fresh registry, fresh dispatcher, fresh listeners.
fn build(job: &Job, config: &Config, rules: &[Rule], color: bool) -> anyhow::Result<()> {
    let registry = RuleRegistry::new(rules.to_vec());

    let mut broadcaster = EventBroadcaster::new();
    let failed_tests = Rc::new(Cell::new(false));
    if let Some(results_rule) = registry.find(|rule| matches!(rule, Rule::MultiLine { .. })) {
        let flag = Rc::clone(&failed_tests);
        broadcaster.register(results_rule, move |line| {
            log::debug!("test results block opened: {line}");
            flag.set(true);
        });
    }

    let project_root = job.project_dir().canonicalize().unwrap_or_else(|_| job.project_dir());
    let normalizer = PathNormalizer::new(&project_root);
    let mut dispatcher = BlockDispatcher::new(&registry, broadcaster, normalizer, Palette::new(color));

    let status = mvn::run(job, config, |line| {
        if let Some(out) = dispatcher.process(&line) {
            println!("{out}");
        }
    })
    .context("failed to run maven (is maven-home configured correctly?)")?;

    if failed_tests.get() {
        log::warn!("test results reported above; check the failure block");
    }
    log::info!("build finished: {status}");
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut color = io::stdout().is_terminal();
    let mut once = false;
    let mut maven_home: Option<PathBuf> = None;
    let mut java_home: Option<PathBuf> = None;
    let mut threads: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("mvnwatch {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--once" => once = true,
            "--maven-home" => {
                let value = args.next().ok_or_else(|| "error: --maven-home expects a path".to_string())?;
                maven_home = Some(PathBuf::from(value));
            }
            "--java-home" => {
                let value = args.next().ok_or_else(|| "error: --java-home expects a path".to_string())?;
                java_home = Some(PathBuf::from(value));
            }
            "--threads" | "-T" => {
                let value = args.next().ok_or_else(|| "error: --threads expects a value".to_string())?;
                threads = Some(value);
            }
            "--" => {
                positional.extend(args);
                break;
            }
            _ if arg.starts_with("--maven-home=") => {
                maven_home = Some(PathBuf::from(arg.trim_start_matches("--maven-home=")));
            }
            _ if arg.starts_with("--java-home=") => {
                java_home = Some(PathBuf::from(arg.trim_start_matches("--java-home=")));
            }
            _ if arg.starts_with("--threads=") => {
                threads = Some(arg.trim_start_matches("--threads=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() < 2 {
        return Err(format!("error: expected a pom file and at least one goal\n\n{}", help_text()));
    }

    let pom_file = positional.remove(0);
    let mut job = Job::new(pom_file, positional);
    job.maven_home = maven_home;
    job.java_home = java_home;
    job.threads = threads;

    Ok(CliConfig { job, color, once })
}

fn help_text() -> String {
    format!(
        "mvnwatch {version}

Watches a Maven project and re-renders its build output as a curated,
colorized stream.

Usage:
  mvnwatch [OPTIONS] POM_FILE GOAL...

Options:
  --once                     Run a single build and exit instead of watching.
  --maven-home <path>        Maven installation to use (default: from
                             ~/{config_file}, falling back to /usr).
  --java-home <path>         JDK for the build, exported as JAVA_HOME.
  -T, --threads <spec>       Maven thread spec, e.g. \"4\" or \"1C\".
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

The log level is controlled by {level_env} (off, error, warn, info,
debug, trace).

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        config_file = mvnwatch::config::FILE_NAME,
        level_env = logging::LEVEL_ENV
    )
}
