//! Command-line view of the curriculum catalog.
//!
//! Prints the roadmap (or one slice of it) as text or JSON, and checks a
//! catalog file for authoring defects. Logs go to stderr through `tracing`;
//! results go to stdout.

use anyhow::{Context, Result, anyhow, bail};
use labcatalog::display::{self, render_roadmap, render_topic};
use labcatalog::{
    BUILTIN_CATALOG_JSON, CatalogSource, Category, Curriculum, LOG_ENV, Topic, category_order,
    check_document, load_catalog_from_path, parse_catalog_str, split_list,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("labs: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }
    init_tracing(args.verbosity)?;

    let source = CatalogSource::resolve(args.catalog.as_deref());
    tracing::debug!(source = %source.describe(), "resolved catalog source");

    if args.command == Command::Check {
        return check(&source, args.json);
    }

    let curriculum = source.load()?;
    let output = render(&curriculum, &args)?;
    print!("{output}");
    Ok(())
}

fn render(curriculum: &Curriculum, args: &CliArgs) -> Result<String> {
    match &args.command {
        Command::Roadmap => {
            if args.json {
                let sections: Vec<Value> = category_order()
                    .iter()
                    .map(|category| {
                        json!({
                            "category": category,
                            "label": category.label(),
                            "topics": curriculum.topics_by_category(*category),
                        })
                    })
                    .collect();
                to_json(&json!({
                    "summary": curriculum.summary(),
                    "momentum_starters": curriculum.momentum_starters(),
                    "categories": sections,
                }))
            } else {
                Ok(render_roadmap(curriculum, args.expand))
            }
        }
        Command::Starters => {
            let starters = curriculum.momentum_starters();
            if args.json {
                to_json(&starters)
            } else {
                Ok(starters
                    .iter()
                    .enumerate()
                    .map(|(idx, topic)| format!("{}. {}", idx + 1, render_topic(topic, args.expand)))
                    .collect())
            }
        }
        Command::Categories => {
            if args.json {
                let rows: Vec<Value> = category_order()
                    .iter()
                    .map(|category| {
                        json!({
                            "category": category,
                            "label": category.label(),
                            "accent": category.accent(),
                            "topics": curriculum.topics_by_category(*category).len(),
                        })
                    })
                    .collect();
                to_json(&rows)
            } else {
                Ok(category_order()
                    .iter()
                    .map(|category| {
                        format!(
                            "{:<24} {:<26} {}\n",
                            category.as_str(),
                            category.label(),
                            curriculum.topics_by_category(*category).len()
                        )
                    })
                    .collect())
            }
        }
        Command::Category(tags) => {
            let mut topics: Vec<&Topic> = Vec::new();
            for tag in tags {
                if tag.parse::<Category>().is_err() {
                    tracing::warn!(tag = %tag, "unknown category; no topics match");
                }
                topics.extend(curriculum.topics_by_category_tag(tag));
            }
            if args.json {
                to_json(&topics)
            } else {
                Ok(topics
                    .iter()
                    .map(|topic| render_topic(topic, args.expand))
                    .collect())
            }
        }
        Command::Topic(needles) => {
            let mut topics = Vec::new();
            for needle in needles {
                let topic = curriculum
                    .find_topic(needle)
                    .ok_or_else(|| anyhow!("no topic with id or letter '{needle}'"))?;
                topics.push(topic);
            }
            if args.json {
                to_json(&topics)
            } else {
                Ok(topics
                    .iter()
                    .map(|topic| describe_topic(curriculum, topic))
                    .collect())
            }
        }
        Command::Summary => {
            let summary = curriculum.summary();
            if args.json {
                to_json(&summary)
            } else {
                let mut out = format!(
                    "{}: {}, {} momentum starters\n",
                    summary.title,
                    display::catalog_badge(curriculum),
                    summary.momentum_starters
                );
                for row in &summary.categories {
                    out.push_str(&format!("  {:<26} {}\n", row.label, row.topics));
                }
                for row in &summary.statuses {
                    out.push_str(&format!("  {:<26} {}\n", row.label, row.labs));
                }
                Ok(out)
            }
        }
        Command::Help | Command::Check => Ok(String::new()),
    }
}

/// Expanded topic card with prerequisite titles resolved where possible.
fn describe_topic(curriculum: &Curriculum, topic: &Topic) -> String {
    let mut out = render_topic(topic, true);
    for lab in topic.labs.iter().filter(|lab| lab.has_prereqs()) {
        let resolved: Vec<String> = lab
            .prereqs
            .iter()
            .map(|label| match curriculum.resolve_prereq(label) {
                Some((_, prereq)) => format!("{label} ({})", prereq.title),
                None => label.clone(),
            })
            .collect();
        out.push_str(&format!(
            "      {} needs {}\n",
            topic.lab_label(lab),
            resolved.join(", ")
        ));
    }
    out
}

fn check(source: &CatalogSource, json_output: bool) -> Result<()> {
    let doc = match source {
        CatalogSource::Builtin => {
            parse_catalog_str(BUILTIN_CATALOG_JSON).context("parsing builtin catalog")?
        }
        CatalogSource::File(path) => load_catalog_from_path(path)?,
    };
    let issues = check_document(&doc);

    if json_output {
        print!(
            "{}",
            to_json(&json!({
                "catalog": source.describe(),
                "schema_version": doc.key,
                "issues": issues,
            }))?
        );
    } else {
        for issue in &issues {
            println!("{issue}");
        }
    }

    // Notes are printed but never fail the check.
    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    if errors > 0 {
        bail!("{errors} integrity issue(s) in {}", source.describe());
    }

    // Schema validation runs as part of the full load.
    let curriculum = source.load()?;
    if !json_output {
        println!(
            "ok: {} ({})",
            source.describe(),
            display::catalog_badge(&curriculum)
        );
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

fn init_tracing(verbosity: Verbosity) -> Result<()> {
    let level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "debug",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Roadmap,
    Starters,
    Categories,
    Category(Vec<String>),
    Topic(Vec<String>),
    Summary,
    Check,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

#[derive(Debug)]
struct CliArgs {
    command: Command,
    catalog: Option<PathBuf>,
    json: bool,
    expand: bool,
    verbosity: Verbosity,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut catalog: Option<PathBuf> = None;
        let mut json = false;
        let mut expand = false;
        let mut verbosity = Verbosity::Normal;
        let mut positional: Vec<String> = Vec::new();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    if catalog.is_some() {
                        bail!("--catalog may only be provided once");
                    }
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                }
                "--json" => json = true,
                "--expand" => expand = true,
                "-v" | "--verbose" => verbosity = Verbosity::Verbose,
                "-q" | "--quiet" => verbosity = Verbosity::Quiet,
                "--help" | "-h" => {
                    return Ok(CliArgs {
                        command: Command::Help,
                        catalog,
                        json,
                        expand,
                        verbosity,
                    });
                }
                flag if flag.starts_with('-') => bail!("unknown flag: {flag}"),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("roadmap") => Command::Roadmap,
            Some("starters") => Command::Starters,
            Some("categories") => Command::Categories,
            Some("summary") => Command::Summary,
            Some("check") => Command::Check,
            Some("help") => Command::Help,
            Some("category") => {
                let tags: Vec<String> = positional.by_ref().flat_map(|v| split_list(&v)).collect();
                if tags.is_empty() {
                    bail!("category requires at least one tag");
                }
                Command::Category(tags)
            }
            Some("topic") => {
                let needles: Vec<String> =
                    positional.by_ref().flat_map(|v| split_list(&v)).collect();
                if needles.is_empty() {
                    bail!("topic requires an id or letter");
                }
                Command::Topic(needles)
            }
            Some(other) => bail!("unknown command: {other}"),
        };

        if let Some(extra) = positional.next() {
            bail!("unexpected argument: {extra}");
        }

        Ok(CliArgs {
            command,
            catalog,
            json,
            expand,
            verbosity,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: labs [COMMAND] [--catalog PATH] [--json] [--expand] [-v|-q]\n\
Commands:\n  \
roadmap              momentum starters, then every category section (default)\n  \
starters             momentum starters in onboarding order\n  \
categories           category display order with topic counts\n  \
category TAG[,TAG]   topics in the given categories, catalog order\n  \
topic ID|LETTER      one or more topics with their labs\n  \
summary              topic, lab, and status totals\n  \
check                report authoring defects and validate the catalog\n\
Environment: LABS_CATALOG_PATH selects a catalog file; LABS_LOG sets the log filter.\n"
}

fn print_usage() {
    print!("{}", usage());
}
