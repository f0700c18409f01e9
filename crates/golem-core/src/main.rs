use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use golem_core::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    let path_arg = Arg::new("path")
        .num_args(0..)
        .help("Group, Classification and Specialization names, in order");

    Command::new("fastgolem")
        .version(golem_core::VERSION)
        .about("Search healthcare practitioners by NUCC taxonomy")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Taxonomy JSON file"),
        )
        .arg(
            Arg::new("roster")
                .long("roster")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Practitioner roster CSV file"),
        )
        .subcommand(Command::new("groups").about("List taxonomy Groups"))
        .subcommand(
            Command::new("children")
                .about("List the choices below a selection")
                .arg(path_arg.clone()),
        )
        .subcommand(
            Command::new("codes")
                .about("Resolve a selection to taxon codes")
                .arg(path_arg.clone()),
        )
        .subcommand(
            Command::new("lookup")
                .about("List the taxonomy paths carrying a code")
                .arg(Arg::new("code").required(true)),
        )
        .subcommand(Command::new("flatten").about("Print the flattened taxonomy as JSON lines"))
        .subcommand(
            Command::new("search")
                .about("Filter the roster by a selection and optional filters")
                .arg(path_arg)
                .arg(text_filter("gender", FilterKind::Gender))
                .arg(text_filter("state", FilterKind::IndividualState))
                .arg(text_filter("county", FilterKind::IndividualCounty))
                .arg(text_filter("zip", FilterKind::IndividualZip))
                .arg(text_filter("place", FilterKind::IndividualLocation))
                .arg(text_filter("name", FilterKind::FullName))
                .arg(
                    Arg::new("tenure")
                        .long("tenure")
                        .value_name("MIN..MAX")
                        .value_parser(parse_range)
                        .help("Tenure range, inclusive"),
                )
                .arg(flag_filter("telehealth", FilterKind::Telehealth))
                .arg(flag_filter("sole-proprietor", FilterKind::SoleProprietor))
                .arg(flag_filter("medicare", FilterKind::Medicare))
                .arg(
                    Arg::new("column")
                        .long("column")
                        .action(ArgAction::Append)
                        .help("Extra column to display and export"),
                )
                .arg(
                    Arg::new("export")
                        .long("export")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Select every displayed row and write the selection"),
                ),
        )
}

fn text_filter(name: &'static str, kind: FilterKind) -> Arg {
    Arg::new(name)
        .long(name)
        .help(format!("Filter by {}", kind.label()))
}

fn flag_filter(name: &'static str, kind: FilterKind) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::SetTrue)
        .help(format!("Filter by {}", kind.label()))
}

fn parse_range(value: &str) -> Result<(f64, f64), String> {
    let (min, max) = value
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX, got '{value}'"))?;
    let bound = |s: &str| s.trim().parse::<f64>().map_err(|e| format!("'{s}': {e}"));
    Ok((bound(min)?, bound(max)?))
}

fn config(matches: &ArgMatches) -> anyhow::Result<GolemConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GolemConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => GolemConfig::new(),
    };
    if let Some(path) = matches.get_one::<PathBuf>("tree") {
        config = config.with_tree_path(path);
    }
    if let Some(path) = matches.get_one::<PathBuf>("roster") {
        config = config.with_roster_path(path);
    }
    Ok(config)
}

fn selection(args: &ArgMatches) -> anyhow::Result<SelectionPath> {
    let names = args.get_many::<String>("path").into_iter().flatten();
    Ok(SelectionPath::new(names)?)
}

fn search(golem: &Golem, args: &ArgMatches) -> anyhow::Result<()> {
    let path = selection(args)?;
    let resolution = golem.resolve_codes(&path)?;
    if resolution.is_fallback() {
        println!("No codes under {path}; matching the name as a code");
    }

    let mut choices = Vec::new();
    for (name, kind) in [
        ("gender", FilterKind::Gender),
        ("state", FilterKind::IndividualState),
        ("county", FilterKind::IndividualCounty),
        ("zip", FilterKind::IndividualZip),
        ("place", FilterKind::IndividualLocation),
    ] {
        if let Some(value) = args.get_one::<String>(name) {
            choices.push((kind, FilterChoice::Value(value.clone())));
        }
    }
    if let Some(name) = args.get_one::<String>("name") {
        choices.push((FilterKind::FullName, FilterChoice::Text(name.clone())));
    }
    if let Some(&(min, max)) = args.get_one::<(f64, f64)>("tenure") {
        choices.push((FilterKind::Tenure, FilterChoice::Range(min, max)));
    }
    for (name, kind) in [
        ("telehealth", FilterKind::Telehealth),
        ("sole-proprietor", FilterKind::SoleProprietor),
        ("medicare", FilterKind::Medicare),
    ] {
        choices.push((kind, FilterChoice::Checked(args.get_flag(name))));
    }

    let columns: Vec<String> = args.get_many::<String>("column").into_iter().flatten().cloned().collect();
    let request = FilterRequest::new(resolution.codes)
        .with_default_columns(golem.config().default_columns.iter().cloned())
        .with_columns(columns.iter().cloned())
        .with_predicates(choices.iter().filter_map(|(kind, choice)| kind.predicate(choice)));

    let mut session = golem.session(golem.config().cli_user.as_str());
    let outcome = session.run(&request);
    if let Some(err) = outcome.reverted {
        bail!("filter failed: {err}");
    }

    let view = outcome.view;
    println!("{} practitioners ({} matching rows)", view.row_count(), view.matched());
    println!("{}", view.headers().join("\t"));
    for row in view.render() {
        println!("{}", row.join("\t"));
    }

    if let Some(file) = args.get_one::<PathBuf>("export") {
        let rows = session.select_all();
        let extra: Vec<Column> = view
            .columns()
            .iter()
            .copied()
            .filter(|c| !golem.default_columns().contains(c))
            .collect();
        let bytes = golem.export_and_clear(session.user(), &extra, None)?;
        std::fs::write(file, bytes).with_context(|| format!("writing {}", file.display()))?;
        println!("Exported {rows} rows to {}", file.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = config(&matches)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let golem = Golem::load(config).context("loading FastGolem inputs")?;
    for skipped in golem.skipped() {
        eprintln!("warning: {skipped}");
    }

    match matches.subcommand() {
        Some(("groups", _)) => {
            for group in golem.list_groups() {
                println!("{group}");
            }
        }
        Some(("children", args)) => {
            let path = selection(args)?;
            if !golem.index().contains(&path) {
                bail!("no taxonomy node at {path}");
            }
            for child in golem.list_children(&path) {
                println!("{child}");
            }
        }
        Some(("codes", args)) => {
            let resolution = golem.resolve_codes(&selection(args)?)?;
            if resolution.is_fallback() {
                println!("# literal fallback");
            }
            for code in resolution.codes {
                println!("{code}");
            }
        }
        Some(("lookup", args)) => {
            let code = args.get_one::<String>("code").map(String::as_str).unwrap_or_default();
            for path in golem.index().paths_for_code(code) {
                println!("{path}");
            }
        }
        Some(("flatten", _)) => {
            for row in golem.index().flattened() {
                println!("{}", serde_json::to_string(row)?);
            }
        }
        Some(("search", args)) => search(&golem, args)?,
        _ => {}
    }
    Ok(())
}
