use std::path::PathBuf;

use anyhow::Context;
use clap::{crate_authors, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;

use trackkit::commands::{self, BuildOptions, GenerateOptions};
use trackkit::{init_logging, Config};

fn cli() -> Command {
    Command::new("trackkit")
        .version(crate_version!())
        .author(crate_authors!())
        .about("lays out vehicle test tracks from straight and arc segments")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("the configuration file (.toml or .json)")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .help("emit logs as JSON lines")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("build")
                .about("builds a track from a JSON array of segment requests")
                .arg(
                    Arg::new("requests")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .required(true)
                        .help("the segment request file"),
                )
                .arg(
                    Arg::new("save")
                        .long("save")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("save the track file")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("csv")
                        .long("csv")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("export sampled points as CSV")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("gpx")
                        .long("gpx")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("export sampled points as GPX")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("resolution")
                        .short('r')
                        .long("resolution")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .help("samples per arc")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("generates random tracks that fit the canvas")
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .default_value("1")
                        .help("the number of tracks")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .value_name("SEED")
                        .value_parser(value_parser!(u64))
                        .help("seed for reproducible output")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .help("write track files and descriptions here")
                        .action(ArgAction::Set),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)?,
            Err(_) => Config::default(),
        },
    };
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let mut matches = cli().get_matches();

    init_logging(matches.get_flag("log-json"))?;
    tracing::debug!(version = trackkit::VERSION, built = trackkit::BUILD_DATE, "starting");

    let config = load_config(&matches)?;

    match matches.remove_subcommand() {
        Some((name, mut sub)) if name == "build" => {
            let options = BuildOptions {
                requests: sub.remove_one("requests").unwrap_or_default(),
                save: sub.remove_one("save"),
                csv: sub.remove_one("csv"),
                gpx: sub.remove_one("gpx"),
                resolution: sub.remove_one("resolution"),
            };
            print!("{}", commands::run_build(&config, &options)?);
        }
        Some((name, mut sub)) if name == "generate" => {
            let options = GenerateOptions {
                count: sub.remove_one("count").unwrap_or(1),
                out: sub.remove_one("out"),
            };
            let mut rng = match sub.remove_one::<u64>("seed") {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for (i, description) in commands::run_generate(&config, &options, &mut rng)?
                .iter()
                .enumerate()
            {
                println!("{}. {}", i + 1, description);
            }
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
