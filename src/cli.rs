//! Command-line interface definition

use clap::{Arg, ArgAction, ArgGroup, Command as ClapCommand};

use crate::cytokit::DEFAULT_CONFIG_FILE;

/// Build the clap command tree
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("codexprep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prepare CODEX datasets for Cytokit analysis")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Operation log file")
                .value_name("FILE")
                .default_value("codexprep.log")
                .global(true),
        )
        .subcommand(
            ClapCommand::new("manifest")
                .about("Collect the information needed to analyse a CODEX dataset into a JSON manifest")
                .arg(
                    Arg::new("dataset-id")
                        .help("Dataset ID, e.g. HBM123.ABCD.456")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("raw-data-location")
                        .help("Directory containing the raw data subdirectories (named with cycle and region numbers)")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("experiment")
                        .help("experiment.json file from the CODEX Toolkit pipeline")
                        .required(true)
                        .index(3),
                )
                .arg(
                    Arg::new("segm-json")
                        .long("segm-json")
                        .help("JSON file with segmentation parameters (nuclearStainChannel, nuclearStainCycle, ...)")
                        .value_name("FILE"),
                )
                .arg(
                    Arg::new("segm-text")
                        .long("segm-text")
                        .help("Text file with name=value segmentation parameters, usually in the submitted \"processed\" directory")
                        .value_name("FILE"),
                )
                .group(
                    ArgGroup::new("segmentation")
                        .args(["segm-json", "segm-text"])
                        .multiple(true)
                        .required(true),
                )
                .arg(channel_names_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Manifest output file [default: <dataset-id>_manifest.json]")
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            ClapCommand::new("cytokit-config")
                .about("Write a Cytokit experiment config (YAML)")
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .help("Dataset manifest written by the manifest command")
                        .value_name("FILE"),
                )
                .arg(
                    Arg::new("experiment")
                        .long("experiment")
                        .help("experiment.json file from the CODEX Toolkit pipeline; the nuclei channel is guessed")
                        .value_name("FILE"),
                )
                .group(
                    ArgGroup::new("input")
                        .args(["manifest", "experiment"])
                        .required(true),
                )
                .arg(channel_names_arg().requires("experiment"))
                .arg(
                    Arg::new("defaults")
                        .long("defaults")
                        .help("TOML file overriding the built-in processing defaults")
                        .value_name("FILE"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("YAML output file")
                        .value_name("FILE")
                        .default_value(DEFAULT_CONFIG_FILE),
                ),
        )
        .subcommand(
            ClapCommand::new("stage")
                .about("Create a Cytokit analysis directory with a \"data\" directory of symlinks to the raw images")
                .arg(
                    Arg::new("manifest")
                        .help("Manifest file containing the raw data location")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("target")
                        .help("Analysis directory to create")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Only report what would be created")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("sharpness")
                .about("Score image planes with the Fourier sharpness measure")
                .arg(
                    Arg::new("images")
                        .help("Image files to score")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("TSV output file [default: stdout]")
                        .value_name("FILE"),
                ),
        )
}

fn channel_names_arg() -> Arg {
    Arg::new("channel-names")
        .short('c')
        .long("channel-names")
        .help("Text file listing all channel names, one per line")
        .value_name("FILE")
}
