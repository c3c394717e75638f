use clap::{Arg, ArgAction, ArgMatches, Command};

pub fn build_cli() -> Command {
    Command::new("retitle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Native window titles for Sublime Text")
        .long_about(
            "retitle rewrites the native OS title of Sublime Text windows from a \
             configurable template. The engine normally runs embedded in the editor; \
             this tool drives the same core by hand for setup checks and scripting.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // Render subcommand
        .subcommand(
            Command::new("render")
                .about("Compute the official and new titles for a view, without touching any window")
                .arg(
                    Arg::new("window-id")
                        .long("window-id")
                        .help("Host window id the view belongs to")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("View name assigned by the host (wins over the file path)"),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .help("Absolute path of the file open in the view"),
                )
                .arg(
                    Arg::new("dirty")
                        .long("dirty")
                        .short('d')
                        .help("Treat the buffer as having unsaved changes")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("project")
                        .long("project")
                        .short('p')
                        .help("Path of the window's project file"),
                )
                .arg(
                    Arg::new("folder")
                        .long("folder")
                        .help("Folder open in the window (repeatable, first is the project root)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .short('t')
                        .help("Render with this template instead of the configured one"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        // Sync subcommand
        .subcommand(
            Command::new("sync")
                .about("Run one full rename pass for a view against the real backend")
                .arg(
                    Arg::new("window-id")
                        .long("window-id")
                        .help("Host window id the view belongs to")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("View name assigned by the host (wins over the file path)"),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .help("Absolute path of the file open in the view"),
                )
                .arg(
                    Arg::new("dirty")
                        .long("dirty")
                        .short('d')
                        .help("Treat the buffer as having unsaved changes")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("project")
                        .long("project")
                        .short('p')
                        .help("Path of the window's project file"),
                )
                .arg(
                    Arg::new("folder")
                        .long("folder")
                        .help("Folder open in the window (repeatable, first is the project root)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        // Find subcommand
        .subcommand(
            Command::new("find")
                .about("Find editor windows whose current title ends with a suffix")
                .arg(
                    Arg::new("title")
                        .help("Title suffix to search for, typically an official title from 'render'")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        // Set-title subcommand
        .subcommand(
            Command::new("set-title")
                .about("Set the native title of one window by handle")
                .arg(
                    Arg::new("handle")
                        .help("Window handle as printed by 'find' (e.g. x11:46137349)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("title")
                        .help("New title to write")
                        .required(true)
                        .index(2),
                ),
        )
        // Script subcommand
        .subcommand(
            Command::new("script")
                .about("Print or install the X11 window-enumeration script")
                .arg(
                    Arg::new("install")
                        .long("install")
                        .help("Write the script to its configured location instead of printing it")
                        .action(ArgAction::SetTrue),
                ),
        )
        // Backends subcommand
        .subcommand(
            Command::new("backends")
                .about("List window backends and their availability on this system")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[allow(dead_code)]
pub fn get_matches() -> ArgMatches {
    build_cli().get_matches()
}
