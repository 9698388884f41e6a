#[macro_use] extern crate clap;
#[macro_use] extern crate log;
#[macro_use] extern crate serde_json;

use helmspec::*;
use clap::{Arg, App, AppSettings, SubCommand, ArgMatches};
use std::path::Path;
use std::process;

fn print_error_debug(e: &Error) {
    // unwind the error chain
    for e in e.iter().skip(1) {
        warn!("caused by: {}", e);
    }
}

fn main() {
    let app = App::new("helmspec")
        .version(crate_version!())
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about("Port and ingress notation for deployment specs")
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("Increase verbosity"))
        .arg(Arg::with_name("debug")
            .short("d")
            .long("debug")
            .global(true)
            .help("Adds line numbers to log statements"))
        .subcommand(SubCommand::with_name("port")
            .about("Normalise port specs like 8080:80/tcp")
            .arg(Arg::with_name("json")
                .long("json")
                .help("Print the parsed fields as json"))
            .arg(Arg::with_name("specs")
                .required(true)
                .multiple(true)
                .help("Port specs to parse")))
        .subcommand(SubCommand::with_name("ingress")
            .about("Normalise ingress rules like example.com/api")
            .arg(Arg::with_name("json")
                .long("json")
                .help("Print the parsed fields as json"))
            .arg(Arg::with_name("rules")
                .required(true)
                .multiple(true)
                .help("Ingress rules to parse")))
        .subcommand(SubCommand::with_name("validate")
            .about("Validate the network section of a manifest")
            .arg(Arg::with_name("manifest")
                .required(true)
                .help("Path to a manifest yaml file")));

    // arg parse
    let args = app.get_matches();
    let name = args.subcommand_name().unwrap_or("helmspec").to_string();
    let _ = run(&args).map_err(|e| {
        error!("{} error: {}", name, e);
        print_error_debug(&e);
        process::exit(1);
    });
    process::exit(0);
}

fn run(args: &ArgMatches) -> Result<()> {
    // initialise deps and set log default - always show INFO messages (+1)
    loggerv::Logger::new()
        .verbosity(args.occurrences_of("verbose") + 1)
        .module_path(true)
        .line_numbers(args.is_present("debug"))
        .init()
        .map_err(|e| format!("Failed to initialise logger: {}", e))?;

    // Ignore SIGPIPE errors to avoid having to use let _ = write! everywhere
    // See https://github.com/rust-lang/rust/issues/46016
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    // Dispatch arguments to internal handlers. Pass on handled result.
    dispatch_commands(args)
}

/// Print the canonical form of every input, or its fields as json
fn normalise<T, F>(inputs: Vec<&str>, json: bool, fields: F) -> Result<()>
where
    T: TextMarshal + std::fmt::Debug,
    F: Fn(&T) -> serde_json::Value,
{
    for input in inputs {
        let parsed: T = input.parse()?;
        debug!("{} => {:?}", input, parsed);
        if json {
            println!("{}", serde_json::to_string(&fields(&parsed))?);
        } else {
            println!("{}", parsed);
        }
    }
    Ok(())
}

fn port_fields(p: &Port) -> serde_json::Value {
    json!({
        "port": p.port,
        "containerPort": p.containerPort,
        "protocol": p.protocol,
    })
}

fn ingress_fields(r: &IngressRule) -> serde_json::Value {
    json!({
        "scheme": r.scheme,
        "host": r.host,
        "path": r.path,
        "port": r.port,
    })
}

fn validate(pth: &Path) -> Result<()> {
    let mf = Manifest::read(pth)?;
    mf.verify()?;
    info!("{} validated", mf.name);
    print!("{}", mf.normalised()?);
    Ok(())
}

/// Dispatch clap arguments to handlers
fn dispatch_commands(args: &ArgMatches) -> Result<()> {
    if let Some(a) = args.subcommand_matches("port") {
        let specs: Vec<&str> = a.values_of("specs").map(|v| v.collect()).unwrap_or_default();
        return normalise(specs, a.is_present("json"), port_fields);
    }
    else if let Some(a) = args.subcommand_matches("ingress") {
        let rules: Vec<&str> = a.values_of("rules").map(|v| v.collect()).unwrap_or_default();
        return normalise(rules, a.is_present("json"), ingress_fields);
    }
    else if let Some(a) = args.subcommand_matches("validate") {
        let pth = a.value_of("manifest").map(Path::new).unwrap_or_else(|| Path::new("manifest.yml"));
        return validate(pth);
    }
    unreachable!("Subcommand valid, but not implemented")
}
