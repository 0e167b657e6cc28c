use {
    clap::{Arg, ArgAction, Command},
    hearth::{render, Engine},
    std::{
        fs::File,
        io::{self, BufRead, BufReader, Write},
        path::PathBuf,
        process::exit,
    },
};

fn app_version() -> String {
    let tag = option_env!("GITHUB_REF")
        .and_then(|github_ref| github_ref.strip_prefix("refs/tags/").map(|s| s.to_string()));

    tag.unwrap_or_else(|| match option_env!("GITHUB_SHA") {
        None => "devbuild".to_string(),
        Some(commit) => commit[..8].to_string(),
    })
}

fn reader_for(input: &Option<PathBuf>) -> io::Result<Box<dyn BufRead>> {
    match input {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app_version = app_version();
    let app = Command::new("hearth")
        .about("Computes pairwise household debt from a ledger of presence and billing events")
        .version(app_version)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("PATH")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Ledger file to read (defaults to stdin)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Raise diagnostic verbosity (repeatable)"),
        )
        .subcommand(
            Command::new("settle")
                .about("Process the ledger and print the net debt table"),
        )
        .subcommand(
            Command::new("timeline")
                .about("Render a person's presence/obligation timeline (debug)")
                .arg(Arg::new("nick").required(true).help("Nickname to render"))
                .arg(
                    Arg::new("window_start")
                        .required(true)
                        .help("Start date, YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("window_end")
                        .required(true)
                        .help("End date, YYYY-MM-DD"),
                ),
        );

    let matches = app.get_matches();
    let input = matches.get_one::<PathBuf>("input").cloned();

    let result = match matches.subcommand() {
        Some(("settle", _)) => run_settle(&input),
        Some(("timeline", sub)) => run_timeline(
            &input,
            sub.get_one::<String>("nick").expect("required"),
            sub.get_one::<String>("window_start").expect("required"),
            sub.get_one::<String>("window_end").expect("required"),
        ),
        _ => unreachable!("subcommand_required(true) guarantees a match"),
    };

    if let Err(err) = result {
        log::error!("{err}");
        eprintln!("error: {err}");
        exit(1);
    }
}

fn run_settle(input: &Option<PathBuf>) -> Result<(), hearth::EngineError> {
    let reader = reader_for(input)?;
    let mut engine = Engine::new();
    engine.run(reader)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in engine.debt_lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn run_timeline(
    input: &Option<PathBuf>,
    nick: &str,
    window_start: &str,
    window_end: &str,
) -> Result<(), hearth::EngineError> {
    let reader = reader_for(input)?;
    let mut engine = Engine::new();
    engine.run(reader)?;

    let owner = match engine.registry().lookup(nick) {
        Some(id) => id,
        None => {
            eprintln!("unknown nickname '{nick}'");
            exit(1);
        }
    };
    let w0 = hearth::time::parse(window_start)
        .unwrap_or_else(|err| {
            eprintln!("{err}");
            exit(1);
        });
    let w1 = hearth::time::parse(window_end).unwrap_or_else(|err| {
        eprintln!("{err}");
        exit(1);
    });

    let bar = render::render(
        engine.presence(),
        engine.obligation(),
        owner,
        w0,
        w1,
        86_400,
    );
    println!("{nick} {bar}");
    Ok(())
}
