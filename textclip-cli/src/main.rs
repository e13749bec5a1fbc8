use clap::{Arg, ArgAction};
use textclip::{TextclipCommand, TextclipOutcome, register_command};

fn cli() -> (clap::Command, TextclipCommand) {
    let app = clap::Command::new("textclip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate captioned title clips")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Raise log verbosity (-v info, -vv debug, -vvv trace)"),
        );
    register_command(app)
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let (app, textclip) = cli();
    let matches = app.get_matches();
    init_tracing(matches.get_count("verbose"));

    match matches.subcommand() {
        Some((TextclipCommand::NAME, sub)) => {
            let args = textclip.parse_args(sub).unwrap_or_else(|e| e.exit());
            match textclip.run(&args)? {
                TextclipOutcome::Written(path) => eprintln!("wrote {}", path.display()),
                TextclipOutcome::Dumped(json) => println!("{json}"),
            }
            Ok(())
        }
        Some((name, _)) => anyhow::bail!("unknown subcommand '{name}'"),
        None => anyhow::bail!("missing subcommand"),
    }
}
