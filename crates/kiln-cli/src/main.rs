mod cli;
mod commands;
mod logging;

use cli::{CheckParams, EmitParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("emit", m)) => {
            let params = EmitParams::from_matches(m);
            logging::init(params.verbose);
            commands::emit::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            logging::init(params.verbose);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
