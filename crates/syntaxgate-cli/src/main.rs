mod cli;
mod commands;

use std::process::ExitCode;

use cli::{AstParams, CheckParams, build_cli};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into())
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into())
        }
        _ => unreachable!("clap should have caught this"),
    }
}
