use std::process::ExitCode;

mod cli;
mod commands;
mod display;
mod io;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    let ctx = display::Context::detect().with_quiet(cli.quiet || cli.json);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::run_stats(cli, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
