use anyhow::Result;

pub use self::args::Arguments;
pub use self::exit_status::ExitStatus;

mod args;
mod exit_status;
pub mod report;
mod run;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    run::run(&args)
}
