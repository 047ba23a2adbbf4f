use std::process::ExitCode;

fn main() -> ExitCode {
    pagegen::cli::run_cli()
}
