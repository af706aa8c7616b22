use std::process::ExitCode;

fn main() -> ExitCode {
    bazar_cli::run()
}
