use std::process::ExitCode;

fn main() -> ExitCode {
    match rental_charges::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
