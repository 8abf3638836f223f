//! Terminal client for opkit. All logic lives in the library; `cli/` only
//! parses arguments, moves text between the terminal and the API, and prints.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
