use clap::Parser;
use libutf8vld::cli::{self, Cli};

fn main() {
    env_logger::init();

    let code = match cli::run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("utf8vld: {:#}", e);
            cli::INTERNAL_ERROR
        }
    };
    std::process::exit(code);
}
