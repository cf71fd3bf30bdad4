use std::io;
use std::process::ExitCode;

use clap::Parser;
use descriptor_test::cli::Args;
use descriptor_test::sweep;

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::default()
        .filter_level(args.log_level())
        .parse_env(env_logger::Env::default())
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = args
        .experiment()
        .and_then(|config| sweep::run(&config, &mut out));

    match result {
        Ok(reports) => {
            log::info!("finished {} predictions", reports.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                log::error!("caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
