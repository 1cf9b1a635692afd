use std::{fs::File, process::exit};

use log::{error, info, LevelFilter};
use simplelog::WriteLogger;

use tsnake::config::{Config, USAGE};

fn main() {
    let cfg = match Config::from_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("tsnake: {}\n\n{}", e, USAGE);
            exit(2);
        }
    };

    if cfg.help {
        println!("{}", USAGE);
        return;
    }

    init_logging(&cfg);
    info!("Starting with {:?}", cfg);

    // run() hands the terminal back before returning, so the error is readable
    if let Err(e) = tsnake::run(&cfg) {
        error!("{}", e);
        eprintln!("tsnake: {}", e);
        exit(1);
    }

    info!("Bye");
}

fn init_logging(cfg: &Config) {
    let level = if cfg.debug { LevelFilter::Debug } else { LevelFilter::Info };

    let file = match File::create(&cfg.log_file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("tsnake: not logging, cannot create {}: {}", cfg.log_file.display(), e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
        eprintln!("tsnake: not logging: {}", e);
    }
}
