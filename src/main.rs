/// Command-line entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use photo_restore::native::{BlockingTransport, TerminalView};
    use photo_restore::{LogLevel, RestoreConfig, RestoreHandler};

    /// Server used when neither the flags nor the config file name one
    const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

    /// Send an image to a restoration server and save the restored result.
    #[derive(Debug, Parser)]
    #[command(name = "photo-restore-native", version)]
    struct Args {
        /// Image to restore
        file: Option<PathBuf>,

        /// Base URL of the restoration server
        #[arg(long, env = "PHOTO_RESTORE_SERVER")]
        server: Option<String>,

        /// Path of the restore endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Where to write the restored image
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Log verbosity (error, warn, info, debug, trace)
        #[arg(long)]
        log_level: Option<LogLevel>,

        /// Configuration file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    }

    fn load_config(args: &Args) -> Result<RestoreConfig, photo_restore::config::ConfigError> {
        let mut config = match &args.config {
            Some(path) => RestoreConfig::load_from_path(path)?,
            None => RestoreConfig::load_from_default_path().unwrap_or_default(),
        };

        if let Some(server) = &args.server {
            config.server_url = server.clone();
        } else if config.server_url.is_empty() {
            config.server_url = DEFAULT_SERVER_URL.to_string();
        }
        if let Some(endpoint) = &args.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(level) = args.log_level {
            config.log_level = level;
        }
        Ok(config)
    }

    /// Start env_logger before anything logs.
    ///
    /// Returns whether `RUST_LOG` is set; when it is, its filter wins over
    /// every configured level.
    fn init_logging(initial: LogLevel) -> bool {
        let from_env = std::env::var_os("RUST_LOG").is_some();
        // Let everything through env_logger and gate with log's max level so
        // the level from the config file can still be applied afterwards
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Trace)
            .parse_default_env()
            .init();
        if !from_env {
            log::set_max_level(initial.to_level_filter());
        }
        from_env
    }

    pub fn run() -> ExitCode {
        let args = Args::parse();

        let from_env = init_logging(args.log_level.unwrap_or_default());

        let config = match load_config(&args) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Configuration error: {}", e);
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        };

        if !from_env {
            log::set_max_level(config.log_level.to_level_filter());
        }
        log::debug!("Using configuration: {:?}", config);

        let handler = RestoreHandler::new(BlockingTransport::new(), config);
        let mut view = TerminalView::new(args.file, args.output);

        match pollster::block_on(handler.submit(&mut view)) {
            Ok(outcome) => {
                if let Some(path) = view.written() {
                    println!("{}", path.display());
                }
                log::debug!("Outcome: {:?}", outcome);
                ExitCode::SUCCESS
            }
            Err(_) => ExitCode::FAILURE,
        }
    }
}
