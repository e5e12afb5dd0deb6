use clap::Parser;

use proxylauncher::presentation::{DialogNotifier, Notifier, SystemEditor};
use proxylauncher::{
    default_config_path, logging, platform_window_visibility, Cli, FsProbe, Launcher,
    SystemSpawner,
};

fn main() {
    logging::init();

    let cli = Cli::parse();
    let notifier = DialogNotifier;

    let config_path = match cli.config {
        Some(path) => path,
        None => match default_config_path() {
            Ok(path) => path,
            Err(e) => {
                notifier.error(&e.to_string());
                std::process::exit(proxylauncher::constants::FAILURE_EXIT_CODE);
            }
        },
    };

    let window = platform_window_visibility();
    let launcher = Launcher::new(
        &FsProbe,
        &SystemSpawner,
        &notifier,
        &SystemEditor,
        window.as_ref(),
    );

    let outcome = launcher.run(&config_path, &cli.args);
    std::process::exit(outcome.exit_code());
}
