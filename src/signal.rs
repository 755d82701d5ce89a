use crate::disable_raw_mode;

/// Restores the terminal before exiting on SIGINT/SIGTERM/SIGHUP.
pub fn setup_signal_handler() {
    let result = ctrlc::set_handler(|| {
        disable_raw_mode!();

        std::process::exit(0);
    });

    if let Err(e) = result {
        eprintln!("failed to set signal handler: {}", e);
    }
}
