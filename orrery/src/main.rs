use orrery::{run, AppError, Args};
use orrery_core::{orrery_error, orrery_error_hint, orrery_warning};
use orrery_messages::messages::MESSAGES;

fn main() {
    let args = match Args::parse_legacy(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let default_filter = if args.debug { "debug" } else { "warn" };
    if let Err(e) = orrery_logging::init_with_defaults(default_filter) {
        orrery_warning!("{}", e);
    }

    if let Err(e) = run(&args) {
        orrery_error!("{}", e);
        if matches!(e, AppError::Config(_)) {
            orrery_error_hint!("{}", MESSAGES.common.help_hint);
        }
        std::process::exit(1);
    }
}
