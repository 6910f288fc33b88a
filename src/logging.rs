use chrono::Local;
use env_logger::{Builder, Env};
use std::io::Write;

pub use env_logger::Target;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Install the process-wide logger on stdout.
pub fn init() {
    init_to(Target::Stdout);
}

/// Install the process-wide logger on `target`, at `debug` unless
/// `RUST_LOG` says otherwise. Only the first call in a process takes effect.
pub fn init_to(target: Target) {
    let _ = builder("RUST_LOG", target).try_init();
}

/// Logger builder reading its filter from `filter_var`, `debug` when unset.
pub fn builder(filter_var: &str, target: Target) -> Builder {
    let mut builder = Builder::from_env(Env::new().filter_or(filter_var, "debug"));
    builder.target(target).format(|buf, record| {
        writeln!(
            buf,
            "[{}] [{}] [{}] {}",
            Local::now().format(TIMESTAMP_FORMAT),
            record.target(),
            record.level(),
            record.args()
        )
    });
    builder
}
