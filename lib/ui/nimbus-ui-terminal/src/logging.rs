use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Installs the global fmt subscriber writing to stderr.
///
/// `directives` follows the `RUST_LOG` syntax, e.g. `info,config=debug`. Invalid
/// directives are reported and skipped.
pub fn init_logging(directives: &str) {
    let mut env_filter = EnvFilter::new("warn");
    for directive in directives.split(',').filter(|s| !s.trim().is_empty()) {
        match directive.trim().parse::<Directive>() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(err) => eprintln!("Ignoring log directive `{directive}`: {err}"),
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}
