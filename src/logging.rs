//! Tracing setup for the fintrack binary

use std::sync::Once;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "fintrack=debug"
    } else {
        "fintrack=warn"
    }
}

/// Install the global subscriber once. A set `RUST_LOG` replaces the
/// default filter; output goes to stderr so stdout stays a report.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
            Ok(value) if !value.trim().is_empty() => EnvFilter::from_default_env(),
            _ => {
                let mut filter = EnvFilter::default();
                if let Ok(directive) = default_directive(verbose).parse::<Directive>() {
                    filter = filter.add_directive(directive);
                }
                filter
            }
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "fintrack=warn");
        assert_eq!(default_directive(true), "fintrack=debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(false);
        init_tracing(true);
    }
}
