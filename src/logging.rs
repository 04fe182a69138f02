//! Subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_DIRECTIVES: &str = "nutrilabel=warn";

/// `RUST_LOG` wins whole; the default only fills in when it is missing.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_directive_is_kept() {
        let filter = filter_from(Some("nutrilabel=debug")).to_string();
        assert!(filter.contains("nutrilabel=debug"), "{filter}");
        assert!(!filter.contains("nutrilabel=warn"), "{filter}");
    }

    #[test]
    fn default_applies_without_rust_log() {
        assert_eq!(filter_from(None).to_string(), DEFAULT_DIRECTIVES);
        assert_eq!(filter_from(Some("  ")).to_string(), DEFAULT_DIRECTIVES);
        assert_eq!(filter_from(Some("nutrilabel=loud")).to_string(), DEFAULT_DIRECTIVES);
    }
}
