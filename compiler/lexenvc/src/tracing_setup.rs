//! Tracing subscriber setup for the `lexenv` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Filter used by `--verbose` when `RUST_LOG` is unset.
pub const VERBOSE_FILTER: &str = "lexenv_env=trace,lexenvc=debug";

/// Install a hierarchical subscriber writing to stderr.
///
/// Does nothing unless `RUST_LOG` is set or `verbose` is requested.
/// `RUST_LOG` wins over the verbose default when both are present.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) if verbose => EnvFilter::new(VERBOSE_FILTER),
            Err(_) => return,
        };
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        // A host that already installed a subscriber keeps it.
        let _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
    });
}
