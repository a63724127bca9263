//! minic: interpreter for a small typed imperative language
//!
//! Programs arrive as syntax trees (built in code or loaded from JSON) and are
//! executed by a tree-walking [`Interpreter`].

pub mod ast;
pub mod interp;

pub use ast::Program;
pub use interp::{ErrorKind, InterpConfig, InterpResult, Interpreter, RuntimeError};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber on stderr when `RUST_LOG` is set.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
