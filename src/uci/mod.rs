//! UCI-style text front-end
//!
//! Standard commands are parsed with vampirc-uci. Positions are parsed by
//! hand since 4×5 placements are not standard FEN, and a few debugging
//! commands (`d`, `eval`, `quality`, `stats`, `perft`) are added on top.

pub mod protocol;

pub use protocol::UCI;

/// Route the library's `log` output to stderr, leaving stdout to the
/// protocol. `RUST_LOG` overrides the default `warn` filter. Calling it again
/// is a no-op.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .try_init();
}
