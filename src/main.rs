//! micro_chess UCI-style engine for Silverman 4×5 chess

use micro_chess::uci::{init_logging, UCI};

fn main() {
    init_logging();

    println!("micro_chess v0.1.0 - Silverman 4x5 engine");
    println!("Type 'uci' to start UCI mode, 'd' to display board, 'quit' to exit");

    let mut uci = UCI::new();
    uci.run();
}
