//! Turn-based chess rules engine. Tracks the board, computes destinations for
//! a selected piece, detects checks, alternates turns, records the game history
//! and saves/restores games in a compact digit format.
//!
//! The rules live in [`chess`]; [`Engine`] is a line-oriented front-end that
//! drives a [`chess::game::Game`] from text commands.
//!
//! ```
//! use gambit::chess::core::Square;
//! use gambit::chess::game::Game;
//!
//! let mut game = Game::new();
//! assert!(game.play(Square::E2, Square::E4).is_some());
//! assert!(game.play(Square::E7, Square::E5).is_some());
//! assert!(game.play(Square::G1, Square::F3).is_some());
//! assert_eq!(game.history().to_notation(), "1. e4 e5 2. Nf3");
//! ```

// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

pub mod chess;

mod engine;
pub use engine::{load_game, Engine};
use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the engine version and the commands it accepts on
/// startup.
pub fn print_engine_info() {
    println!("Gambit chess rules engine {}", engine_version());
    println!("Type `help` for the list of commands.");
}
