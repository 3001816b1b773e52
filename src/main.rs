//! Binary crate entry point. All CLI logic is in the `cli` module.

fn main() {
    srctok::cli::run();
}
