//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notelet_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("notelet_core ping={}", notelet_core::ping());
    println!("notelet_core version={}", notelet_core::core_version());
}
