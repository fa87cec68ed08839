//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! This binary generates bindings for the recipe-groups library, for hosts
//! and tools that drive the crafting menu from another language.
//!
//! ## Usage
//!
//! Generate Python bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_groups.so --language python --out-dir ./bindings
//! ```
//!
//! Generate Kotlin bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_groups.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
