// File: crates/chart-core/build.rs
// Summary: Build script linking the Windows system libraries Skia/ICU need.

fn main() {
    // Check the target, not the host: build scripts run on the host.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
