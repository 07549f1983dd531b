fn main() {
    println!("cargo:rerun-if-env-changed=PHANTOM_RELEASE_VERSION");

    // The release to download defaults to our own package version so the launcher and the
    // binary it fetches are published together. Release pipelines may pin another one.
    let version = std::env::var("PHANTOM_RELEASE_VERSION")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());

    // Strip 'v' prefix if present (e.g., "v1.0.0" -> "1.0.0")
    let version = version.strip_prefix('v').unwrap_or(&version);

    println!("cargo:rustc-env=PHANTOM_DEFAULT_RELEASE={}", version);
}
