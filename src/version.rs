//! Build and git metadata baked in at compile time.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build timestamp (RFC 3339), or "unknown" if unavailable.
pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

/// Git branch at build time, or "unknown" if unavailable.
pub const GIT_BRANCH: &str = match option_env!("VERGEN_GIT_BRANCH") {
    Some(branch) => branch,
    None => "unknown",
};

/// Git commit SHA (short) at build time, or "unknown" if unavailable.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Whether the working tree was dirty at build time.
pub fn git_dirty() -> bool {
    option_env!("VERGEN_GIT_DIRTY") == Some("true")
}

/// Semver-with-metadata version string, e.g. `0.1.0+main.abc1234` with a
/// `.dirty` suffix when the tree had uncommitted changes.
pub fn version_string() -> String {
    let dirty_suffix = if git_dirty() { ".dirty" } else { "" };
    format!("{PKG_VERSION}+{GIT_BRANCH}.{}{dirty_suffix}", short_sha())
}

/// Multi-line version report for `vegd --version` style output.
pub fn long_version() -> String {
    format!(
        "{}\ncommit: {GIT_SHA}\nbuilt: {BUILD_TIMESTAMP}",
        version_string()
    )
}

fn short_sha() -> &'static str {
    // "unknown" is shorter than a full SHA, so the cap never splits it
    &GIT_SHA[..7.min(GIT_SHA.len())]
}
