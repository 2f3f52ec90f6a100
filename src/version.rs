// Build-time version from Cargo.toml

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Display name used in the banner.
pub const APP_TITLE: &str = "System Information";

/// Banner printed above the human-readable output.
pub fn banner() -> String {
    let rule = "=".repeat(61);
    format!("\n{rule}\n  {APP_TITLE} ({NAME})  |  v{VERSION}\n{rule}\n")
}
