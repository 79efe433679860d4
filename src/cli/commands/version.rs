use crate::cli::output::Output;
use crate::errors::Result;

/// Show version information
pub async fn run() -> Result<()> {
    Output::section("navstack");
    Output::sub_item(format!("Version: {}", env!("CARGO_PKG_VERSION")));
    Output::sub_item(format!("Description: {}", env!("CARGO_PKG_DESCRIPTION")));

    Output::section("Build Information");
    Output::sub_item(format!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION")));
    Output::sub_item(format!("Target: {}", std::env::consts::ARCH));
    Output::sub_item(format!("OS: {}", std::env::consts::OS));

    #[cfg(debug_assertions)]
    Output::sub_item("Build type: Debug");
    #[cfg(not(debug_assertions))]
    Output::sub_item("Build type: Release");

    Output::section("Quick Start");
    Output::sub_item("Write default settings: navstack config init");
    Output::sub_item("Replay a script: navstack run script.json");
    Output::sub_item("Show help: navstack --help");

    Ok(())
}
