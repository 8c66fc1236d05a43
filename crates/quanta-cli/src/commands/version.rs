//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum computing from the terminal",
        style("Quanta").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quanta-circuit  Circuit-builder model and wire types");
    println!("  quanta-client   Service client, circuit session, quiz and glossary");
    println!("  quanta-cli      Command-line interface");
    println!();
    println!(
        "Default service: {}",
        style(quanta_client::DEFAULT_BASE_URL).underlined()
    );
    println!("License:         {}", style("Apache-2.0").dim());
}
