use std::env;

use xtask::tasks::ci::ci;
use xtask::tasks::test::xtest;

fn main() -> Result<(), anyhow::Error> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("ci") => ci(),
        Some("test") => xtest(),
        _ => print_help(),
    }
}

fn print_help() -> anyhow::Result<()> {
    eprintln!(
        r#"
Usage: cargo xtask <task>

Tasks:
  test            runs unit and integration tests (uses nextest if installed)
  ci              runs all necessary checks to avoid CI errors when git pushed
"#
    );

    Ok(())
}
