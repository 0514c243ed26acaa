use std::process::{Command, ExitStatus};

use owo_colors::OwoColorize;

use crate::{
    project_root,
    tasks::test::{run_integration_test, run_unit_test},
};

pub fn ci() -> Result<(), anyhow::Error> {
    println!("Running `cargo check`...");
    let check = cargo(&["check", "--workspace", "--all-targets"])?;

    println!("Running `cargo clippy`...");
    let clippy = cargo(&["clippy", "--workspace", "--all-targets"])?;

    println!("Running unit tests...");
    let unit_test = run_unit_test()?;

    println!("Running integration tests...");
    let integration_test = run_integration_test()?;

    println!("Running `cargo deny`...");
    let audit = cargo(&["deny", "check"])?;

    println!("Running `cargo fmt`...");
    let fmt = cargo(&["fmt", "--all", "--check"])?;

    print_error_with_status_code("cargo check", check);
    print_error_with_status_code("cargo clippy", clippy);
    print_error_with_status_code("unit tests", unit_test);
    print_error_with_status_code("integration tests", integration_test);
    print_error_with_status_code("cargo deny", audit);
    print_error_with_status_code("cargo fmt", fmt);

    println!("CI checks complete.");
    Ok(())
}

fn cargo(args: &[&str]) -> Result<ExitStatus, anyhow::Error> {
    let status = Command::new("cargo")
        .current_dir(project_root())
        .args(args)
        .status()?;
    Ok(status)
}

fn print_error_with_status_code(task: &str, status: ExitStatus) {
    let code = match status.code() {
        Some(x) => x.to_string(),
        None => "<< no status code >>".to_string(),
    };
    if !status.success() {
        println!(
            "{} `{}` finished with a non-zero status code: {}",
            "Error:".to_string().red(),
            task.blue(),
            code
        );
    }
}
