use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, context: usize) -> Result<()> {
    let diffs = repo.diff()?;

    if diffs.is_empty() {
        println!("{}", "No changes since last commit".green());
        return Ok(());
    }

    for file_diff in diffs {
        if file_diff.binary {
            println!("{} {}", "Binary file changed:".bold(), file_diff.path);
            println!();
            continue;
        }

        for line in file_diff.format_unified(context).lines() {
            let colored_line = if line.starts_with("+++") || line.starts_with("---") {
                line.bold()
            } else if line.starts_with("@@") {
                line.cyan()
            } else if line.starts_with('+') {
                line.green()
            } else if line.starts_with('-') {
                line.red()
            } else {
                line.normal()
            };
            println!("{}", colored_line);
        }
        println!();
    }

    Ok(())
}
