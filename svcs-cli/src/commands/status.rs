use anyhow::Result;
use colored::Colorize;
use svcs_core::{FileState, Repository};

pub fn run(repo: &Repository) -> Result<()> {
    let statuses = repo.status()?;

    if statuses.is_empty() {
        println!("{}", "Add a file to the index.".yellow());
        return Ok(());
    }

    let head = repo.log()?.into_iter().next();
    println!("{}", "Repository Status".bold().cyan());
    match &head {
        Some(entry) => println!("  {}: {} {}", "Head".bold(), entry.id.short(), entry.message),
        None => println!("  {}: {}", "Head".bold(), "no commits yet".dimmed()),
    }
    println!();

    let dirty: Vec<_> = statuses.iter().filter(|s| s.state.is_dirty()).collect();
    if dirty.is_empty() {
        println!("{}", "Nothing to commit, tracked files are unchanged".green());
        return Ok(());
    }

    println!(
        "{} {}",
        "Changes since last commit:".bold(),
        format!("({})", dirty.len()).yellow()
    );
    for status in dirty {
        let icon = match status.state {
            FileState::New => "+".green(),
            FileState::Modified => "~".yellow(),
            FileState::Missing => "!".red(),
            FileState::Unchanged => " ".normal(),
        };
        println!(
            "  {} {} {}",
            icon,
            status.path.display(),
            format!("({})", status.state.as_str()).dimmed()
        );
    }

    println!();
    println!("Run {} to commit these changes", "svcs commit \"message\"".cyan());

    Ok(())
}
