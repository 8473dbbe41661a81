use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, limit: Option<usize>, json: bool) -> Result<()> {
    let entries = repo.log()?;
    let to_show = limit.unwrap_or(entries.len()).min(entries.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&entries[..to_show])?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No commits yet.".yellow());
        return Ok(());
    }

    for entry in entries.iter().take(to_show) {
        println!(
            "{} {}",
            "commit".yellow().bold(),
            entry.id.to_string().yellow()
        );
        println!("{}: {}", "Author".bold(), entry.author);
        println!("{}", entry.message);
        println!();
    }

    if entries.len() > to_show {
        println!(
            "{}",
            format!("... and {} more commits", entries.len() - to_show).dimmed()
        );
        println!("Use {} to see more", "--limit N".cyan());
    }

    Ok(())
}
