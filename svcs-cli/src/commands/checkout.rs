use anyhow::Result;
use colored::Colorize;
use svcs_core::{Error, Repository};

pub fn run(repo: &Repository, commit_id: Option<String>) -> Result<()> {
    let Some(commit_id) = commit_id else {
        println!("{}", "Commit id was not passed.".yellow());
        return Ok(());
    };

    match repo.checkout(&commit_id) {
        Ok(restored) => {
            println!("Switched to commit {}.", commit_id.cyan());
            for path in restored {
                println!("  {} {}", "✓".green(), path.display());
            }
        }
        Err(e) if e.is_not_found() => {
            println!("{}", "Commit does not exist.".red());
        }
        Err(Error::AmbiguousCommit(prefix)) => {
            println!(
                "{} {}",
                "Commit id is ambiguous:".red(),
                format!("{} matches more than one commit", prefix).dimmed()
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
