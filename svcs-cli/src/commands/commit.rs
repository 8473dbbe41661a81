use anyhow::{Context, Result};
use colored::Colorize;
use svcs_core::{CommitOutcome, Repository};

pub fn run(repo: &Repository, message: Option<String>) -> Result<()> {
    let Some(message) = message else {
        println!("{}", "Message was not passed.".yellow());
        return Ok(());
    };

    if repo.list_tracked()?.is_empty() && repo.log()?.is_empty() {
        tracing::warn!("Nothing is tracked; the first commit will be empty");
    }

    let outcome = repo.commit(&message).context("Commit failed")?;

    match outcome {
        CommitOutcome::Created(id) => {
            println!("{}", "Changes are committed.".green().bold());
            println!("  {}: {}", "Commit ID".bold(), id);
            println!("  {}: {}", "Message".bold(), message);
        }
        CommitOutcome::NoOp => {
            println!("{}", "Nothing to commit.".yellow());
        }
    }

    Ok(())
}
