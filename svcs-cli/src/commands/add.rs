use anyhow::Result;
use colored::Colorize;
use svcs_core::{Error, Repository};

pub fn run(repo: &Repository, file: Option<String>) -> Result<()> {
    let Some(file) = file else {
        return list(repo);
    };

    match repo.track(&file) {
        Ok(()) => println!("The file '{}' is tracked.", file.green()),
        Err(e) if e.is_not_found() => println!("{}", format!("Can't find '{}'.", file).red()),
        Err(Error::InvalidPath(reason)) => {
            println!("{} {}", "Can't track:".red(), reason);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn list(repo: &Repository) -> Result<()> {
    let tracked = repo.list_tracked()?;

    if tracked.is_empty() {
        println!("{}", "Add a file to the index.".yellow());
        return Ok(());
    }

    println!("{}", "Tracked files:".bold());
    for path in tracked {
        println!("{}", path.display());
    }

    Ok(())
}
