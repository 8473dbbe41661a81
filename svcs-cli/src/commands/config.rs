use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, name: Option<String>) -> Result<()> {
    match name {
        Some(name) => {
            repo.set_identity(&name)?;
            println!("The username is {}.", name.bold());
        }
        None => {
            let name = repo.get_identity()?;
            if name.is_empty() {
                println!("{}", "Please, tell me who you are.".yellow());
            } else {
                println!("The username is {}.", name.bold());
            }
        }
    }

    Ok(())
}
