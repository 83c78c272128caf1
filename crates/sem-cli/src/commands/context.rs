use sem_config::{ConfigLoader, SemConfigFile};
use tracing::info;

use crate::client::{CliError, CliResult};

pub(crate) fn handle_context(loader: &ConfigLoader, name: Option<&str>) -> CliResult<()> {
    let path = loader.config_path()?;
    let Some(mut file) = loader.read_file()? else {
        return Err(CliError::validation(format!(
            "no config file found at {}",
            path.display()
        )));
    };

    let Some(name) = name else {
        print!("{}", context_listing(&file));
        return Ok(());
    };
    file.set_active(name)?;
    loader.write_file(&file)?;
    info!(context = name, "active context switched");
    println!("Switched to context \"{name}\".");
    Ok(())
}

/// One line per context; the active one is marked with `*`.
fn context_listing(file: &SemConfigFile) -> String {
    file.context_names()
        .map(|name| {
            let marker = if name == file.active_context { '*' } else { ' ' };
            format!("{marker} {name}\n")
        })
        .collect()
}
