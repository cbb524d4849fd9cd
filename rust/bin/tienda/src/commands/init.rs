//! `tienda init`: write a config file with every default spelled out.

use std::path::Path;

use anyhow::Result;

use crate::config::TiendaConfig;

pub fn run(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    TiendaConfig::default().save(config_path)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        run(&path, false).unwrap();
        assert!(run(&path, false).is_err());
        run(&path, true).unwrap();
        assert_eq!(TiendaConfig::load(&path).unwrap(), TiendaConfig::default());
    }
}
