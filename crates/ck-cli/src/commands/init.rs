use anyhow::Result;
use std::fs;
use std::path::Path;

/// Creates the configuration file
pub fn execute_init(path: &str) -> Result<()> {
    let config_content = r#"# Directory with one JSON file per contract
data_dir = "data/contracts"

[schedule]
# Number of upcoming payments listed per contract
lookahead = 3
# Payments within this many days are highlighted as due soon
due_soon_days = 7

[migration]
# Write migrated records back into data_dir
write_back = true
# Keep the previous version of each rewritten record as <file>.bak
backup = true

[output]
format = "markdown"
path = ".contract_migration_report.md"
"#;

    let config_path = Path::new(path);
    if config_path.exists() {
        anyhow::bail!("Config file already exists: {}", path);
    }

    fs::write(config_path, config_content)?;
    println!("Created config file: {}", path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn generated_config_loads_once_data_dir_exists() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data/contracts")).unwrap();
        let path = dir.path().join("contract-keeper.toml");
        let path = path.to_str().unwrap();

        execute_init(path).unwrap();
        let config = Config::load(path, None).unwrap();
        assert_eq!(config.schedule.lookahead, 3);
        assert_eq!(config.output.format, "markdown");

        let err = execute_init(path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
