use std::path::Path;

use anyhow::Result;

use lintsift::config::Config;

use crate::exitcodes;

pub fn run() -> Result<i32> {
    let path = Path::new(".lintsift.toml");
    if path.exists() {
        eprintln!("Config file already exists: {}", path.display());
        return Ok(exitcodes::SUCCESS);
    }
    std::fs::write(path, Config::default_toml())?;
    println!("Created {}", path.display());
    Ok(exitcodes::SUCCESS)
}
