use anyhow::Result;

use crate::config::Config;
use crate::library::LibrarySource;

pub fn list_sources(config: &Config) -> Result<()> {
    let source = LibrarySource::new(config.library.clone());
    let (status, files) = match source.files() {
        Ok(files) => ("OK", files.len()),
        Err(_) => ("NOT FOUND", 0),
    };

    println!("{:<10} {:<10} {:<6} ROOT", "SOURCE", "STATUS", "FILES");
    println!(
        "{:<10} {:<10} {:<6} {}",
        "library",
        status,
        files,
        source.root().display()
    );
    Ok(())
}
