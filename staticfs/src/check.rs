use anyhow::Result;
use staticfs_core::config::StaticfsConfig;

pub fn check(path: &str) -> Result<()> {
    let cfg = StaticfsConfig::from_file(path)?;

    println!("✔ Config loaded successfully");
    println!("✔ listening on {}", cfg.listen);
    println!("✔ {} mounts", cfg.mounts.len());
    for mount in &cfg.mounts {
        let prefix = match mount.options.url_prefix.as_str() {
            "" => "/",
            p => p,
        };
        println!(
            "  {prefix} -> {}{}{}",
            mount.root.display(),
            if mount.options.browse { " (browse)" } else { "" },
            if mount.auth_token.is_some() { " (token)" } else { "" },
        );
    }

    Ok(())
}
