use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$STMTX_HOME`, else `~/.stmtx`.
pub fn stmtx_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("STMTX_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set (or set STMTX_HOME)")?;
    Ok(PathBuf::from(home).join(".stmtx"))
}

pub fn ensure_stmtx_home() -> Result<PathBuf> {
    let dir = stmtx_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
