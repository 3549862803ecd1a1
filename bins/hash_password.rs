//! Print an argon2 PHC hash for `admin.password_hash` / `ADMIN_PASSWORD_HASH`.
//!
//! Usage: `hash_password <password>` or pipe the password on stdin.

use std::io::{self, BufRead};

use anyhow::{bail, Context};

fn read_password() -> anyhow::Result<String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(arg);
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("reading password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> anyhow::Result<()> {
    let password = read_password()?;
    if password.is_empty() {
        bail!("password must not be empty");
    }
    let hash = service::auth::hash_password(&password)?;
    println!("{hash}");
    Ok(())
}
