use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::client::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    verify: Option<bool>,
}

pub(crate) fn load_config(
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    verify: Option<bool>,
) -> Result<ClientConfig> {
    resolve(url, username, password, verify, |key| std::env::var(key).ok())
}

/// [`load_config`] with the environment supplied by `env`.
fn resolve(
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    verify: Option<bool>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig> {
    let mut url = url.or_else(|| env("METEOMATICS_URL"));
    let mut username = username.or_else(|| env("METEOMATICS_USERNAME"));
    let mut password = password.or_else(|| env("METEOMATICS_PASSWORD"));
    let mut file_verify: Option<bool> = None;

    for rc_path in rc_candidates(env("METEOMATICS_RC")) {
        if rc_path.exists() {
            let cfg = read_rc(&rc_path).with_context(|| {
                format!("failed to read configuration file {}", rc_path.display())
            })?;
            log::debug!("using configuration file {}", rc_path.display());

            url = url.or(cfg.url);
            username = username.or(cfg.username);
            password = password.or(cfg.password);
            file_verify = cfg.verify;
            break;
        }
    }

    if username.is_some() != password.is_some() {
        anyhow::bail!(
            "Incomplete credentials: set both METEOMATICS_USERNAME and METEOMATICS_PASSWORD (or `username:`/`password:` in .meteomaticsrc)"
        );
    }

    Ok(ClientConfig {
        url: url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        username,
        password,
        verify: verify.or(file_verify).unwrap_or(true),
    })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rc(&text))
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // Support formatting where `password:` is on one line and the value on the next.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            if !line.contains(':') {
                set_value(&mut cfg, pk, strip_quotes(line));
                continue;
            }
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            match k {
                "url" | "username" | "password" if v.is_empty() => {
                    pending_key = Some(k);
                }
                "url" | "username" | "password" => set_value(&mut cfg, k, v),
                "verify" => {
                    if !v.is_empty() {
                        cfg.verify = Some(v != "0");
                    }
                }
                _ => {}
            }
        }
    }

    cfg
}

fn set_value(cfg: &mut RcConfig, key: &str, value: &str) {
    let value = Some(value.to_string());
    match key {
        "url" => cfg.url = value,
        "username" => cfg.username = value,
        "password" => cfg.password = value,
        _ => {}
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn rc_candidates(explicit: Option<String>) -> Vec<PathBuf> {
    // 1) METEOMATICS_RC (explicit)
    // 2) ./.meteomaticsrc
    // 3) ~/.meteomaticsrc
    if let Some(p) = explicit {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".meteomaticsrc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".meteomaticsrc"));
    }
    v
}
