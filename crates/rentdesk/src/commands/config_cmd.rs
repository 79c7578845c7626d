//! Configuration command handlers (no backend session required).

use dialoguer::{Confirm, Input};

use rentdesk_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Profiles => profiles(global),
        ConfigCommand::Use { name } => use_profile(&name, global),
        ConfigCommand::SetPassword { profile } => set_password(profile, global),
    }
}

// ── Init ────────────────────────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = rentdesk_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if cfg.profiles.contains_key(&profile_name)
        && !Confirm::new()
            .with_prompt(format!("Profile '{profile_name}' exists. Overwrite?"))
            .default(false)
            .interact()
            .map_err(dialoguer_io)?
    {
        return Ok(());
    }

    let server: String = Input::new()
        .with_prompt("Backend URL")
        .default("http://localhost:5000".into())
        .interact_text()
        .map_err(dialoguer_io)?;

    let username: String = Input::new()
        .with_prompt("Operator username")
        .interact_text()
        .map_err(dialoguer_io)?;

    let store_password = Confirm::new()
        .with_prompt("Store the password in the system keyring now?")
        .default(true)
        .interact()
        .map_err(dialoguer_io)?;

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            server,
            username: Some(username),
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            metrics_interval: None,
            pending_interval: None,
        },
    );
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }

    rentdesk_config::save_config(&cfg).map_err(config_err)?;
    eprintln!(
        "Profile '{profile_name}' written to {}",
        rentdesk_config::config_path().display()
    );

    if store_password {
        set_password(Some(profile_name), global)?;
    }
    Ok(())
}

// ── Show / Profiles / Use ───────────────────────────────────────────

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = rentdesk_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    eprintln!("Config file: {}", rentdesk_config::config_path().display());
    eprintln!("Active profile: {profile_name}");

    match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            eprintln!("  server:   {}", profile.server);
            eprintln!(
                "  username: {}",
                profile.username.as_deref().unwrap_or("(not set)")
            );
            eprintln!(
                "  password: {}",
                if profile.password.is_some() {
                    "(plaintext in config -- prefer the keyring)"
                } else {
                    "(keyring or RENTDESK_PASSWORD)"
                }
            );
            if let Some(metrics) = profile.metrics_interval {
                eprintln!("  metrics interval: {metrics}s");
            }
            if let Some(pending) = profile.pending_interval {
                eprintln!("  pending interval: {pending}s");
            }
        }
        None => eprintln!("  (profile not defined)"),
    }
    Ok(())
}

fn profiles(_global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = rentdesk_config::load_config_or_default();
    let default = cfg.default_profile.as_deref().unwrap_or("");

    if cfg.profiles.is_empty() {
        eprintln!("No profiles configured. Run: rentdesk config init");
        return Ok(());
    }

    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        if name == default {
            println!("{name} (default)");
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

fn use_profile(name: &str, _global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = rentdesk_config::load_config_or_default();

    if !cfg.profiles.contains_key(name) {
        let mut available: Vec<&String> = cfg.profiles.keys().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: name.to_owned(),
            available: available
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    cfg.default_profile = Some(name.to_owned());
    rentdesk_config::save_config(&cfg).map_err(config_err)?;
    eprintln!("Default profile set to '{name}'");
    Ok(())
}

// ── Set password ────────────────────────────────────────────────────

fn set_password(profile: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = rentdesk_config::load_config_or_default();
    let profile_name = profile.unwrap_or_else(|| active_profile_name(global, &cfg));

    let password = rpassword::prompt_password(format!("Password for '{profile_name}': "))?;

    let entry = keyring::Entry::new("rentdesk", &format!("{profile_name}/password"))
        .map_err(keyring_err)?;
    entry.set_password(&password).map_err(keyring_err)?;

    eprintln!("Password stored in the system keyring.");
    Ok(())
}

// ── Error helpers ───────────────────────────────────────────────────

fn dialoguer_io(err: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(err))
}

fn keyring_err(err: keyring::Error) -> CliError {
    CliError::Validation {
        field: "keyring".into(),
        reason: err.to_string(),
    }
}

fn config_err(err: rentdesk_config::ConfigError) -> CliError {
    CliError::Validation {
        field: "config".into(),
        reason: err.to_string(),
    }
}
