//! Useradd command - provisions accounts in the credential file.

use std::{collections::HashMap, io::ErrorKind};

use vellum::{
    CredentialStore,
    auth::{AuthError, crypto},
};

use crate::cli::UseraddArgs;

/// Add an account to the credential file, or reset its password.
pub async fn run(args: &UseraddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = CredentialStore::new(&args.users_file);

    // A missing file is a first run; any other load failure is fatal.
    let mut accounts = match store.load().await {
        Ok(accounts) => accounts,
        Err(vellum::Error::Auth(AuthError::Unreadable { ref source, .. }))
            if source.kind() == ErrorKind::NotFound =>
        {
            HashMap::new()
        }
        Err(e) => return Err(e.into()),
    };

    let hash = crypto::hash_password(&args.password)?;
    let replaced = accounts.insert(args.username.clone(), hash).is_some();

    let json = serde_json::to_string_pretty(&accounts)?;
    tokio::fs::write(&args.users_file, json).await?;

    if replaced {
        println!(
            "Updated password for '{}' in {}",
            args.username,
            args.users_file.display()
        );
    } else {
        println!("Added '{}' to {}", args.username, args.users_file.display());
    }

    Ok(())
}
