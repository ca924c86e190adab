//! CLI argument definitions for the vellum binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vellum file-backed content management server
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(about = "Vellum: a small file-backed content management service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the vellum server
    Serve(ServeArgs),
    /// Add or update an account in the credential file
    Useradd(UseraddArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "VELLUM_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "VELLUM_HOST")]
    pub host: String,

    /// Directory holding the documents (created if absent)
    #[arg(short = 'D', long, default_value = "data", env = "VELLUM_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Path of the JSON credential file
    #[arg(short, long, default_value = "users.json", env = "VELLUM_USERS_FILE")]
    pub users_file: PathBuf,
}

/// Arguments for the useradd command
#[derive(clap::Args, Debug)]
pub struct UseraddArgs {
    /// Username to add or update
    pub username: String,

    /// Password to hash and store
    pub password: String,

    /// Path of the JSON credential file (created if absent)
    #[arg(short, long, default_value = "users.json", env = "VELLUM_USERS_FILE")]
    pub users_file: PathBuf,
}
