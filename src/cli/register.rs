//! Register command - creates one user in a fresh in-memory store

use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::user::Gender;
use crate::infrastructure::user::{
    Argon2Hasher, CreateUserRequest, InMemoryUserRepository, UserService,
};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// 11-character phone number
    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub password: String,

    /// Switches to full registration
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub family: String,
}

pub async fn run(config: &AppConfig, args: RegisterArgs) -> anyhow::Result<()> {
    let service = UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2Hasher::new()),
    )
    .with_min_password_length(config.users.min_password_length);

    let user = match args.email {
        Some(email) => {
            service
                .create(CreateUserRequest {
                    name: args.name,
                    family: args.family,
                    phone_number: args.phone,
                    email,
                    password: args.password,
                    gender: Gender::None,
                })
                .await?
        }
        None => service.register(&args.phone, &args.password).await?,
    };

    info!(user_id = %user.id(), "Registration complete");
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}
