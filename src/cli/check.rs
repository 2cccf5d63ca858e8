//! Check command - format rules without any uniqueness lookup

use clap::Args;

use crate::domain::user::{is_valid_email, is_valid_phone_number, PHONE_NUMBER_LENGTH};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub email: Option<String>,
}

pub fn run(args: &CheckArgs) -> anyhow::Result<()> {
    let mut problems = Vec::new();

    if !is_valid_phone_number(&args.phone) {
        problems.push(format!(
            "phone number must be exactly {} characters",
            PHONE_NUMBER_LENGTH
        ));
    }
    if let Some(email) = &args.email {
        if !is_valid_email(email) {
            problems.push(format!("'{}' is not a valid email", email));
        }
    }

    if problems.is_empty() {
        println!("ok");
        Ok(())
    } else {
        anyhow::bail!(problems.join("; "))
    }
}
