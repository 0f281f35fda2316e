//! Operator utility to activate or deactivate a user account.
//!
//! Deactivated users keep their records but fail every authenticated
//! request with 403 until reactivated. superAdmin accounts cannot be
//! toggled from here, so an operator cannot lock out the last admin.
//!
//! ```sh
//! cargo run --bin set-user-status -- agent@example.com deactivate
//! ```

use anyhow::{bail, Context};

use leadhub_core::roles::ROLE_SUPER_ADMIN;
use leadhub_db::repositories::{RoleRepo, UserRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(action)) = (args.next(), args.next()) else {
        bail!("Usage: set-user-status <email> <activate|deactivate>");
    };

    let active = match action.as_str() {
        "activate" => true,
        "deactivate" => false,
        other => bail!("Unknown action '{other}', expected activate or deactivate"),
    };

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = leadhub_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    let Some(user) = UserRepo::find_by_email(&pool, &email).await? else {
        bail!("User with email {email} not found.");
    };

    let role = RoleRepo::resolve_name(&pool, user.role_id).await?;
    if role == ROLE_SUPER_ADMIN {
        bail!("SuperAdmin Cannot be Deactivated");
    }

    UserRepo::set_active(&pool, user.id, active).await?;

    println!(
        "User with email {email} is now {}.",
        if active { "activated" } else { "deactivated" }
    );

    Ok(())
}
