//! Drives the login form against a live server, then logs out.
//!
//! ```text
//! AUTHFORM_LOGIN_URL=http://localhost:5000/api/user/login \
//! AUTHFORM_LOGOUT_URL=http://localhost:5000/api/user/logout \
//! RUST_LOG=authform=debug cargo run --example login -- alice secret
//! ```

use authform::{
    AuthFormController, AuthFormResult, FieldLocator, FieldSelector, InMemoryPage, NativeEvent,
    SubmitOutcome,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AuthFormResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let username = args.next().unwrap_or_default();
    let password = args.next().unwrap_or_default();

    let page = Arc::new(
        InMemoryPage::new()
            .with_field(FieldSelector::new("login", FieldLocator::Id, "username"), username)
            .with_field(FieldSelector::new("login", FieldLocator::Id, "password"), password),
    );

    let controller = AuthFormController::builder()
        .env()?
        .page(page.clone())
        .build()?;

    println!("\n🔑 Login");
    println!("------------------------");
    let mut event = NativeEvent::new();
    match controller.on_login_submit(&mut event).await {
        Ok(SubmitOutcome::Succeeded(_)) => {
            println!("Logged in (page reloaded {} time(s))", page.reload_count())
        }
        Ok(SubmitOutcome::Rejected { status, .. }) => {
            println!("Rejected ({}): {}", status, page.status_text());
            return Ok(());
        }
        Err(e) => {
            println!("Failed: {} / page shows: {}", e, page.status_text());
            return Err(e);
        }
    }

    println!("\n🚪 Logout");
    println!("------------------------");
    controller.on_logout_click(&mut NativeEvent::new()).await?;
    println!("Logged out (page reloaded {} time(s))\n", page.reload_count());

    Ok(())
}
