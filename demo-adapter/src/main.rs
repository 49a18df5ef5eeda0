use chrono::{Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authjs_sqlx_adapter::{Account, AccountType, Adapter, NewUser, Session, SqlAdapter};

/// Runs one sign-in round trip against the database named by
/// `GENERIC_DATA_STORE_TYPE` / `GENERIC_DATA_STORE_URL`.
///
/// The tables must already exist; the adapter only checks them.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,authjs_sqlx_adapter=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let adapter = SqlAdapter::from_env()?;
    adapter.init().await?;

    let user = adapter
        .create_user(NewUser {
            name: Some("Demo User".to_string()),
            ..NewUser::new(format!("demo-{}@example.com", Utc::now().timestamp()))
        })
        .await?;
    tracing::info!(user_id = %user.id, "Created user");

    let provider_account_id = format!("demo-{}", user.id);
    adapter
        .link_account(Account {
            scope: Some("openid email".to_string()),
            ..Account::new(&user.id, AccountType::Oidc, "demo", &provider_account_id)
        })
        .await?;

    let session_token = format!("demo-session-{}", user.id);
    adapter
        .create_session(Session {
            session_token: session_token.clone(),
            user_id: user.id.clone(),
            expires: Utc::now() + Duration::days(30),
        })
        .await?;

    let by_account = adapter
        .get_user_by_account("demo", &provider_account_id)
        .await?;
    tracing::info!(found = by_account.is_some(), "Looked up user by account");

    if let Some(found) = adapter.get_session_and_user(&session_token).await? {
        tracing::info!(
            user_id = %found.user.id,
            expires = %found.session.expires,
            "Session resolved"
        );
    }

    adapter.delete_user(&user.id).await?;
    let gone = adapter.get_session_and_user(&session_token).await?.is_none();
    tracing::info!(session_removed = gone, "Deleted user");

    Ok(())
}
