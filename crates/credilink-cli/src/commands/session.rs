use anyhow::Result;
use credilink_core::session::{
    OAuthProvider, ProfileUpdate, Session, SessionEvent, SessionManager, UserRole,
};
use credilink_core::wallet::{WalletConnector, chain_label, format_address};
use tokio::sync::broadcast;

/// Prints the notifications an operation published.
fn print_notifications(events: &mut broadcast::Receiver<SessionEvent>) {
    while let Ok(event) = events.try_recv() {
        let icon = if event.is_error() { "❌" } else { "✅" };
        println!("{} {}: {}", icon, event.title(), event.description());
    }
}

fn print_session(session: &Session) {
    println!("👤 {}", session.name);
    println!("   Role:     {}", session.role());
    if session.is_wallet_session() {
        println!(
            "   Wallet:   {}",
            format_address(session.address(), session.ens_name())
        );
    }
    if let Some(email) = session.email() {
        println!("   Email:    {}", email);
    }
    if let Some(chain_id) = session.chain_id() {
        println!("   Network:  {}", chain_label(chain_id));
    }
    if session.is_verified() {
        println!("   🛡️  Verified");
    }
    if let Some(bio) = &session.bio {
        println!("   Bio:      {}", bio);
    }
    if let Some(company) = &session.company {
        println!("   Company:  {}", company);
    }
    if let Some(experience) = &session.experience {
        println!("   Level:    {}", experience);
    }
    if let Some(skills) = session.skills.as_ref().filter(|s| !s.is_empty()) {
        println!("   Skills:   {}", skills.join(", "));
    }
}

pub async fn login(
    manager: &SessionManager,
    connector: WalletConnector,
    role: UserRole,
) -> Result<()> {
    let mut events = manager.subscribe_events();
    println!("🔗 Connecting {} as a {}...", connector.display_name(), role.as_noun());

    let result = manager.login(connector, role).await;
    print_notifications(&mut events);
    print_session(&result?);
    Ok(())
}

pub async fn oauth(
    manager: &SessionManager,
    provider: OAuthProvider,
    role: UserRole,
) -> Result<()> {
    let mut events = manager.subscribe_events();

    let result = manager.login_with_oauth(provider, role).await;
    print_notifications(&mut events);
    print_session(&result?);
    Ok(())
}

pub async fn logout(manager: &SessionManager) -> Result<()> {
    let mut events = manager.subscribe_events();
    let was_logged_in = manager.current().is_some();

    manager.logout().await?;
    print_notifications(&mut events);
    if !was_logged_in {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn whoami(manager: &SessionManager, json: bool) -> Result<()> {
    match manager.current() {
        Some(session) if json => println!("{}", serde_json::to_string_pretty(&session)?),
        Some(session) => print_session(&session),
        None => println!("Not logged in."),
    }
    Ok(())
}

pub async fn profile(manager: &SessionManager, update: ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    let mut events = manager.subscribe_events();

    match manager.update_profile(update).await? {
        Some(session) => {
            print_notifications(&mut events);
            print_session(&session);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

pub async fn switch_chain(manager: &SessionManager, chain_id: u64) -> Result<()> {
    let mut events = manager.subscribe_events();

    let result = manager.switch_chain(chain_id).await;
    print_notifications(&mut events);
    if result?.is_none() {
        println!("Not logged in.");
    }
    Ok(())
}

pub async fn resolve(manager: &SessionManager, query: &str) {
    match manager.lookup_name(query).await {
        Some(answer) => println!("{} → {}", query.trim(), answer),
        None => println!("No match for {}.", query.trim()),
    }
}
