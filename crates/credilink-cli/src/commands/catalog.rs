use credilink_core::wallet::{Chain, WalletConnector};
use strum::IntoEnumIterator;

pub fn connectors(wallet_detected: bool) {
    println!("👛 Wallet connectors:");
    for connector in WalletConnector::iter() {
        let status = match (connector.is_implemented(), connector) {
            (false, _) => "not supported yet",
            (true, WalletConnector::Injected) if !wallet_detected => "no provider detected",
            (true, _) => "available",
        };
        println!(
            "  {:<14} {:<16} {} ({})",
            connector.to_string(),
            connector.display_name(),
            connector.description(),
            status
        );
    }
}

pub fn chains(current: Option<u64>) {
    println!("🌐 Networks:");
    for chain in Chain::iter() {
        let marker = if current == Some(chain.id()) { "*" } else { " " };
        println!("{} {:>5}  {}", marker, chain.id(), chain);
    }
}
