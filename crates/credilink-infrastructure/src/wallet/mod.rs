//! Wallet-side boundary implementations.

mod http_name_resolver;
mod json_rpc_provider;

pub use http_name_resolver::HttpNameResolver;
pub use json_rpc_provider::JsonRpcWalletProvider;
