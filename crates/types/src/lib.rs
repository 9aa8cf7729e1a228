mod contract_ref;
mod devnet;
mod identifiers;

pub use contract_ref::ContractRef;
pub use devnet::DevnetAction;
pub use identifiers::ContractIdentifiers;
