// Adapters layer: concrete implementations of the domain ports.

pub mod web3forms;

pub use web3forms::Web3FormsRelay;
