#![allow(dead_code)]

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{address, Address, U256};
use multisender::ledger::InMemoryLedger;
use multisender::utils::dummy_address;
use multisender::{Config, MultiSender};

/// Signers on a default local node; the first one sends, the rest receive.
pub const WALLETS: usize = 20;

pub const TOKEN: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");

pub struct Setup {
    pub engine: MultiSender<InMemoryLedger>,
    pub caller: Address,
    pub recipients: Vec<Address>,
}

impl Setup {
    pub fn ledger(&self) -> &InMemoryLedger {
        self.engine.ledger()
    }
}

/// `n` whole units of an 18 decimals asset.
#[allow(clippy::unwrap_used)]
pub fn units(n: u64) -> U256 {
    parse_ether(&n.to_string()).unwrap()
}

/// A fresh engine with a caller holding 10000 units of native currency and
/// `WALLETS - 1` empty recipients.
pub fn setup() -> Setup {
    let ledger = InMemoryLedger::new();
    let caller = dummy_address();
    ledger.set_native_balance(caller, units(10_000));
    let recipients = (1..WALLETS).map(|_| dummy_address()).collect();

    Setup {
        engine: MultiSender::new(ledger, Config::default()),
        caller,
        recipients,
    }
}

pub fn native_balances(ledger: &InMemoryLedger, accounts: &[Address]) -> Vec<U256> {
    accounts
        .iter()
        .map(|account| ledger.native_balance_of(*account))
        .collect()
}
