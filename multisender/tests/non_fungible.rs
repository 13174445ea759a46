mod common;

use crate::common::{setup, Setup, TOKEN};
use alloy::primitives::{Address, U256};
use multisender::Error;

/// Mints ids 1..WALLETS to the caller, one per recipient.
fn minted() -> (Setup, Vec<U256>) {
    let setup = setup();
    let ids: Vec<U256> = (1..=setup.recipients.len() as u64).map(U256::from).collect();
    for id in &ids {
        setup
            .ledger()
            .mint_non_fungible(TOKEN, setup.caller, *id)
            .expect("mint to caller");
    }
    (setup, ids)
}

fn owners(setup: &Setup, ids: &[U256]) -> Vec<Address> {
    ids.iter()
        .map(|id| setup.ledger().owner_of(TOKEN, *id).expect("minted id"))
        .collect()
}

#[test]
fn send_erc721_successfully() -> eyre::Result<()> {
    let (setup, ids) = minted();
    assert_eq!(setup.ledger().owner_of(TOKEN, U256::from(1))?, setup.caller);
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;

    setup
        .engine
        .send_nonfungible(setup.caller, TOKEN, &setup.recipients, &ids)?;

    assert_eq!(setup.ledger().nft_balance_of(TOKEN, setup.caller), U256::ZERO);
    assert_eq!(owners(&setup, &ids), setup.recipients);
    for recipient in &setup.recipients {
        assert_eq!(
            setup.ledger().nft_balance_of(TOKEN, *recipient),
            U256::from(1)
        );
    }
    Ok(())
}

#[test]
fn send_erc721_failed_without_approval() {
    let (setup, ids) = minted();

    let result = setup
        .engine
        .send_nonfungible(setup.caller, TOKEN, &setup.recipients, &ids);

    assert_eq!(result, Err(Error::NotApproved));
    assert!(owners(&setup, &ids).iter().all(|owner| *owner == setup.caller));
}

#[test]
fn send_erc721_failed_with_different_length() -> eyre::Result<()> {
    let (setup, mut ids) = minted();
    ids.pop();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;

    let result = setup
        .engine
        .send_nonfungible(setup.caller, TOKEN, &setup.recipients, &ids);

    assert_eq!(result, Err(Error::LengthMismatch("recipients and ids")));
    assert!(owners(&setup, &ids).iter().all(|owner| *owner == setup.caller));
    Ok(())
}

#[test]
fn revoked_approval_blocks_the_batch() -> eyre::Result<()> {
    let (setup, ids) = minted();
    let engine = setup.engine.address();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, engine, true)?;
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, engine, false)?;

    let result = setup
        .engine
        .send_nonfungible(setup.caller, TOKEN, &setup.recipients, &ids);

    assert_eq!(result, Err(Error::NotApproved));
    Ok(())
}

#[test]
fn duplicate_id_fails_the_whole_batch() -> eyre::Result<()> {
    let (setup, ids) = minted();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;
    let recipients = &setup.recipients[..3];
    let repeated = [ids[0], ids[1], ids[0]];

    let result = setup
        .engine
        .send_nonfungible(setup.caller, TOKEN, recipients, &repeated);

    // by the third leg id 1 belongs to the first recipient, who approved nobody
    assert_eq!(result, Err(Error::NotApproved));
    assert_eq!(owners(&setup, &ids[..2]), vec![setup.caller; 2]);
    Ok(())
}

#[test]
fn transfer_to_zero_address_is_refused() -> eyre::Result<()> {
    let (setup, ids) = minted();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;

    let result = setup.engine.send_nonfungible(
        setup.caller,
        TOKEN,
        &[setup.recipients[0], Address::ZERO],
        &ids[..2],
    );

    assert_eq!(
        result,
        Err(Error::Ledger(multisender::ledger::Error::ZeroAddress))
    );
    assert_eq!(owners(&setup, &ids[..2]), vec![setup.caller; 2]);
    Ok(())
}
