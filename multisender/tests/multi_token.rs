mod common;

use crate::common::{setup, units, Setup, TOKEN};
use alloy::primitives::U256;
use multisender::Error;

const IDS: [u64; 5] = [1, 2, 3, 4, 5];

/// Mints 1000000 units of ids 1 to 5 to the caller and spreads the ids over the recipients.
fn minted() -> (Setup, Vec<U256>, Vec<U256>) {
    let setup = setup();
    let ids: Vec<U256> = IDS.iter().map(|id| U256::from(*id)).collect();
    setup
        .ledger()
        .mint_multi_token_batch(TOKEN, setup.caller, &ids, &[units(1_000_000); 5])
        .expect("mint to caller");

    let token_ids = (1..=setup.recipients.len() as u64)
        .map(|i| U256::from(i % 5 + 1))
        .collect();
    let values = vec![units(100); setup.recipients.len()];
    (setup, token_ids, values)
}

#[test]
fn send_erc1155_successfully() -> eyre::Result<()> {
    let (setup, token_ids, values) = minted();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;

    setup.engine.send_multitoken(
        setup.caller,
        TOKEN,
        &setup.recipients,
        &token_ids,
        &values,
    )?;

    assert_eq!(
        setup
            .ledger()
            .multi_token_balance_of(TOKEN, setup.recipients[0], U256::from(2)),
        units(100)
    );
    for (recipient, id) in setup.recipients.iter().zip(&token_ids) {
        assert_eq!(
            setup.ledger().multi_token_balance_of(TOKEN, *recipient, *id),
            units(100)
        );
    }
    // 19 legs over 5 ids: id 1 is hit 3 times, the others 4 times
    let sent_of = |id: u64| units(100) * U256::from(if id == 1 { 3_u64 } else { 4_u64 });
    for id in IDS {
        assert_eq!(
            setup
                .ledger()
                .multi_token_balance_of(TOKEN, setup.caller, U256::from(id)),
            units(1_000_000) - sent_of(id)
        );
    }
    Ok(())
}

#[test]
fn repeated_recipient_and_id_accumulate() -> eyre::Result<()> {
    let (setup, _, _) = minted();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;
    let recipient = setup.recipients[0];
    let id = U256::from(3);

    setup.engine.send_multitoken(
        setup.caller,
        TOKEN,
        &[recipient, recipient, recipient],
        &[id, id, id],
        &[units(1), units(2), units(3)],
    )?;

    assert_eq!(
        setup.ledger().multi_token_balance_of(TOKEN, recipient, id),
        units(6)
    );
    Ok(())
}

#[test]
fn send_erc1155_failed_without_approval() {
    let (setup, token_ids, values) = minted();

    let result = setup.engine.send_multitoken(
        setup.caller,
        TOKEN,
        &setup.recipients,
        &token_ids,
        &values,
    );

    assert_eq!(result, Err(Error::NotApproved));
    for id in IDS {
        assert_eq!(
            setup
                .ledger()
                .multi_token_balance_of(TOKEN, setup.caller, U256::from(id)),
            units(1_000_000)
        );
    }
}

#[test]
fn send_erc1155_failed_with_different_lengths() -> eyre::Result<()> {
    let (setup, mut token_ids, mut values) = minted();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;

    values.pop();
    let result = setup.engine.send_multitoken(
        setup.caller,
        TOKEN,
        &setup.recipients,
        &token_ids,
        &values,
    );
    assert_eq!(result, Err(Error::LengthMismatch("recipients and values")));

    token_ids.pop();
    let result = setup.engine.send_multitoken(
        setup.caller,
        TOKEN,
        &setup.recipients,
        &token_ids,
        &values,
    );
    assert_eq!(result, Err(Error::LengthMismatch("recipients and ids")));
    Ok(())
}

#[test]
fn late_leg_without_balance_rolls_back_earlier_legs() -> eyre::Result<()> {
    let (setup, _, _) = minted();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, setup.engine.address(), true)?;
    let recipients = &setup.recipients[..2];

    let result = setup.engine.send_multitoken(
        setup.caller,
        TOKEN,
        recipients,
        &[U256::from(1), U256::from(9)],
        &[units(5), units(1)],
    );

    assert!(matches!(
        result,
        Err(Error::Ledger(
            multisender::ledger::Error::InsufficientBalance { .. }
        ))
    ));
    assert!(setup
        .ledger()
        .multi_token_balance_of(TOKEN, recipients[0], U256::from(1))
        .is_zero());
    Ok(())
}

#[test]
fn approval_granted_before_minting_covers_a_contract_with_both_kinds() -> eyre::Result<()> {
    let setup = setup();
    let engine = setup.engine.address();
    setup
        .ledger()
        .set_approval_for_all(TOKEN, setup.caller, engine, true)?;
    setup
        .ledger()
        .mint_non_fungible(TOKEN, setup.caller, U256::from(42))?;
    setup
        .ledger()
        .mint_multi_token_batch(TOKEN, setup.caller, &[U256::from(1)], &[units(10)])?;

    setup.engine.send_multitoken(
        setup.caller,
        TOKEN,
        &setup.recipients[..2],
        &[U256::from(1), U256::from(1)],
        &[units(4), units(6)],
    )?;

    assert_eq!(
        setup
            .ledger()
            .multi_token_balance_of(TOKEN, setup.recipients[1], U256::from(1)),
        units(6)
    );
    assert_eq!(
        setup
            .ledger()
            .multi_token_balance_of(TOKEN, setup.caller, U256::from(1)),
        U256::ZERO
    );
    Ok(())
}
