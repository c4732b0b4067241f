use std::sync::Arc;

use base64::Engine;

use ledger_exchange::apdu::{minimal_bytes, P2Flags, Rate, SubCommand};
use ledger_exchange::fields::{FieldValue, TxFields};
use ledger_exchange::{Curve, Error, ExchangeClient, SigningAuthority, Version};

mod helpers;
use helpers::{init_logger, test_ca, MockTransport};

fn swap_fields() -> TxFields {
    let mut fields = TxFields::new();
    fields.insert(
        "payin_address".into(),
        FieldValue::text("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"),
    );
    fields.insert(
        "refund_address".into(),
        FieldValue::text("1F1tAaz5x1HUXrCNLbtMDqcw6o5GNn4xqX"),
    );
    fields.insert(
        "payout_address".into(),
        FieldValue::text("0xd692Cb1346262F584D17B4B470954501f6715a82"),
    );
    fields.insert("currency_from".into(), FieldValue::text("BTC"));
    fields.insert("currency_to".into(), FieldValue::text("ETH"));
    fields.insert(
        "amount_to_provider".into(),
        FieldValue::bytes(minimal_bytes(0x013f_c3a7_17fb_5000)),
    );
    fields.insert(
        "amount_to_wallet".into(),
        FieldValue::bytes(minimal_bytes(0x0446_739f_7896_0000)),
    );
    fields
}

#[tokio::test(flavor = "multi_thread")]
async fn swap_ng_flow() -> Result<(), Error> {
    init_logger();

    let transport = Arc::new(MockTransport::new());

    let device_id = [0x42u8; 32];
    transport.push_reply(&[3, 2, 1], 0x9000);
    transport.push_reply(&device_id, 0x9000);
    transport.push_ok(7);

    let client = ExchangeClient::new(transport.clone(), Rate::Floating, SubCommand::SwapNg);
    let spec = client.spec();

    let version = client.get_version().await?;
    assert_eq!(
        version,
        Version {
            major: 3,
            minor: 2,
            patch: 1
        }
    );

    let transaction_id = client.start_new_transaction().await?;
    assert_eq!(transaction_id, device_id.to_vec());

    let partner = SigningAuthority::new(Curve::Secp256r1, "SWAP_NG_Partner");
    let credentials = spec.credentials(&partner);
    client.set_partner_key(&credentials).await?;
    client.check_partner_key(&test_ca().sign(&credentials)).await?;

    let transaction = spec.craft(&swap_fields(), &transaction_id)?;
    client.process_transaction(&spec.frame(&transaction, 100)?).await?;
    client
        .check_transaction_signature(&spec.sign_and_encode(&partner, &transaction)?)
        .await?;

    client
        .check_payout_address(vec![0x11; 40], P2Flags::empty())
        .await_result()
        .await?;
    client
        .check_refund_address(vec![0x22; 40])
        .await_result()
        .await?;
    client.start_signing_transaction().await?;

    let sent = transport.sent();
    let instructions: Vec<u8> = sent.iter().map(|c| c.ins).collect();
    assert_eq!(
        instructions,
        vec![0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]
    );

    for command in &sent {
        assert_eq!(command.cla, 0xE0);
        assert_eq!(command.p1, 0x01);
        // SWAP_NG in the high nibble, no chunk flags anywhere
        assert_eq!(command.p2, 0x30);
    }

    // Framed proposal: base64url marker, u16 length, payload, 1-byte fee
    let framed = &sent[4].data;
    assert_eq!(framed[0], 0x01);
    let tx_len = u16::from_be_bytes([framed[1], framed[2]]) as usize;
    assert_eq!(framed.len(), 3 + tx_len + 2);
    assert_eq!(&framed[3 + tx_len..], &[0x01, 0x64]);
    assert!(base64::engine::general_purpose::URL_SAFE
        .decode(&framed[3..3 + tx_len])
        .is_ok());

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn legacy_swap_flow() -> Result<(), Error> {
    init_logger();

    let transport = Arc::new(MockTransport::new());

    transport.push_reply(b"ABCDEF0123", 0x9000);
    transport.push_ok(4);

    let client = ExchangeClient::new(transport.clone(), Rate::Fixed, SubCommand::Swap);
    let spec = client.spec();

    let transaction_id = client.start_new_transaction().await?;
    assert_eq!(transaction_id, b"ABCDEF0123".to_vec());

    let partner = SigningAuthority::new(Curve::Secp256k1, "Default name");
    let credentials = spec.credentials(&partner);
    client.set_partner_key(&credentials).await?;
    client.check_partner_key(&test_ca().sign(&credentials)).await?;

    let transaction = spec.craft(&swap_fields(), &transaction_id)?;
    client.process_transaction(&spec.frame(&transaction, 100)?).await?;
    client
        .check_transaction_signature(&spec.sign_and_encode(&partner, &transaction)?)
        .await?;

    let sent = transport.sent();
    for command in &sent {
        assert_eq!(command.p1, 0x00);
        assert_eq!(command.p2, 0x00);
    }

    // Legacy framing: 1-byte length, raw protobuf, 1-byte fee length
    let framed = &sent[3].data;
    let tx_len = framed[0] as usize;
    assert_eq!(framed.len(), 1 + tx_len + 2);
    assert_eq!(&framed[1 + tx_len..], &[0x01, 0x64]);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_proposal_is_chunked() -> Result<(), Error> {
    init_logger();

    let transport = Arc::new(MockTransport::new());
    transport.push_ok(3);

    let client = ExchangeClient::new(transport.clone(), Rate::Floating, SubCommand::SellNg);

    // 601-byte framed payload splits 255 / 255 / 91
    let payload = vec![0xAB; 601];
    client.process_transaction(&payload).await?;

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);

    let sizes: Vec<usize> = sent.iter().map(|c| c.data.len()).collect();
    assert_eq!(sizes, vec![255, 255, 91]);

    // SELL_NG nibble plus MORE on all but the last frame, EXTEND on
    // all but the first
    let p2s: Vec<u8> = sent.iter().map(|c| c.p2).collect();
    assert_eq!(p2s, vec![0x41, 0x43, 0x42]);

    let mut reassembled = Vec::new();
    for command in &sent {
        reassembled.extend_from_slice(&command.data);
    }
    assert_eq!(reassembled, payload);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn refusal_and_device_errors() {
    init_logger();

    let transport = Arc::new(MockTransport::new());
    transport.push_reply(&[], 0x6A84);
    transport.push_reply(&[], 0x9D1A);
    transport.push_reply(&[], 0x6A87);

    let client = ExchangeClient::new(transport, Rate::Fixed, SubCommand::Swap);

    let res = client
        .check_refund_address(vec![0x22; 16])
        .await_result()
        .await;
    assert!(matches!(res, Err(Error::UserRefused)));

    let res = client.check_transaction_signature(&[0u8; 70]).await;
    assert!(matches!(res, Err(Error::SignVerificationFail)));

    let res = client.start_signing_transaction().await;
    assert!(matches!(res, Err(Error::Device(0x6A87))));
}

#[tokio::test(flavor = "multi_thread")]
async fn transaction_id_width_is_checked() {
    init_logger();

    let transport = Arc::new(MockTransport::new());
    // Legacy id on an NG flow
    transport.push_reply(b"ABCDEF0123", 0x9000);

    let client = ExchangeClient::new(transport, Rate::Fixed, SubCommand::SwapNg);
    assert!(matches!(
        client.start_new_transaction().await,
        Err(Error::InvalidAnswer)
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn challenge_is_four_bytes() -> Result<(), Error> {
    init_logger();

    let transport = Arc::new(MockTransport::new());
    transport.push_reply(&[0xDE, 0xAD, 0xBE, 0xEF], 0x9000);
    transport.push_reply(&[0x01, 0x02], 0x9000);

    let client = ExchangeClient::new(transport.clone(), Rate::Floating, SubCommand::SwapNg);

    assert_eq!(client.get_challenge().await?, [0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(transport.sent()[0].ins, 0x10);

    assert!(matches!(
        client.get_challenge().await,
        Err(Error::InvalidAnswer)
    ));

    Ok(())
}
