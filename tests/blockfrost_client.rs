//! Blockfrost client against a mock HTTP backend.

use std::sync::{Arc, Mutex};

use cardano_address_splitter::blockchain::{
    AssetAmount, BlockchainError, BlockfrostClient, ChainApi,
};
use cardano_address_splitter::config::BlockfrostConfig;

mod common;
use common::{start_programmable_backend, MockRequest};

fn client_for(addr: std::net::SocketAddr) -> BlockfrostClient {
    BlockfrostClient::new(&BlockfrostConfig {
        api_url: format!("http://{}/api/v0", addr),
        project_id: "preprodtest".into(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_address_utxos_and_auth_header() {
    let seen = Arc::new(Mutex::new(Vec::<MockRequest>::new()));
    let recorder = seen.clone();
    let addr = start_programmable_backend(move |req| {
        recorder.lock().unwrap().push(req);
        async move {
            (
                200,
                r#"[
                    {"tx_hash": "aa", "output_index": 1, "amount": [{"unit": "lovelace", "quantity": "1500000"}]},
                    {"tx_hash": "bb", "output_index": 0, "amount": [{"unit": "lovelace", "quantity": "2500000"}]}
                ]"#
                .to_string(),
            )
        }
    })
    .await;

    let utxos = client_for(addr).address_utxos("addr_test1abc").await.unwrap();
    assert_eq!(utxos.len(), 2);
    assert_eq!(utxos[0].reference().to_string(), "aa#1");
    assert_eq!(utxos[1].amount, vec![AssetAmount::lovelace(2_500_000)]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/api/v0/addresses/addr_test1abc/utxos?count=100&page=1");
    assert_eq!(seen[0].headers.get("project_id").map(String::as_str), Some("preprodtest"));
}

fn utxo_page(prefix: &str, len: usize) -> String {
    let items: Vec<String> = (0..len)
        .map(|i| {
            format!(
                r#"{{"tx_hash": "{}{:03}", "output_index": 0, "amount": [{{"unit": "lovelace", "quantity": "1000000"}}]}}"#,
                prefix, i
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

#[tokio::test]
async fn test_address_utxos_follows_pages() {
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let recorder = seen.clone();
    let addr = start_programmable_backend(move |req| {
        recorder.lock().unwrap().push(req.path.clone());
        async move {
            if req.path.ends_with("page=1") {
                (200, utxo_page("a", 100))
            } else if req.path.ends_with("page=2") {
                (200, utxo_page("b", 50))
            } else {
                (200, "[]".to_string())
            }
        }
    })
    .await;

    let utxos = client_for(addr).address_utxos("addr_test1abc").await.unwrap();
    assert_eq!(utxos.len(), 150);
    assert_eq!(utxos[0].tx_hash, "a000");
    assert_eq!(utxos[100].tx_hash, "b000");

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "/api/v0/addresses/addr_test1abc/utxos?count=100&page=1",
            "/api/v0/addresses/addr_test1abc/utxos?count=100&page=2",
        ]
    );
}

#[tokio::test]
async fn test_full_last_page_ends_on_empty_page() {
    let requests = Arc::new(Mutex::new(0u32));
    let counter = requests.clone();
    let addr = start_programmable_backend(move |req| {
        *counter.lock().unwrap() += 1;
        async move {
            if req.path.ends_with("page=1") {
                (200, utxo_page("a", 100))
            } else {
                (200, "[]".to_string())
            }
        }
    })
    .await;

    let utxos = client_for(addr).address_utxos("addr_test1abc").await.unwrap();
    assert_eq!(utxos.len(), 100);
    assert_eq!(*requests.lock().unwrap(), 2);
}

#[tokio::test]
async fn test_unknown_address_has_no_utxos() {
    let addr = start_programmable_backend(|_| async {
        (
            404,
            r#"{"status_code": 404, "error": "Not Found", "message": "The requested component has not been found."}"#
                .to_string(),
        )
    })
    .await;

    let utxos = client_for(addr).address_utxos("addr_test1new").await.unwrap();
    assert!(utxos.is_empty());
}

#[tokio::test]
async fn test_error_body_maps_to_api_error() {
    let addr = start_programmable_backend(|_| async {
        (
            403,
            r#"{"status_code": 403, "error": "Forbidden", "message": "Invalid project token."}"#.to_string(),
        )
    })
    .await;

    let err = client_for(addr).info().await.unwrap_err();
    match err {
        BlockchainError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid project token.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_latest_block_slot() {
    let addr = start_programmable_backend(|req| async move {
        assert_eq!(req.path, "/api/v0/blocks/latest");
        (
            200,
            r#"{"hash": "4ea1ba291e8eef538635a53e59fddba7810d1679631cc3aed7c8e6c4091a516a", "height": 4000000, "slot": 50000000, "epoch": 120}"#
                .to_string(),
        )
    })
    .await;

    let block = client_for(addr).latest_block().await.unwrap();
    assert_eq!(block.slot, Some(50_000_000));
    assert_eq!(block.height, Some(4_000_000));
}

#[tokio::test]
async fn test_submit_sends_raw_cbor() {
    let seen = Arc::new(Mutex::new(Vec::<MockRequest>::new()));
    let recorder = seen.clone();
    let addr = start_programmable_backend(move |req| {
        recorder.lock().unwrap().push(req);
        async {
            (
                200,
                "\"d1662b24fa9fe985fc2dce47455df399cb2e31e1e1819339e885801cc3578908\"".to_string(),
            )
        }
    })
    .await;

    let cbor = vec![0x84, 0xa4, 0x00, 0x81];
    let hash = client_for(addr).submit_transaction(cbor.clone()).await.unwrap();
    assert_eq!(
        hash,
        "d1662b24fa9fe985fc2dce47455df399cb2e31e1e1819339e885801cc3578908"
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/api/v0/tx/submit");
    assert_eq!(
        seen[0].headers.get("content-type").map(String::as_str),
        Some("application/cbor")
    );
    assert_eq!(seen[0].body, cbor);
}

#[tokio::test]
async fn test_submit_rejection() {
    let addr = start_programmable_backend(|_| async {
        (
            400,
            r#"{"status_code": 400, "error": "Bad Request", "message": "transaction submit error"}"#.to_string(),
        )
    })
    .await;

    let err = client_for(addr).submit_transaction(vec![0x00]).await.unwrap_err();
    assert!(matches!(err, BlockchainError::Api { status: 400, .. }));
}

#[tokio::test]
async fn test_transaction_lookup() {
    let addr = start_programmable_backend(|req| async move {
        if req.path.ends_with("/txs/f00dcafe") {
            (
                200,
                r#"{"hash": "f00dcafe", "block": "aa", "block_height": 123, "slot": 50000100, "fees": "171485"}"#
                    .to_string(),
            )
        } else {
            (404, r#"{"status_code": 404, "error": "Not Found", "message": "missing"}"#.to_string())
        }
    })
    .await;

    let client = client_for(addr);
    let found = client.transaction("f00dcafe").await.unwrap().unwrap();
    assert_eq!(found.hash, "f00dcafe");
    assert_eq!(found.block_height, Some(123));

    assert!(client.transaction("deadbeef").await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let addr = start_programmable_backend(|_| async { (200, "not json".to_string()) }).await;
    let err = client_for(addr).latest_block().await.unwrap_err();
    assert!(matches!(err, BlockchainError::Decode(_)));
}
