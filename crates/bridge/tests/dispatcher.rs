// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use async_trait::async_trait;
use config::{Configuration, NetworkConfigs};
use serde_json::{Value, json};
use snap_bridge::Dispatcher;
use snap_bridge::chain::{
    AccountBalance, Block, ChainClient, ChainConnector, ChainError, Header, RuntimeVersion,
    TransactionIndexer, TransactionRecord,
};
use snap_bridge::custody::MemoryKeyCustody;
use snap_bridge::payload::call::{TransferArgs, parse_account};
use snap_bridge::payload::extrinsic::decode_unsigned;
use snap_bridge::payload::{CallIndex, CallIndexTable, CallName, RuntimeCall};
use snap_bridge::store::{MemoryStateStore, StateStore};
use snap_bridge::types::HexHash;
use snap_bridge::utils::{BlockId, decode_hex};
use sp_core::crypto::AccountId32;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

fn call_table() -> CallIndexTable {
    let mut table = CallIndexTable::new();
    table.insert(CallName::BalancesTransfer, CallIndex { pallet: 4, call: 0 });
    table.insert(CallName::DomainsRegisterOperator, CallIndex { pallet: 12, call: 0 });
    table.insert(CallName::DomainsNominateOperator, CallIndex { pallet: 12, call: 1 });
    table.insert(CallName::DomainsDeregisterOperator, CallIndex { pallet: 12, call: 3 });
    table.insert(CallName::DomainsWithdrawStake, CallIndex { pallet: 12, call: 5 });
    table
}

struct FakeChain {
    network: String,
    runtime_version: RuntimeVersion,
    calls: CallIndexTable,
    block_number: AtomicU32,
    nonce: AtomicU32,
    disconnected: AtomicBool,
    submitted: Mutex<Vec<String>>,
}

impl FakeChain {
    fn new(network: &str) -> Self {
        Self {
            network: network.to_string(),
            runtime_version: RuntimeVersion {
                spec_name: "subspace".to_string(),
                spec_version: 5,
                transaction_version: 1,
            },
            calls: call_table(),
            block_number: AtomicU32::new(100),
            nonce: AtomicU32::new(3),
            disconnected: AtomicBool::new(false),
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn check_connected(&self) -> Result<(), ChainError> {
        if self.disconnected.load(Ordering::SeqCst) {
            Err(ChainError::NotConnected)
        } else {
            Ok(())
        }
    }

    fn header(&self) -> Header {
        let number = self.block_number.load(Ordering::SeqCst);
        Header {
            hash: HexHash::from([number as u8; 32]),
            number,
            parent_hash: HexHash::from([number.wrapping_sub(1) as u8; 32]),
            state_root: HexHash::from([0xde; 32]),
            extrinsics_root: HexHash::from([0x12; 32]),
        }
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    fn genesis_hash(&self) -> HexHash {
        // Distinct per network so cross-network payloads are detectable
        HexHash::from([self.network.len() as u8; 32])
    }

    fn runtime_version(&self) -> &RuntimeVersion {
        &self.runtime_version
    }

    fn extrinsic_version(&self) -> u8 {
        4
    }

    fn calls(&self) -> &CallIndexTable {
        &self.calls
    }

    async fn latest_header(&self) -> Result<Header, ChainError> {
        self.check_connected()?;
        Ok(self.header())
    }

    async fn finalized_head(&self) -> Result<HexHash, ChainError> {
        self.check_connected()?;
        Ok(self.header().hash)
    }

    async fn block(&self, id: &BlockId) -> Result<Block, ChainError> {
        self.check_connected()?;
        match id {
            BlockId::Latest => Ok(Block {
                header: self.header(),
                extrinsics: vec!["0x280402000b".to_string()],
            }),
            other => Err(ChainError::BlockNotFound(other.to_string())),
        }
    }

    async fn account_nonce(&self, _address: &str) -> Result<u32, ChainError> {
        self.check_connected()?;
        Ok(self.nonce.load(Ordering::SeqCst))
    }

    async fn account_balance(&self, _account: &AccountId32) -> Result<AccountBalance, ChainError> {
        self.check_connected()?;
        Ok(AccountBalance {
            free: 18_446_744_073_709_551_616_000,
            reserved: 0,
            frozen: 5,
        })
    }

    async fn submit_extrinsic(&self, extrinsic: &str) -> Result<HexHash, ChainError> {
        self.check_connected()?;
        self.submitted.lock().unwrap().push(extrinsic.to_string());
        Ok(HexHash::from([0xee; 32]))
    }

    async fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct CountingConnector {
    clients: Mutex<Vec<Arc<FakeChain>>>,
}

impl CountingConnector {
    fn connects(&self) -> usize {
        self.clients.lock().unwrap().len()
    }

    fn open_connections(&self) -> usize {
        self.clients
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !c.disconnected.load(Ordering::SeqCst))
            .count()
    }

    fn current(&self) -> Arc<FakeChain> {
        self.clients.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ChainConnector for CountingConnector {
    async fn connect(
        &self,
        configuration: &Configuration,
    ) -> Result<Arc<dyn ChainClient>, ChainError> {
        let client = Arc::new(FakeChain::new(&configuration.network_name));
        self.clients.lock().unwrap().push(client.clone());
        Ok(client)
    }
}

#[derive(Default)]
struct FakeIndexer {
    calls: AtomicUsize,
}

#[async_trait]
impl TransactionIndexer for FakeIndexer {
    async fn page(
        &self,
        _url: &str,
        address: &str,
        offset: usize,
        _limit: usize,
    ) -> Result<Vec<TransactionRecord>, ChainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if offset > 0 {
            return Ok(vec![]);
        }
        Ok(vec![TransactionRecord {
            hash: "0x01".to_string(),
            sender: address.to_string(),
            amount: "42".to_string(),
        }])
    }
}

struct Harness {
    dispatcher: Dispatcher,
    connector: Arc<CountingConnector>,
    store: Arc<MemoryStateStore>,
    indexer: Arc<FakeIndexer>,
}

fn harness() -> Harness {
    let connector = Arc::new(CountingConnector::default());
    let store = Arc::new(MemoryStateStore::new());
    let indexer = Arc::new(FakeIndexer::default());
    let dispatcher = Dispatcher::new(
        NetworkConfigs::load().unwrap(),
        connector.clone(),
        Arc::new(MemoryKeyCustody::from_phrase("//Alice").unwrap()),
        store.clone(),
        indexer.clone(),
    );
    Harness {
        dispatcher,
        connector,
        store,
        indexer,
    }
}

fn decode_tx(tx: &Value) -> RuntimeCall {
    let bytes = decode_hex(tx.as_str().unwrap()).unwrap();
    let method = decode_unsigned(&bytes).unwrap();
    RuntimeCall::decode_with(&method, &call_table()).unwrap()
}

#[tokio::test]
async fn test_unknown_method_is_rejected_without_chain_access() {
    let h = harness();

    let err = h
        .dispatcher
        .handle("doSomething", Some(&json!({})))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "UnsupportedOperationError");
    assert_eq!(err.operation, "doSomething");
    assert_eq!(h.connector.connects(), 0);
}

#[tokio::test]
async fn test_invalid_params_never_connect() {
    let h = harness();

    let err = h
        .dispatcher
        .handle("generateTransactionPayload", Some(&json!({ "amount": "1" })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SchemaError");
    assert_eq!(err.operation, "generateTransactionPayload");

    let err = h
        .dispatcher
        .handle(
            "generateTransactionPayload",
            Some(&json!({ "to": "nope", "amount": "1" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BuildError");

    assert_eq!(h.connector.connects(), 0);
}

#[tokio::test]
async fn test_transfer_payload() {
    let h = harness();

    let result = h
        .dispatcher
        .handle(
            "generateTransactionPayload",
            Some(&json!({ "to": BOB, "amount": "1000000000000" })),
        )
        .await
        .unwrap();

    let payload = &result["payload"];
    assert_eq!(payload["address"], "0x0000000");
    assert_eq!(payload["blockNumber"], "0x00000064");
    assert_eq!(payload["era"], "0x4502");
    assert_eq!(payload["nonce"], "0x00000003");
    assert_eq!(payload["specVersion"], "0x00000005");
    assert_eq!(payload["version"], 4);
    assert_eq!(payload["signedExtensions"], json!([]));

    let RuntimeCall::Transfer(TransferArgs { dest, value }) = decode_tx(&result["tx"]) else {
        panic!("expected a transfer");
    };
    assert_eq!(dest, sp_runtime::MultiAddress::Id(parse_account("to", BOB).unwrap()));
    assert_eq!(value, 1_000_000_000_000);

    // payload.method and tx carry the same call
    let method = decode_hex(payload["method"].as_str().unwrap()).unwrap();
    let tx = decode_hex(result["tx"].as_str().unwrap()).unwrap();
    assert_eq!(decode_unsigned(&tx).unwrap(), method);
    assert_eq!(h.connector.connects(), 1);
}

#[tokio::test]
async fn test_numeric_and_string_amounts_encode_identically() {
    let h = harness();

    let numeric = h
        .dispatcher
        .handle(
            "generateNominateOperatorPayload",
            Some(&json!({ "operatorId": "7", "amount": 500 })),
        )
        .await
        .unwrap();
    let string = h
        .dispatcher
        .handle(
            "generateNominateOperatorPayload",
            Some(&json!({ "operatorId": "7", "amount": "500" })),
        )
        .await
        .unwrap();

    assert_eq!(numeric, string);
    assert_eq!(numeric["payload"]["signedExtensions"], json!([]));
    assert_eq!(numeric["payload"]["method"], "0x0c010700000000000000f4010000000000000000000000000000");
}

#[tokio::test]
async fn test_new_snapshot_for_every_build() {
    let h = harness();
    let params = json!({ "operatorId": "7" });

    let first = h
        .dispatcher
        .handle("generateDeregisterOperatorPayload", Some(&params))
        .await
        .unwrap();

    let chain = h.connector.current();
    chain.nonce.store(4, Ordering::SeqCst);
    chain.block_number.store(101, Ordering::SeqCst);

    let second = h
        .dispatcher
        .handle("generateDeregisterOperatorPayload", Some(&params))
        .await
        .unwrap();

    assert_ne!(first["payload"], second["payload"]);
    assert_eq!(second["payload"]["nonce"], "0x00000004");
    assert_eq!(second["payload"]["blockNumber"], "0x00000065");
    // Same call, different signing context
    assert_eq!(first["tx"], second["tx"]);
    assert_eq!(h.connector.connects(), 1);
}

#[tokio::test]
async fn test_staking_payloads() {
    let h = harness();

    let register = h
        .dispatcher
        .handle(
            "generateRegisterOperatorPayload",
            Some(&json!({
                "domainId": "0",
                "amountToStake": "100000000000000000000",
                "values": {
                    "signingKey": "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d",
                    "minimumNominatorStake": "1000000000000000000",
                    "nominationTax": 5
                }
            })),
        )
        .await
        .unwrap();
    let RuntimeCall::RegisterOperator(args) = decode_tx(&register["tx"]) else {
        panic!("expected register_operator");
    };
    assert_eq!(args.domain_id, 0);
    assert_eq!(args.amount, 100_000_000_000_000_000_000);
    assert_eq!(args.config.nomination_tax, sp_runtime::Percent::from_percent(5));

    let withdraw_all = h
        .dispatcher
        .handle("generateWithdrawStakePayload", Some(&json!({ "operatorId": "7" })))
        .await
        .unwrap();
    assert_eq!(withdraw_all["payload"]["method"], "0x0c05070000000000000000");
}

#[tokio::test]
async fn test_sign_and_send() {
    let h = harness();
    h.dispatcher
        .handle("configure", Some(&json!({ "configuration": { "networkName": "devnet" } })))
        .await
        .unwrap();

    let tx_payload = h
        .dispatcher
        .handle(
            "generateTransactionPayload",
            Some(&json!({ "to": BOB, "amount": 1_000u64 })),
        )
        .await
        .unwrap();

    let signature = h
        .dispatcher
        .handle(
            "signPayloadJSON",
            Some(&json!({ "payload": tx_payload["payload"] })),
        )
        .await
        .unwrap();
    let signature = signature["signature"].as_str().unwrap().to_string();
    assert_eq!(decode_hex(&signature).unwrap().len(), 65);

    let sent = h
        .dispatcher
        .handle(
            "send",
            Some(&json!({ "signature": signature, "txPayload": tx_payload })),
        )
        .await
        .unwrap();
    assert_eq!(sent["sender"], ALICE);
    assert_eq!(sent["hash"], format!("0x{}", "ee".repeat(32)));

    let submitted = h.connector.current().submitted.lock().unwrap().clone();
    assert_eq!(submitted.len(), 1);
    let extrinsic = decode_hex(&submitted[0]).unwrap();
    // Two-byte compact length, then the signed v4 marker
    assert_eq!(extrinsic.len(), 142);
    assert_eq!(extrinsic[2], 0x84);
}

#[tokio::test]
async fn test_send_rejects_mismatched_tx() {
    let h = harness();

    let mut tx_payload = h
        .dispatcher
        .handle(
            "generateTransactionPayload",
            Some(&json!({ "to": BOB, "amount": "1" })),
        )
        .await
        .unwrap();
    let other = h
        .dispatcher
        .handle(
            "generateTransactionPayload",
            Some(&json!({ "to": BOB, "amount": "2" })),
        )
        .await
        .unwrap();
    tx_payload["tx"] = other["tx"].clone();

    let err = h
        .dispatcher
        .handle(
            "send",
            Some(&json!({ "signature": format!("0x{}", "11".repeat(64)), "txPayload": tx_payload })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BuildError");
    assert!(h.connector.current().submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_configure_switch_tears_down_one_connection() {
    let h = harness();

    let configured = h
        .dispatcher
        .handle("configure", Some(&json!({ "configuration": { "networkName": "devnet" } })))
        .await
        .unwrap();
    assert_eq!(configured["networkName"], "devnet");
    assert_eq!(h.connector.connects(), 0);

    h.dispatcher.handle("getChainHead", None).await.unwrap();
    assert_eq!(h.connector.connects(), 1);

    h.dispatcher
        .handle(
            "configure",
            Some(&json!({ "configuration": { "networkName": "gemini-3f" } })),
        )
        .await
        .unwrap();

    let clients = h.connector.clients.lock().unwrap().clone();
    assert_eq!(clients.len(), 1);
    assert!(clients[0].disconnected.load(Ordering::SeqCst));
    assert_eq!(h.connector.open_connections(), 0);

    h.dispatcher.handle("getBalance", None).await.unwrap();
    assert_eq!(h.connector.connects(), 2);
    assert_eq!(h.connector.open_connections(), 1);
    assert_eq!(h.connector.current().network, "gemini-3f");

    let stored = h.store.load().await.unwrap().unwrap();
    assert_eq!(stored.network_name, "gemini-3f");
}

#[tokio::test]
async fn test_failed_configure_keeps_previous_state() {
    let h = harness();

    h.dispatcher
        .handle("configure", Some(&json!({ "configuration": { "networkName": "devnet" } })))
        .await
        .unwrap();
    h.dispatcher.handle("getChainHead", None).await.unwrap();

    let err = h
        .dispatcher
        .handle(
            "configure",
            Some(&json!({ "configuration": { "networkName": "gemini-3f", "wsRpcUrl": "nope" } })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SchemaError");

    assert_eq!(h.store.load().await.unwrap().unwrap().network_name, "devnet");
    assert_eq!(h.connector.open_connections(), 1);
}

#[tokio::test]
async fn test_send_after_network_switch_is_rejected() {
    let h = harness();

    let tx_payload = h
        .dispatcher
        .handle(
            "generateTransactionPayload",
            Some(&json!({ "to": BOB, "amount": "1" })),
        )
        .await
        .unwrap();
    let signature = h
        .dispatcher
        .handle("signPayloadJSON", Some(&json!({ "payload": tx_payload["payload"] })))
        .await
        .unwrap();

    h.dispatcher
        .handle("configure", Some(&json!({ "configuration": { "networkName": "devnet" } })))
        .await
        .unwrap();

    let err = h
        .dispatcher
        .handle(
            "send",
            Some(&json!({ "signature": signature["signature"], "txPayload": tx_payload })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BuildError");
}

#[tokio::test]
async fn test_local_operations_work_offline() {
    let h = harness();

    let address = h.dispatcher.handle("getAddress", None).await.unwrap();
    // Default network prefix
    assert_ne!(address, ALICE);

    h.dispatcher
        .handle("configure", Some(&json!({ "configuration": { "networkName": "devnet" } })))
        .await
        .unwrap();
    assert_eq!(h.dispatcher.handle("getAddress", None).await.unwrap(), ALICE);

    assert_eq!(
        h.dispatcher.handle("getPublicKey", Some(&json!({}))).await.unwrap(),
        "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
    );
    assert_eq!(h.dispatcher.handle("exportSeed", None).await.unwrap(), "//Alice");

    let raw = h
        .dispatcher
        .handle(
            "signPayloadRaw",
            Some(&json!({ "payload": { "address": ALICE, "data": "0x1234", "type": "bytes" } })),
        )
        .await
        .unwrap();
    assert_eq!(decode_hex(raw["signature"].as_str().unwrap()).unwrap().len(), 64);

    assert_eq!(h.connector.connects(), 0);
}

#[tokio::test]
async fn test_all_transactions_from_indexer() {
    let h = harness();

    let records = h.dispatcher.handle("getAllTransactions", None).await.unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["amount"], "42");
    assert_eq!(h.indexer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.connector.connects(), 0);

    h.dispatcher
        .handle("configure", Some(&json!({ "configuration": { "networkName": "devnet" } })))
        .await
        .unwrap();
    let err = h
        .dispatcher
        .handle("getAllTransactions", None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ChainUnavailableError");
}

#[tokio::test]
async fn test_chain_reads() {
    let h = harness();

    let balance = h.dispatcher.handle("getBalance", None).await.unwrap();
    assert_eq!(
        balance,
        json!({ "free": "18446744073709551616000", "reserved": "0", "frozen": "5" })
    );

    let block = h
        .dispatcher
        .handle("getBlock", Some(&json!({ "blockTag": "latest" })))
        .await
        .unwrap();
    assert_eq!(block["number"], 100);
    assert_eq!(block["extrinsics"], json!(["0x280402000b"]));

    let err = h
        .dispatcher
        .handle("getBlock", Some(&json!({ "blockTag": 5 })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ChainUnavailableError");

    let err = h
        .dispatcher
        .handle("getBlock", Some(&json!({ "blockTag": "0x12" })))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BuildError");
    assert_eq!(h.connector.connects(), 1);
}
