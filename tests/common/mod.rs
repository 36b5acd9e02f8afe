#![allow(dead_code)]

use certify::ledger::{Address, LedgerContext, adapters::MemoryAdapter};
use certify::{CertificateMinter, MintConfig};
use std::sync::{Arc, Once};

pub const APP_ID: u64 = 4_242;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct TestEnv {
    pub adapter: Arc<MemoryAdapter>,
    pub minter: CertificateMinter,
    pub issuer: Address,
}

pub fn setup() -> TestEnv {
    setup_with(MintConfig::default())
}

pub fn setup_with(config: MintConfig) -> TestEnv {
    init_tracing();

    let adapter = Arc::new(MemoryAdapter::new());
    let ctx = LedgerContext::new(adapter.clone());
    let minter = CertificateMinter::with_config(APP_ID, ctx, config);
    let issuer = Address::from_seed("issuer");

    adapter.fund(issuer, 10_000_000).unwrap();
    adapter.fund(minter.address(), 10_000_000).unwrap();

    TestEnv {
        adapter,
        minter,
        issuer,
    }
}
