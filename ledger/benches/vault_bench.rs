// Accounting-path benchmarks for the custodia ledger.
//
// Covers the native deposit/withdraw hot path, token deposits through the
// gateway seam, decimal normalization, and balance lookups at various
// ledger sizes.

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use parking_lot::Mutex;

use custodia_ledger::access::{AllowAll, NeverPaused};
use custodia_ledger::gateway::ProbeError;
use custodia_ledger::{
    decimal, AccountId, AssetGateway, AssetId, OracleConfig, TokenAddress, Vault, VaultConfig,
};

/// Gateway that always succeeds and keeps custody balances in memory.
#[derive(Default)]
struct BenchGateway {
    custody: Mutex<HashMap<TokenAddress, u128>>,
}

impl AssetGateway for BenchGateway {
    fn send_native(&self, _recipient: &AccountId, _amount: u128) -> bool {
        true
    }

    fn pull_token(&self, token: TokenAddress, _owner: &AccountId, amount: u128) -> bool {
        *self.custody.lock().entry(token).or_insert(0) += amount;
        true
    }

    fn push_token(&self, token: TokenAddress, _recipient: &AccountId, amount: u128) -> bool {
        let mut custody = self.custody.lock();
        let balance = custody.entry(token).or_insert(0);
        *balance = balance.saturating_sub(amount);
        true
    }

    fn vault_token_balance(&self, token: TokenAddress) -> u128 {
        self.custody.lock().get(&token).copied().unwrap_or(0)
    }

    fn token_decimals(&self, _token: TokenAddress) -> Result<u32, ProbeError> {
        Ok(6)
    }
}

fn bench_vault() -> Vault {
    Vault::new(
        VaultConfig {
            native_withdrawal_limit: u128::MAX,
            native_capacity: u128::MAX,
            oracle: OracleConfig::default(),
        },
        Arc::new(BenchGateway::default()),
        Arc::new(AllowAll),
        Arc::new(NeverPaused),
    )
    .expect("vault construction")
}

fn bench_native_deposit(c: &mut Criterion) {
    let mut vault = bench_vault();
    let alice = AccountId::new("alice");

    c.bench_function("vault/deposit_native", |b| {
        b.iter(|| vault.deposit_native(&alice, 1));
    });
}

fn bench_native_roundtrip(c: &mut Criterion) {
    let mut vault = bench_vault();
    let alice = AccountId::new("alice");
    vault.deposit_native(&alice, 1_000_000_000).expect("seed deposit");

    c.bench_function("vault/deposit_withdraw_roundtrip", |b| {
        b.iter(|| {
            vault.deposit_native(&alice, 100).expect("deposit");
            vault.withdraw(&alice, AssetId::Native, 100).expect("withdraw");
        });
    });
}

fn bench_token_deposit(c: &mut Criterion) {
    let mut vault = bench_vault();
    let admin = AccountId::new("admin");
    let mut bytes = [0u8; 20];
    bytes[19] = 1;
    let token = TokenAddress::from_bytes(bytes);
    vault
        .add_asset(&admin, token, u128::MAX, u128::MAX)
        .expect("add asset");

    c.bench_function("vault/deposit_token", |b| {
        b.iter(|| vault.deposit_token(&admin, token, 100));
    });
}

fn bench_balance_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("vault/balance_of");
    for users in [100u32, 10_000] {
        let mut vault = bench_vault();
        for i in 0..users {
            let account = AccountId::new(format!("user-{i}"));
            vault.deposit_native(&account, 10).expect("seed deposit");
        }
        let probe = AccountId::new("user-50");

        group.bench_with_input(BenchmarkId::from_parameter(users), &users, |b, _| {
            b.iter(|| vault.balance_of(&probe, AssetId::Native));
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("decimal/normalize_18", |b| {
        b.iter(|| decimal::normalize(18, 1_234_567_891_234_567_890));
    });
}

criterion_group!(
    benches,
    bench_native_deposit,
    bench_native_roundtrip,
    bench_token_deposit,
    bench_balance_lookup,
    bench_normalize
);
criterion_main!(benches);
