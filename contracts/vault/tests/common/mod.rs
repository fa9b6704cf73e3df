#![allow(dead_code)]

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use token_vault::{Revision, TokenVault, TokenVaultClient};

/// One token with 7 decimals.
pub const UNIT: i128 = 10_000_000;
pub const START: u64 = 1_700_000_000;
pub const FEE_BPS: u32 = 500;

pub struct Setup {
    pub env: Env,
    pub vault: TokenVaultClient<'static>,
    pub token: TokenClient<'static>,
    pub admin: Address,
    pub user: Address,
}

impl Setup {
    /// Fresh V1 vault with a 5% deposit fee over a Stellar asset.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|l| l.timestamp = START);

        let admin = Address::generate(&env);
        let user = Address::generate(&env);

        let token_id = env.register_stellar_asset_contract_v2(admin.clone()).address();
        let vault_id = env.register(TokenVault, ());
        let vault = TokenVaultClient::new(&env, &vault_id);
        vault.initialize(&token_id, &admin, &FEE_BPS);

        let token = TokenClient::new(&env, &token_id);
        Setup { env, vault, token, admin, user }
    }

    /// V1 vault where `user` deposited 1000 tokens, upgraded to `revision`.
    pub fn with_deposit_at(revision: Revision) -> Self {
        let s = Self::new();
        s.deposit(&s.user, 1_000 * UNIT);
        if revision > Revision::V1 {
            s.vault.upgrade_to(&s.admin, &Revision::V2);
        }
        if revision > Revision::V2 {
            s.vault.upgrade_to(&s.admin, &Revision::V3);
        }
        s
    }

    pub fn mint(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.token.address).mint(to, &amount);
    }

    pub fn approve(&self, from: &Address, amount: i128) {
        let expiration = self.env.ledger().sequence() + 100;
        self.token.approve(from, &self.vault.address, &amount, &expiration);
    }

    /// Mints, approves and deposits `amount` for `user`; returns the credit.
    pub fn deposit(&self, user: &Address, amount: i128) -> i128 {
        self.mint(user, amount);
        self.approve(user, amount);
        self.vault.deposit(user, &amount)
    }

    pub fn new_user(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|l| l.timestamp += seconds);
    }

    pub fn assert_totals_match(&self, users: &[&Address]) {
        let sum: i128 = users.iter().map(|u| self.vault.balance_of(u)).sum();
        assert_eq!(sum, self.vault.total_deposits(), "sum(balances) != total_deposits");
    }
}
