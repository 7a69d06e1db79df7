#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use tenure_staking::{TenureStakingContract, TenureStakingContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64 },
    Withdraw { amount: u64 },
    ClaimRewards,
    EmergencyWithdraw,
    UpdateRate { rate: u32 },
    Wait { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(TenureStakingContract, ());
    let client = TenureStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &stake_token, &reward_token, &1_000i128);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i128::MAX);

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    for user in &users {
        StellarAssetClient::new(&env, &stake_token).mint(user, &i128::from(u64::MAX));
    }

    let mut now = 0u64;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(caller, &i128::from(amount));
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw(caller, &i128::from(amount));
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(caller);
            }
            FuzzAction::EmergencyWithdraw => {
                let _ = client.try_emergency_withdraw(caller);
            }
            FuzzAction::UpdateRate { rate } => {
                let _ = client.try_update_reward_rate(&admin, &i128::from(rate));
            }
            FuzzAction::Wait { seconds } => {
                now = now.saturating_add(u64::from(seconds));
                env.ledger().set_timestamp(now);
            }
        }

        // Conservation must hold after every action, successful or not.
        let total: i128 = users
            .iter()
            .map(|u| client.get_position(u).amount)
            .sum();
        assert_eq!(client.get_total_staked(), total);
    }
});
