use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env};
use tenure_staking::{TenureStakingContract, TenureStakingContractClient};

pub const DAY: u64 = 86_400;

pub struct Pool {
    pub env: Env,
    pub client: TenureStakingContractClient<'static>,
    pub admin: Address,
    pub stake_token: Address,
}

/// Deploys the ledger at t=0 with two fresh SAC tokens and a reward pool
/// large enough for any generated scenario.
pub fn deploy(reward_rate: i128) -> Pool {
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
    client.initialize(&admin, &stake_token, &reward_token, &reward_rate);

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i128::from(u64::MAX));

    Pool {
        env,
        client,
        admin,
        stake_token,
    }
}

pub fn staker(pool: &Pool, balance: i128) -> Address {
    let staker = Address::generate(&pool.env);
    StellarAssetClient::new(&pool.env, &pool.stake_token).mint(&staker, &balance);
    staker
}
