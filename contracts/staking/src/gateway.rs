use soroban_sdk::{log, token, Address, Env};

use crate::ContractError;

/// Moves assets in and out of the contract's custody.
///
/// Each call is all-or-nothing: either the full amount moves or the call
/// fails with `TransferFailed` and nothing moved.
pub trait AssetGateway {
    fn transfer_in(&self, asset: &Address, from: &Address, amount: i128)
        -> Result<(), ContractError>;

    fn transfer_out(&self, asset: &Address, to: &Address, amount: i128)
        -> Result<(), ContractError>;
}

/// Gateway backed by Soroban token contracts (SAC or any `TokenInterface`).
pub struct TokenGateway<'a> {
    env: &'a Env,
}

impl<'a> TokenGateway<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        match token::Client::new(self.env, asset).try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "token transfer failed", asset.clone(), amount);
                Err(ContractError::TransferFailed)
            }
        }
    }
}

impl AssetGateway for TokenGateway<'_> {
    fn transfer_in(
        &self,
        asset: &Address,
        from: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        self.transfer(asset, from, &self.env.current_contract_address(), amount)
    }

    fn transfer_out(
        &self,
        asset: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        self.transfer(asset, &self.env.current_contract_address(), to, amount)
    }
}
