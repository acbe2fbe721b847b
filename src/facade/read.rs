//! Read operations: no-side-effect calls, formatted for display.

use crate::chain::TokenAmount;
use crate::facade::{observe, parse_address, FacadeError, FacadeResult, TokenFacade};

impl TokenFacade {
    /// Token name as returned by the contract.
    pub async fn token_name(&self) -> FacadeResult<String> {
        observe("token_name", self.fetch_token_name()).await
    }

    /// `"<amount> of <symbol>"`.
    pub async fn total_supply(&self) -> FacadeResult<String> {
        observe("total_supply", self.fetch_total_supply()).await
    }

    /// `"Token Balance of <address> is <amount> <symbol>"`.
    pub async fn token_balance(&self, address: &str) -> FacadeResult<String> {
        observe("token_balance", self.fetch_token_balance(address)).await
    }

    /// Whether `address` holds the contract's minter role.
    pub async fn check_minter_role(&self, address: &str) -> FacadeResult<String> {
        observe("check_minter_role", self.fetch_minter_role(address)).await
    }

    /// Current vote weight of `address`.
    pub async fn votes(&self, address: &str) -> FacadeResult<String> {
        observe("votes", self.fetch_votes(address)).await
    }

    async fn fetch_token_name(&self) -> FacadeResult<String> {
        Ok(self.chain.name().await?)
    }

    async fn fetch_total_supply(&self) -> FacadeResult<String> {
        let (symbol, supply) = tokio::try_join!(self.chain.symbol(), self.chain.total_supply())?;
        Ok(format!("{} of {}", TokenAmount::from_raw(supply), symbol))
    }

    async fn fetch_token_balance(&self, address: &str) -> FacadeResult<String> {
        let account = parse_address(address, FacadeError::Read)?;
        let (symbol, balance) = tokio::try_join!(self.chain.symbol(), self.chain.balance_of(account))?;
        Ok(format!(
            "Token Balance of {} is {} {}",
            address,
            TokenAmount::from_raw(balance),
            symbol
        ))
    }

    async fn fetch_minter_role(&self, address: &str) -> FacadeResult<String> {
        let account = parse_address(address, FacadeError::Read)?;
        // The role id is resolved from the contract, never hardcoded.
        let role = self.chain.minter_role().await?;
        let has_role = self.chain.has_role(role, account).await?;
        let verb = if has_role { "has" } else { "doesn't have" };
        Ok(format!("The address {} the role {}", verb, role))
    }

    async fn fetch_votes(&self, address: &str) -> FacadeResult<String> {
        let account = parse_address(address, FacadeError::Read)?;
        let votes = self.chain.get_votes(account).await?;
        Ok(format!(
            "The address {} has {} votes.",
            address,
            TokenAmount::from_raw(votes)
        ))
    }
}
