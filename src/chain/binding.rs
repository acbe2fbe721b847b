//! The fixed contract every facade call targets.
//!
//! The interface is declared with `sol!` and flattened once at startup into a
//! name → [`FunctionSpec`] table. Calls are checked against that table before
//! any network I/O, so a binding that lacks a function the facade relies on
//! fails at construction rather than on first use.

use alloy::json_abi::{Function, JsonAbi, StateMutability};
use alloy::primitives::{address, Address};
use alloy::sol;
use std::collections::BTreeMap;

use crate::chain::types::{ChainError, ChainResult};

/// Address of the deployed token contract on Sepolia.
pub const TOKEN_CONTRACT_ADDRESS: Address = address!("42c75444c0b6a9cc21346feba1dd0bfdd009389b");

sol! {
    /// ERC-20 token with access-controlled minting and vote delegation.
    #[sol(rpc, abi)]
    contract MyToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function MINTER_ROLE() external view returns (bytes32);
        function hasRole(bytes32 role, address account) external view returns (bool);
        function getVotes(address account) external view returns (uint256);
        function mint(address to, uint256 amount) external;
        function delegate(address delegatee) external;
    }
}

/// One entry of the contract interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub signature: String,
    pub selector: [u8; 4],
    pub arity: usize,
    pub mutability: StateMutability,
}

impl From<&Function> for FunctionSpec {
    fn from(function: &Function) -> Self {
        Self {
            name: function.name.clone(),
            signature: function.signature(),
            selector: function.selector().0,
            arity: function.inputs.len(),
            mutability: function.state_mutability,
        }
    }
}

/// Functions the facade invokes; a binding missing any of them is rejected.
const REQUIRED: &[(&str, usize, StateMutability)] = &[
    ("name", 0, StateMutability::View),
    ("symbol", 0, StateMutability::View),
    ("totalSupply", 0, StateMutability::View),
    ("balanceOf", 1, StateMutability::View),
    ("MINTER_ROLE", 0, StateMutability::View),
    ("hasRole", 2, StateMutability::View),
    ("getVotes", 1, StateMutability::View),
    ("mint", 2, StateMutability::NonPayable),
    ("delegate", 1, StateMutability::NonPayable),
];

/// Contract address plus its validated interface description.
#[derive(Debug, Clone)]
pub struct ContractBinding {
    address: Address,
    functions: BTreeMap<String, FunctionSpec>,
}

impl ContractBinding {
    /// Bind the `sol!`-declared token interface at `address`.
    pub fn token(address: Address) -> ChainResult<Self> {
        Self::from_abi(address, &MyToken::abi::contract())
    }

    /// Bind the deployed token contract.
    pub fn deployed() -> ChainResult<Self> {
        Self::token(TOKEN_CONTRACT_ADDRESS)
    }

    /// Build a binding from a JSON ABI, validating it against the calls the
    /// facade makes.
    pub fn from_abi(address: Address, abi: &JsonAbi) -> ChainResult<Self> {
        let mut functions = BTreeMap::new();
        for function in abi.functions() {
            let spec = FunctionSpec::from(function);
            if let Some(previous) = functions.insert(spec.name.clone(), spec) {
                return Err(ChainError::Configuration(format!(
                    "function '{}' is overloaded",
                    previous.name
                )));
            }
        }

        let binding = Self { address, functions };
        for (name, arity, mutability) in REQUIRED {
            binding
                .ensure(name, *arity, *mutability)
                .map_err(|e| ChainError::Configuration(e.to_string()))?;
        }
        Ok(binding)
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Look up a declared function.
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    /// Check that a call matches a declared function.
    pub fn ensure(&self, name: &str, arity: usize, mutability: StateMutability) -> ChainResult<&FunctionSpec> {
        let spec = self
            .function(name)
            .ok_or_else(|| ChainError::InvalidCall(format!("'{}' is not declared by the contract", name)))?;
        if spec.arity != arity {
            return Err(ChainError::InvalidCall(format!(
                "'{}' takes {} argument(s), got {}",
                spec.signature, spec.arity, arity
            )));
        }
        if spec.mutability != mutability {
            return Err(ChainError::InvalidCall(format!(
                "'{}' is {:?}, not {:?}",
                spec.signature, spec.mutability, mutability
            )));
        }
        Ok(spec)
    }
}
