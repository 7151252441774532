#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
};


#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NonexistentToken = 2,
    NotOwner = 3,
    NotAuthorized = 4,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Name,
    Symbol,
    NextId,           // monotonic mint counter
    Owner(u64),
    Uri(u64),
    Approved(u64),    // at most one transfer agent per token
}

#[contract]
pub struct PropertyToken;

#[contractimpl]
impl PropertyToken {
    /// One-time initializer recording the collection metadata.
    pub fn initialize(e: Env, name: String, symbol: String) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Name) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Name, &name);
        e.storage().instance().set(&DataKey::Symbol, &symbol);
        e.storage().instance().set(&DataKey::NextId, &0u64);
        Ok(())
    }

    /// Mint the next sequential deed to `to`, recording its metadata URI.
    pub fn mint(e: Env, to: Address, uri: String) -> u64 {
        to.require_auth();

        let id: u64 = e.storage().instance().get(&DataKey::NextId).unwrap_or(0);
        e.storage().persistent().set(&DataKey::Owner(id), &to);
        e.storage().persistent().set(&DataKey::Uri(id), &uri);
        e.storage().instance().set(&DataKey::NextId, &(id + 1));

        e.events().publish((symbol_short!("Minted"), id), to);
        id
    }

    pub fn owner_of(e: Env, token_id: u64) -> Result<Address, Error> {
        e.storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .ok_or(Error::NonexistentToken)
    }

    /// Grant `operator` the right to move `token_id`. Owner only; replaced
    /// by the next `approve` and cleared by any transfer.
    pub fn approve(e: Env, owner: Address, operator: Address, token_id: u64) -> Result<(), Error> {
        owner.require_auth();

        let current: Address = e
            .storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .ok_or(Error::NonexistentToken)?;
        if current != owner {
            return Err(Error::NotOwner);
        }

        e.storage().persistent().set(&DataKey::Approved(token_id), &operator);

        e.events().publish((symbol_short!("Approved"), token_id), operator);
        Ok(())
    }

    pub fn get_approved(e: Env, token_id: u64) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Approved(token_id))
    }

    /// Move `token_id` from `from` to `to`. `spender` must be the current
    /// owner or the approved operator.
    pub fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error> {
        spender.require_auth();

        let owner: Address = e
            .storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .ok_or(Error::NonexistentToken)?;
        if owner != from {
            return Err(Error::NotOwner);
        }
        if spender != owner {
            let approved: Option<Address> =
                e.storage().persistent().get(&DataKey::Approved(token_id));
            if approved != Some(spender) {
                return Err(Error::NotAuthorized);
            }
        }

        e.storage().persistent().set(&DataKey::Owner(token_id), &to);
        e.storage().persistent().remove(&DataKey::Approved(token_id));

        e.events().publish((symbol_short!("Transfer"), token_id), (from, to));
        Ok(())
    }

    pub fn token_uri(e: Env, token_id: u64) -> Result<String, Error> {
        e.storage()
            .persistent()
            .get(&DataKey::Uri(token_id))
            .ok_or(Error::NonexistentToken)
    }

    /// Count of deeds minted so far; also the id the next mint will assign.
    pub fn next_token_id(e: Env) -> u64 {
        e.storage().instance().get(&DataKey::NextId).unwrap_or(0)
    }

    pub fn name(e: Env) -> String {
        e.storage().instance().get(&DataKey::Name).unwrap()
    }

    pub fn symbol(e: Env) -> String {
        e.storage().instance().get(&DataKey::Symbol).unwrap()
    }
}
