use soroban_sdk::{symbol_short, Address, Env, Map, Symbol};

use crate::types::{Error, Listing};

fn k_admin() -> Symbol { symbol_short!("admin") }
fn k_registry() -> Symbol { symbol_short!("registry") }
fn k_payment() -> Symbol { symbol_short!("payment") }
fn k_listings() -> Symbol { symbol_short!("listings") }
fn k_lenders() -> Symbol { symbol_short!("lenders") }
fn k_inspectors() -> Symbol { symbol_short!("inspect") }

pub fn has_admin(e: &Env) -> bool {
    e.storage().instance().has(&k_admin())
}

pub fn put_admin(e: &Env, admin: &Address) {
    e.storage().instance().set(&k_admin(), admin);
}

pub fn get_admin(e: &Env) -> Result<Address, Error> {
    e.storage().instance().get(&k_admin()).ok_or(Error::NotInitialized)
}

pub fn put_registry(e: &Env, registry: &Address) {
    e.storage().instance().set(&k_registry(), registry);
}

pub fn get_registry(e: &Env) -> Result<Address, Error> {
    e.storage().instance().get(&k_registry()).ok_or(Error::NotInitialized)
}

pub fn put_payment_token(e: &Env, token: &Address) {
    e.storage().instance().set(&k_payment(), token);
}

pub fn get_payment_token(e: &Env) -> Result<Address, Error> {
    e.storage().instance().get(&k_payment()).ok_or(Error::NotInitialized)
}

pub fn get_listings(e: &Env) -> Map<u64, Listing> {
    e.storage().instance().get(&k_listings()).unwrap_or(Map::new(e))
}

pub fn put_listings(e: &Env, listings: &Map<u64, Listing>) {
    e.storage().instance().set(&k_listings(), listings);
}

pub fn get_lenders(e: &Env) -> Map<Address, bool> {
    e.storage().instance().get(&k_lenders()).unwrap_or(Map::new(e))
}

pub fn put_lenders(e: &Env, lenders: &Map<Address, bool>) {
    e.storage().instance().set(&k_lenders(), lenders);
}

pub fn get_inspectors(e: &Env) -> Map<Address, bool> {
    e.storage().instance().get(&k_inspectors()).unwrap_or(Map::new(e))
}

pub fn put_inspectors(e: &Env, inspectors: &Map<Address, bool>) {
    e.storage().instance().set(&k_inspectors(), inspectors);
}

pub fn is_lender(e: &Env, account: &Address) -> bool {
    get_lenders(e).get(account.clone()).unwrap_or(false)
}

pub fn is_inspector(e: &Env, account: &Address) -> bool {
    get_inspectors(e).get(account.clone()).unwrap_or(false)
}
