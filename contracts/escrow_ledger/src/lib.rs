#![no_std]
use soroban_sdk::{
    contract, contractclient, contractimpl, symbol_short, token, Address, Env, Map,
};

mod storage;
mod types;


pub use types::{Error, Listing};

/// Deed-registry capabilities this contract consumes. The registry address
/// is fixed at `initialize`; only this surface is relied upon.
#[contractclient(name = "PropertyTokenClient")]
pub trait PropertyTokenInterface {
    fn owner_of(env: Env, token_id: u64) -> Address;
    fn get_approved(env: Env, token_id: u64) -> Option<Address>;
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u64);
}

#[contract]
pub struct EscrowLedger;

#[contractimpl]
impl EscrowLedger {
    /// One-time initializer recording the admin and the collaborating
    /// contract addresses (deed registry, payment token).
    pub fn initialize(
        e: Env,
        admin: Address,
        property_token: Address,
        payment_token: Address,
    ) -> Result<(), Error> {
        if storage::has_admin(&e) {
            return Err(Error::AlreadyInitialized);
        }
        storage::put_admin(&e, &admin);
        storage::put_registry(&e, &property_token);
        storage::put_payment_token(&e, &payment_token);
        Ok(())
    }

    // ---- role registry, admin only ----

    /// Register `account` as a lender. Re-adding is a no-op success.
    pub fn add_lender(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut lenders = storage::get_lenders(&e);
        if lenders.get(account.clone()).unwrap_or(false) {
            return Ok(());
        }
        lenders.set(account.clone(), true);
        storage::put_lenders(&e, &lenders);
        e.events().publish((symbol_short!("LenderAdd"),), account);
        Ok(())
    }

    pub fn remove_lender(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut lenders = storage::get_lenders(&e);
        if !lenders.contains_key(account.clone()) {
            return Ok(());
        }
        lenders.remove(account.clone());
        storage::put_lenders(&e, &lenders);
        e.events().publish((symbol_short!("LenderRem"),), account);
        Ok(())
    }

    /// Register `account` as an inspector. Re-adding is a no-op success.
    pub fn add_inspector(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut inspectors = storage::get_inspectors(&e);
        if inspectors.get(account.clone()).unwrap_or(false) {
            return Ok(());
        }
        inspectors.set(account.clone(), true);
        storage::put_inspectors(&e, &inspectors);
        e.events().publish((symbol_short!("InspAdd"),), account);
        Ok(())
    }

    pub fn remove_inspector(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut inspectors = storage::get_inspectors(&e);
        if !inspectors.contains_key(account.clone()) {
            return Ok(());
        }
        inspectors.remove(account.clone());
        storage::put_inspectors(&e, &inspectors);
        e.events().publish((symbol_short!("InspRem"),), account);
        Ok(())
    }

    // ---- listing lifecycle ----

    /// Create an escrow listing for `token_id` and take custody of the deed.
    /// The seller must own the token and must already have approved this
    /// contract as its transfer agent on the registry; both are verified
    /// against the registry, never assumed.
    pub fn list(
        e: Env,
        seller: Address,
        token_id: u64,
        listing_price: i128,
        down_payment: i128,
    ) -> Result<(), Error> {
        seller.require_auth();

        let mut listings = storage::get_listings(&e);
        if let Some(existing) = listings.get(token_id) {
            if existing.is_listed {
                return Err(Error::AlreadyListed);
            }
        }
        if listing_price <= 0 || down_payment < 0 || down_payment > listing_price {
            return Err(Error::InvalidTerms);
        }

        let registry = PropertyTokenClient::new(&e, &storage::get_registry(&e)?);
        let me = e.current_contract_address();
        if registry.owner_of(&token_id) != seller {
            return Err(Error::Unauthorized);
        }
        if registry.get_approved(&token_id) != Some(me.clone()) {
            return Err(Error::NotApproved);
        }

        listings.set(
            token_id,
            Listing {
                seller: seller.clone(),
                listing_price,
                down_payment,
                is_listed: true,
                inspected: false,
                lender_approved: false,
                lender_paid: false,
                escrow_amount: 0,
                lender: None,
            },
        );
        storage::put_listings(&e, &listings);

        registry.transfer_from(&me, &seller, &me, &token_id);

        e.events().publish(
            (symbol_short!("Listed"), token_id),
            (seller, listing_price, down_payment),
        );
        Ok(())
    }

    /// Mark the listing as inspected. Inspector role required. Idempotent:
    /// a repeat call succeeds without re-publishing the event.
    pub fn inspect_property(e: Env, inspector: Address, token_id: u64) -> Result<(), Error> {
        inspector.require_auth();
        if !storage::is_inspector(&e, &inspector) {
            return Err(Error::Unauthorized);
        }

        let mut listings = storage::get_listings(&e);
        let mut listing = Self::active_listing(&listings, token_id)?;
        if listing.inspected {
            return Ok(());
        }
        listing.inspected = true;
        listings.set(token_id, listing);
        storage::put_listings(&e, &listings);

        e.events().publish((symbol_short!("Inspected"), token_id), inspector);
        Ok(())
    }

    /// Record the lender's approval of the sale. Lender role required.
    /// Listing-wide flag; any prospective buyer benefits. Idempotent.
    pub fn approve_property(e: Env, lender: Address, token_id: u64) -> Result<(), Error> {
        lender.require_auth();
        if !storage::is_lender(&e, &lender) {
            return Err(Error::Unauthorized);
        }

        let mut listings = storage::get_listings(&e);
        let mut listing = Self::active_listing(&listings, token_id)?;
        if listing.lender_approved {
            return Ok(());
        }
        listing.lender_approved = true;
        listings.set(token_id, listing);
        storage::put_listings(&e, &listings);

        e.events().publish((symbol_short!("Approved"), token_id), lender);
        Ok(())
    }

    /// Fund the loan principal into escrow custody. One deposit per episode;
    /// the depositor is recorded as the refund target. Funds are pulled only
    /// after every precondition has passed.
    pub fn deposit_lend_money(
        e: Env,
        lender: Address,
        token_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        lender.require_auth();
        if !storage::is_lender(&e, &lender) {
            return Err(Error::Unauthorized);
        }

        let mut listings = storage::get_listings(&e);
        let mut listing = Self::active_listing(&listings, token_id)?;
        if !listing.lender_approved {
            return Err(Error::NotApproved);
        }
        if listing.lender_paid {
            return Err(Error::AlreadyPaid);
        }
        if amount <= 0 {
            return Err(Error::InsufficientValue);
        }

        let payment = token::Client::new(&e, &storage::get_payment_token(&e)?);

        listing.escrow_amount += amount;
        listing.lender_paid = true;
        listing.lender = Some(lender.clone());
        listings.set(token_id, listing);
        storage::put_listings(&e, &listings);

        payment.transfer(&lender, &e.current_contract_address(), &amount);

        e.events().publish((symbol_short!("Funded"), token_id), (lender, amount));
        Ok(())
    }

    /// Settle the purchase: the buyer's down payment joins escrow, the deed
    /// moves to the buyer and the full custody balance goes to the seller.
    /// Listing state is finalized before any external transfer.
    pub fn buy_property(e: Env, buyer: Address, token_id: u64, amount: i128) -> Result<(), Error> {
        buyer.require_auth();

        let mut listings = storage::get_listings(&e);
        let listing = Self::active_listing(&listings, token_id)?;
        if !listing.inspected || !listing.lender_approved {
            return Err(Error::PreconditionsNotMet);
        }
        if amount <= 0 || amount < listing.down_payment {
            return Err(Error::InsufficientValue);
        }
        let proceeds = listing.escrow_amount + amount;
        if proceeds < listing.listing_price {
            return Err(Error::PreconditionsNotMet);
        }

        let registry = PropertyTokenClient::new(&e, &storage::get_registry(&e)?);
        let payment = token::Client::new(&e, &storage::get_payment_token(&e)?);
        let me = e.current_contract_address();
        let seller = listing.seller.clone();

        listings.set(token_id, Self::closed(&listing));
        storage::put_listings(&e, &listings);

        payment.transfer(&buyer, &me, &amount);
        registry.transfer_from(&me, &me, &buyer, &token_id);
        payment.transfer(&me, &seller, &proceeds);

        e.events().publish(
            (symbol_short!("Sold"), token_id),
            (buyer, seller, proceeds),
        );
        Ok(())
    }

    /// Abort the listing from any pre-settlement state: whatever was
    /// deposited goes back to its depositor and the deed returns to the
    /// seller. Listing state is finalized before any external transfer.
    pub fn cancel_listing(e: Env, seller: Address, token_id: u64) -> Result<(), Error> {
        seller.require_auth();

        let mut listings = storage::get_listings(&e);
        let listing = Self::active_listing(&listings, token_id)?;
        if listing.seller != seller {
            return Err(Error::Unauthorized);
        }

        let registry = PropertyTokenClient::new(&e, &storage::get_registry(&e)?);
        let me = e.current_contract_address();
        let refund = listing.escrow_amount;
        let depositor = listing.lender.clone();

        listings.set(token_id, Self::closed(&listing));
        storage::put_listings(&e, &listings);

        if refund > 0 {
            if let Some(depositor) = depositor {
                let payment = token::Client::new(&e, &storage::get_payment_token(&e)?);
                payment.transfer(&me, &depositor, &refund);
            }
        }
        registry.transfer_from(&me, &me, &seller, &token_id);

        e.events().publish((symbol_short!("Cancelled"), token_id), (seller, refund));
        Ok(())
    }

    // ---- read-only accessors ----

    pub fn is_listed(e: Env, token_id: u64) -> bool {
        storage::get_listings(&e).get(token_id).map_or(false, |l| l.is_listed)
    }

    pub fn inspected(e: Env, token_id: u64) -> bool {
        storage::get_listings(&e).get(token_id).map_or(false, |l| l.inspected)
    }

    pub fn lender_approved(e: Env, token_id: u64) -> bool {
        storage::get_listings(&e).get(token_id).map_or(false, |l| l.lender_approved)
    }

    pub fn lender_paid(e: Env, token_id: u64) -> bool {
        storage::get_listings(&e).get(token_id).map_or(false, |l| l.lender_paid)
    }

    pub fn listing_price(e: Env, token_id: u64) -> i128 {
        storage::get_listings(&e).get(token_id).map_or(0, |l| l.listing_price)
    }

    pub fn down_payment(e: Env, token_id: u64) -> i128 {
        storage::get_listings(&e).get(token_id).map_or(0, |l| l.down_payment)
    }

    pub fn escrow_amount(e: Env, token_id: u64) -> i128 {
        storage::get_listings(&e).get(token_id).map_or(0, |l| l.escrow_amount)
    }

    pub fn seller(e: Env, token_id: u64) -> Option<Address> {
        storage::get_listings(&e).get(token_id).map(|l| l.seller)
    }

    pub fn get_listing(e: Env, token_id: u64) -> Option<Listing> {
        storage::get_listings(&e).get(token_id)
    }

    pub fn is_lender(e: Env, account: Address) -> bool {
        storage::is_lender(&e, &account)
    }

    pub fn is_inspector(e: Env, account: Address) -> bool {
        storage::is_inspector(&e, &account)
    }

    pub fn admin(e: Env) -> Result<Address, Error> {
        storage::get_admin(&e)
    }

    // ---- helpers ----

    fn require_admin(e: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != storage::get_admin(e)? {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn active_listing(listings: &Map<u64, Listing>, token_id: u64) -> Result<Listing, Error> {
        match listings.get(token_id) {
            Some(listing) if listing.is_listed => Ok(listing),
            _ => Err(Error::NotListed),
        }
    }

    /// Terminal form of a listing: deactivated, every flag and balance reset
    /// so the token can start a fresh episode.
    fn closed(listing: &Listing) -> Listing {
        Listing {
            seller: listing.seller.clone(),
            listing_price: listing.listing_price,
            down_payment: listing.down_payment,
            is_listed: false,
            inspected: false,
            lender_approved: false,
            lender_paid: false,
            escrow_amount: 0,
            lender: None,
        }
    }
}
