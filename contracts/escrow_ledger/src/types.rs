use soroban_sdk::{contracterror, contracttype, Address};

/// Escrow record for one property token. A record outlives its episode:
/// after settlement or cancellation it stays behind with `is_listed == false`
/// and every flag reset, ready for the token to be listed again.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    pub seller: Address,
    pub listing_price: i128,
    pub down_payment: i128,
    pub is_listed: bool,
    pub inspected: bool,
    pub lender_approved: bool,
    pub lender_paid: bool,
    /// Custody balance actually received for this listing. Authoritative for
    /// refunds and disbursement; never derived from `listing_price`.
    pub escrow_amount: i128,
    /// Who funded the loan principal, so cancellation refunds the right party.
    pub lender: Option<Address>,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    NotListed = 4,
    AlreadyListed = 5,
    InvalidTerms = 6,
    NotApproved = 7,
    AlreadyPaid = 8,
    PreconditionsNotMet = 9,
    InsufficientValue = 10,
}
