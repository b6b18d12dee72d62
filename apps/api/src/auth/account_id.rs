//! Account id issuance. Trait-based so tests can pin ids.
//!
//! Default: `RandomAccountIds` (9 lowercase base36 characters drawn from a v4 UUID).
//!
//! `AppState` holds an `Arc<dyn AccountIdIssuer>`.

use uuid::Uuid;

use crate::models::user::AccountId;

const ID_LENGTH: usize = 9;
const RADIX: u32 = 36;

/// Issues a fresh `AccountId` per call. No uniqueness guarantee is made.
pub trait AccountIdIssuer: Send + Sync {
    fn issue(&self) -> AccountId;
}

pub struct RandomAccountIds;

impl AccountIdIssuer for RandomAccountIds {
    fn issue(&self) -> AccountId {
        AccountId::new(encode_base36(Uuid::new_v4().as_u128(), ID_LENGTH))
    }
}

/// Encodes the low-order base36 digits of `value`, least significant first.
fn encode_base36(mut value: u128, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let digit = (value % u128::from(RADIX)) as u32;
        out.push(char::from_digit(digit, RADIX).unwrap_or('0'));
        value /= u128::from(RADIX);
    }
    out
}
