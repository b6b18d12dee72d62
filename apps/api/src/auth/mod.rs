// Mock account creation. Validates the signup payload and echoes back an
// account with a freshly issued id. Nothing is stored and no password is hashed.

pub mod account_id;
pub mod handlers;
pub mod signup;
