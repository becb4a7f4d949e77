pub mod account;
pub mod lamports;
pub mod token;
pub mod vault;

pub use account::*;
pub use lamports::*;
pub use token::*;
pub use vault::*;
