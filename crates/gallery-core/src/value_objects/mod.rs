//! Value objects - immutable types that represent domain concepts

mod guest_identifier;
mod snowflake;

pub use guest_identifier::GuestIdentifier;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
