pub mod error;
pub mod fake;
pub mod transport;
pub mod uuid;

pub use self::fake::FakeBluetooth;
