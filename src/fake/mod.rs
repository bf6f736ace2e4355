pub mod bluetooth;
pub mod central;
pub mod characteristic;
pub mod descriptor;
pub mod peripheral;
pub mod properties;
pub mod service;

pub use self::bluetooth::FakeBluetooth;
pub use self::central::{FakeCentral, PreconnectedPeripheralOptions};
pub use self::characteristic::FakeRemoteGattCharacteristic;
pub use self::descriptor::FakeRemoteGattDescriptor;
pub use self::peripheral::FakePeripheral;
pub use self::properties::CharacteristicProperties;
pub use self::service::FakeRemoteGattService;
