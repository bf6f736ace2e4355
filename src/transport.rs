use std::{fmt, sync::Arc};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{error::Error, fake::properties::CharacteristicProperties};

/// State of the simulated Central/Observer radio, as the host fake's
/// enumeration spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentralState {
    Absent,
    PoweredOff,
    PoweredOn,
}

impl CentralState {
    /// Maps the web-facing state string onto the remote enumeration.
    pub fn parse(state: &str) -> Result<Self, Error> {
        match state {
            "absent" => Ok(CentralState::Absent),
            "powered-off" => Ok(CentralState::PoweredOff),
            "powered-on" => Ok(CentralState::PoweredOn),
            _ => Err(Error::unsupported_value(format!(
                "Unsupported value {} for state.",
                state
            ))),
        }
    }
}

/// One request per public client operation. Variant fields carry exactly the
/// arguments the host fake expects for the remote method named by
/// [`Request::method_name`]; both are a fixed wire contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Legacy cleanup hook, always sent with an empty adapter name.
    SetBluetoothFakeAdapter {
        adapter_name: String,
    },
    SetLeSupported {
        supported: bool,
    },
    SimulateCentral {
        state: CentralState,
    },
    SimulatePreconnectedPeripheral {
        address: String,
        name: String,
        known_service_uuids: Vec<Uuid>,
    },
    SetNextGattConnectionResponse {
        address: String,
        code: u32,
    },
    SetNextGattDiscoveryResponse {
        address: String,
        code: u32,
    },
    SimulateGattServicesChanged {
        address: String,
    },
    AddFakeService {
        address: String,
        service_uuid: Uuid,
    },
    AddFakeCharacteristic {
        characteristic_uuid: Uuid,
        properties: CharacteristicProperties,
        service_id: String,
        address: String,
    },
    AddFakeDescriptor {
        descriptor_uuid: Uuid,
        characteristic_id: String,
        service_id: String,
        address: String,
    },
    SetNextReadCharacteristicResponse {
        gatt_code: u32,
        value: Option<Vec<u8>>,
        characteristic_id: String,
        service_id: String,
        address: String,
    },
    SetNextWriteCharacteristicResponse {
        gatt_code: u32,
        characteristic_id: String,
        service_id: String,
        address: String,
    },
    GetLastWrittenValue {
        characteristic_id: String,
        service_id: String,
        address: String,
    },
    RemoveFakeCharacteristic {
        characteristic_id: String,
        service_id: String,
        address: String,
    },
    SetNextReadDescriptorResponse {
        gatt_code: u32,
        value: Option<Vec<u8>>,
        descriptor_id: String,
        characteristic_id: String,
        service_id: String,
        address: String,
    },
}

impl Request {
    /// The remote method this request maps to, byte-for-byte as existing
    /// host fakes name it.
    pub fn method_name(&self) -> &'static str {
        match self {
            Request::SetBluetoothFakeAdapter { .. } => "setBluetoothFakeAdapter",
            Request::SetLeSupported { .. } => "setLESupported",
            Request::SimulateCentral { .. } => "simulateCentral",
            Request::SimulatePreconnectedPeripheral { .. } => "simulatePreconnectedPeripheral",
            Request::SetNextGattConnectionResponse { .. } => "setNextGATTConnectionResponse",
            Request::SetNextGattDiscoveryResponse { .. } => "setNextGATTDiscoveryResponse",
            Request::SimulateGattServicesChanged { .. } => "simulateGATTServicesChanged",
            Request::AddFakeService { .. } => "addFakeService",
            Request::AddFakeCharacteristic { .. } => "addFakeCharacteristic",
            Request::AddFakeDescriptor { .. } => "addFakeDescriptor",
            Request::SetNextReadCharacteristicResponse { .. } => {
                "setNextReadCharacteristicResponse"
            }
            Request::SetNextWriteCharacteristicResponse { .. } => {
                "setNextWriteCharacteristicResponse"
            }
            Request::GetLastWrittenValue { .. } => "getLastWrittenValue",
            Request::RemoveFakeCharacteristic { .. } => "removeFakeCharacteristic",
            Request::SetNextReadDescriptorResponse { .. } => "setNextReadDescriptorResponse",
        }
    }
}

/// Structured reply from the host fake. Field names are part of the wire
/// contract; a reply carries whichever subset the remote method produces.
#[derive(Clone, Default)]
pub struct Response {
    pub success: bool,
    pub value: Option<Vec<u8>>,
    pub service_id: Option<String>,
    pub characteristic_id: Option<String>,
    pub descriptor_id: Option<String>,
    /// Channel binding to the simulated central, returned by
    /// `simulateCentral` only.
    pub fake_central: Option<Arc<dyn FakeAdapterTransport>>,
}

impl Response {
    pub fn ok() -> Self {
        Response {
            success: true,
            ..Default::default()
        }
    }

    pub fn failure() -> Self {
        Response::default()
    }

    pub fn with_value(mut self, value: Option<Vec<u8>>) -> Self {
        self.value = value;
        self
    }

    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    pub fn with_characteristic_id(mut self, characteristic_id: impl Into<String>) -> Self {
        self.characteristic_id = Some(characteristic_id.into());
        self
    }

    pub fn with_descriptor_id(mut self, descriptor_id: impl Into<String>) -> Self {
        self.descriptor_id = Some(descriptor_id.into());
        self
    }

    pub fn with_fake_central(mut self, fake_central: Arc<dyn FakeAdapterTransport>) -> Self {
        self.fake_central = Some(fake_central);
        self
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Response")
            .field("success", &self.success)
            .field("value", &self.value)
            .field("service_id", &self.service_id)
            .field("characteristic_id", &self.characteristic_id)
            .field("descriptor_id", &self.descriptor_id)
            .field("fake_central", &self.fake_central.is_some())
            .finish()
    }
}

/// Channel to a host-side fake adapter: send a named request, await its
/// structured reply. Implemented by real inter-process bindings and by
/// in-process test doubles alike. Delivery order is whatever the underlying
/// channel provides; no timeouts, no cancellation, no retries.
#[async_trait]
pub trait FakeAdapterTransport: Send + Sync {
    async fn call(&self, request: Request) -> Result<Response, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_method_names_are_stable() {
        let request = Request::SetNextGattConnectionResponse {
            address: "aa:bb".to_string(),
            code: 0x101,
        };
        assert_eq!(request.method_name(), "setNextGATTConnectionResponse");

        let request = Request::SetLeSupported { supported: true };
        assert_eq!(request.method_name(), "setLESupported");
    }

    #[test]
    fn unsupported_central_state_is_a_local_error() {
        let err = CentralState::parse("bogus").unwrap_err();
        assert!(err.is_local());
        assert_eq!(err.description(), "Unsupported value bogus for state.");
    }
}
