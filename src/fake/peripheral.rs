use std::sync::Arc;

use super::service::FakeRemoteGattService;
use crate::{
    error::Error,
    transport::{FakeAdapterTransport, Request},
    uuid::{self, UuidArg},
};

/// One simulated remote device. Configures connection and discovery
/// outcomes and builds up the device's GATT attribute tree host-side.
#[derive(Clone)]
pub struct FakePeripheral {
    inner: Arc<PeripheralInner>,
}

struct PeripheralInner {
    address: String,
    channel: Arc<dyn FakeAdapterTransport>,
}

impl FakePeripheral {
    pub(crate) fn new(address: String, channel: Arc<dyn FakeAdapterTransport>) -> Self {
        FakePeripheral {
            inner: Arc::new(PeripheralInner { address, channel }),
        }
    }

    pub fn address(&self) -> &str {
        &self.inner.address
    }

    /// Whether two wrappers are the same registry entry, not merely the same
    /// address.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Queues `code` as the response to the next GATT connection request.
    /// `code` is an HCI error code from BT 4.2 Vol 2 Part D 1.3, or a
    /// platform value outside that range, e.g. Android's 0x101 GATT failure.
    pub async fn set_next_gatt_connection_response(&self, code: u32) -> Result<(), Error> {
        let reply = self
            .inner
            .channel
            .call(Request::SetNextGattConnectionResponse {
                address: self.inner.address.clone(),
                code,
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("setNextGATTConnectionResponse failed."));
        }
        Ok(())
    }

    /// Queues `code` as the response to the next GATT attribute discovery,
    /// reported once primary service, relationship, characteristic and
    /// descriptor discovery have all completed or one of them failed.
    pub async fn set_next_gatt_discovery_response(&self, code: u32) -> Result<(), Error> {
        let reply = self
            .inner
            .channel
            .call(Request::SetNextGattDiscoveryResponse {
                address: self.inner.address.clone(),
                code,
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("setNextGATTDiscoveryResponse failed."));
        }
        Ok(())
    }

    /// Adds a GATT service with `uuid` to be discovered when the
    /// peripheral's attributes are discovered, and returns its wrapper.
    pub async fn add_fake_service(
        &self,
        uuid: impl Into<UuidArg>,
    ) -> Result<FakeRemoteGattService, Error> {
        let service_uuid = uuid::get_service(uuid)?;
        let reply = self
            .inner
            .channel
            .call(Request::AddFakeService {
                address: self.inner.address.clone(),
                service_uuid,
            })
            .await?;
        match reply.service_id {
            Some(service_id) => Ok(FakeRemoteGattService::new(
                service_id,
                self.inner.address.clone(),
                self.inner.channel.clone(),
            )),
            None => Err(Error::remote("addFakeService failed")),
        }
    }

    /// Simulates an indication from the peripheral's `Service Changed`
    /// characteristic (BT 4.2 Vol 3 Part G 7.1), signaled when attributes
    /// are changed, added or removed. Attribute handles are not exposed at
    /// this level, so the indication covers the peripheral's full handle
    /// range.
    pub async fn simulate_gatt_services_changed(&self) -> Result<(), Error> {
        let reply = self
            .inner
            .channel
            .call(Request::SimulateGattServicesChanged {
                address: self.inner.address.clone(),
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("simulateGATTServicesChanged failed."));
        }
        Ok(())
    }
}
