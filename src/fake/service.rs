use std::sync::Arc;

use super::{characteristic::FakeRemoteGattCharacteristic, properties::CharacteristicProperties};
use crate::{
    error::Error,
    transport::{FakeAdapterTransport, Request},
    uuid::{self, UuidArg},
};

/// One GATT service in a simulated peripheral's attribute tree.
#[derive(Clone)]
pub struct FakeRemoteGattService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    service_id: String,
    peripheral_address: String,
    channel: Arc<dyn FakeAdapterTransport>,
}

impl std::fmt::Debug for FakeRemoteGattService {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FakeRemoteGattService")
            .field("service_id", &self.inner.service_id)
            .field("peripheral_address", &self.inner.peripheral_address)
            .finish()
    }
}

impl FakeRemoteGattService {
    pub(crate) fn new(
        service_id: String,
        peripheral_address: String,
        channel: Arc<dyn FakeAdapterTransport>,
    ) -> Self {
        FakeRemoteGattService {
            inner: Arc::new(ServiceInner {
                service_id,
                peripheral_address,
                channel,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.service_id
    }

    /// Adds a GATT characteristic with `uuid` and the web-facing property
    /// names in `properties` under this service, to be found when the
    /// peripheral's attributes are discovered. Returns its wrapper.
    pub async fn add_fake_characteristic(
        &self,
        uuid: impl Into<UuidArg>,
        properties: &[&str],
    ) -> Result<FakeRemoteGattCharacteristic, Error> {
        let characteristic_uuid = uuid::get_characteristic(uuid)?;
        let properties = CharacteristicProperties::from_names(properties)?;
        let reply = self
            .inner
            .channel
            .call(Request::AddFakeCharacteristic {
                characteristic_uuid,
                properties,
                service_id: self.inner.service_id.clone(),
                address: self.inner.peripheral_address.clone(),
            })
            .await?;
        match reply.characteristic_id {
            Some(characteristic_id) => Ok(FakeRemoteGattCharacteristic::new(
                characteristic_id,
                self.inner.service_id.clone(),
                self.inner.peripheral_address.clone(),
                self.inner.channel.clone(),
            )),
            None => Err(Error::remote("addFakeCharacteristic failed")),
        }
    }
}
