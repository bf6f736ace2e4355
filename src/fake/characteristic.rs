use std::sync::{Arc, Mutex};

use super::descriptor::FakeRemoteGattDescriptor;
use crate::{
    error::{Error, ErrorType},
    transport::{FakeAdapterTransport, Request},
    uuid::{self, UuidArg},
};

/// One GATT characteristic in a simulated peripheral's attribute tree.
#[derive(Clone)]
pub struct FakeRemoteGattCharacteristic {
    inner: Arc<CharacteristicInner>,
}

struct CharacteristicInner {
    characteristic_id: String,
    service_id: String,
    peripheral_address: String,
    channel: Arc<dyn FakeAdapterTransport>,
    // Bookkeeping only; nothing here consults it after the push.
    descriptors: Mutex<Vec<FakeRemoteGattDescriptor>>,
}

impl std::fmt::Debug for FakeRemoteGattCharacteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FakeRemoteGattCharacteristic")
            .field("characteristic_id", &self.inner.characteristic_id)
            .field("service_id", &self.inner.service_id)
            .field("peripheral_address", &self.inner.peripheral_address)
            .finish()
    }
}

impl FakeRemoteGattCharacteristic {
    pub(crate) fn new(
        characteristic_id: String,
        service_id: String,
        peripheral_address: String,
        channel: Arc<dyn FakeAdapterTransport>,
    ) -> Self {
        FakeRemoteGattCharacteristic {
            inner: Arc::new(CharacteristicInner {
                characteristic_id,
                service_id,
                peripheral_address,
                channel,
                descriptors: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.characteristic_id
    }

    /// The descriptor wrappers created through this characteristic so far.
    pub fn descriptors(&self) -> Result<Vec<FakeRemoteGattDescriptor>, Error> {
        match self.inner.descriptors.lock() {
            Ok(descriptors) => Ok(descriptors.clone()),
            Err(err) => Err(Error::from_string(err.to_string(), ErrorType::ChannelError)),
        }
    }

    /// Adds a GATT descriptor with `uuid` under this characteristic, to be
    /// found when the peripheral's attributes are discovered. Returns its
    /// wrapper.
    pub async fn add_fake_descriptor(
        &self,
        uuid: impl Into<UuidArg>,
    ) -> Result<FakeRemoteGattDescriptor, Error> {
        let descriptor_uuid = uuid::get_descriptor(uuid)?;
        let reply = self
            .inner
            .channel
            .call(Request::AddFakeDescriptor {
                descriptor_uuid,
                characteristic_id: self.inner.characteristic_id.clone(),
                service_id: self.inner.service_id.clone(),
                address: self.inner.peripheral_address.clone(),
            })
            .await?;
        let descriptor_id = match reply.descriptor_id {
            Some(descriptor_id) => descriptor_id,
            None => return Err(Error::remote("addFakeDescriptor failed")),
        };

        let descriptor = FakeRemoteGattDescriptor::new(
            descriptor_id,
            self.inner.characteristic_id.clone(),
            self.inner.service_id.clone(),
            self.inner.peripheral_address.clone(),
            self.inner.channel.clone(),
        );
        match self.inner.descriptors.lock() {
            Ok(mut descriptors) => descriptors.push(descriptor.clone()),
            Err(err) => return Err(Error::from_string(err.to_string(), ErrorType::ChannelError)),
        }
        Ok(descriptor)
    }

    /// Queues the next read response for this characteristic. `gatt_code` is
    /// a GATT error response from BT 4.2 Vol 3 Part F 3.4.1.1 or a platform
    /// value outside that range. Code 0 requires a value and a non-zero code
    /// forbids one; violating either fails before anything is sent.
    pub async fn set_next_read_response(
        &self,
        gatt_code: u32,
        value: Option<Vec<u8>>,
    ) -> Result<(), Error> {
        check_read_response_pair(gatt_code, &value)?;
        let reply = self
            .inner
            .channel
            .call(Request::SetNextReadCharacteristicResponse {
                gatt_code,
                value,
                characteristic_id: self.inner.characteristic_id.clone(),
                service_id: self.inner.service_id.clone(),
                address: self.inner.peripheral_address.clone(),
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("setNextReadCharacteristicResponse failed"));
        }
        Ok(())
    }

    /// Queues the next write response for this characteristic. The host
    /// fake ignores the queued response for characteristics that only
    /// support write-without-response.
    pub async fn set_next_write_response(&self, gatt_code: u32) -> Result<(), Error> {
        let reply = self
            .inner
            .channel
            .call(Request::SetNextWriteCharacteristicResponse {
                gatt_code,
                characteristic_id: self.inner.characteristic_id.clone(),
                service_id: self.inner.service_id.clone(),
                address: self.inner.peripheral_address.clone(),
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("setNextWriteResponse failed"));
        }
        Ok(())
    }

    /// The last value successfully written to this characteristic, or
    /// `None` if nothing was ever written. The host distinguishes that from
    /// a successful write of empty bytes.
    pub async fn get_last_written_value(&self) -> Result<Option<Vec<u8>>, Error> {
        let reply = self
            .inner
            .channel
            .call(Request::GetLastWrittenValue {
                characteristic_id: self.inner.characteristic_id.clone(),
                service_id: self.inner.service_id.clone(),
                address: self.inner.peripheral_address.clone(),
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("getLastWrittenValue failed"));
        }
        Ok(reply.value)
    }

    /// Removes this characteristic from its service host-side. Descriptor
    /// wrappers previously returned by [`Self::add_fake_descriptor`] are not
    /// invalidated; further calls through them fail host-side.
    pub async fn remove(&self) -> Result<(), Error> {
        let reply = self
            .inner
            .channel
            .call(Request::RemoveFakeCharacteristic {
                characteristic_id: self.inner.characteristic_id.clone(),
                service_id: self.inner.service_id.clone(),
                address: self.inner.peripheral_address.clone(),
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("remove failed"));
        }
        Ok(())
    }
}

pub(crate) fn check_read_response_pair(gatt_code: u32, value: &Option<Vec<u8>>) -> Result<(), Error> {
    if gatt_code == 0 && value.is_none() {
        return Err(Error::invalid_input(
            "|value| can't be null if read should success.",
        ));
    }
    if gatt_code != 0 && value.is_some() {
        return Err(Error::invalid_input(
            "|value| must be null if read should fail.",
        ));
    }
    Ok(())
}
