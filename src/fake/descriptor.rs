use std::sync::Arc;

use super::characteristic::check_read_response_pair;
use crate::{
    error::Error,
    transport::{FakeAdapterTransport, Request},
};

/// One GATT descriptor in a simulated peripheral's attribute tree.
#[derive(Clone)]
pub struct FakeRemoteGattDescriptor {
    inner: Arc<DescriptorInner>,
}

struct DescriptorInner {
    descriptor_id: String,
    characteristic_id: String,
    service_id: String,
    peripheral_address: String,
    channel: Arc<dyn FakeAdapterTransport>,
}

impl FakeRemoteGattDescriptor {
    pub(crate) fn new(
        descriptor_id: String,
        characteristic_id: String,
        service_id: String,
        peripheral_address: String,
        channel: Arc<dyn FakeAdapterTransport>,
    ) -> Self {
        FakeRemoteGattDescriptor {
            inner: Arc::new(DescriptorInner {
                descriptor_id,
                characteristic_id,
                service_id,
                peripheral_address,
                channel,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.descriptor_id
    }

    /// Queues the next read response for this descriptor, under the same
    /// code/value pairing rules as the characteristic's read response.
    pub async fn set_next_read_response(
        &self,
        gatt_code: u32,
        value: Option<Vec<u8>>,
    ) -> Result<(), Error> {
        check_read_response_pair(gatt_code, &value)?;
        let reply = self
            .inner
            .channel
            .call(Request::SetNextReadDescriptorResponse {
                gatt_code,
                value,
                descriptor_id: self.inner.descriptor_id.clone(),
                characteristic_id: self.inner.characteristic_id.clone(),
                service_id: self.inner.service_id.clone(),
                address: self.inner.peripheral_address.clone(),
            })
            .await?;
        if !reply.success {
            return Err(Error::remote("setNextReadDescriptorResponse failed"));
        }
        Ok(())
    }
}
