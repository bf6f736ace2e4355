use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::peripheral::FakePeripheral;
use crate::{
    error::{Error, ErrorType},
    transport::{FakeAdapterTransport, Request},
    uuid::{self, UuidArg},
};

/// Description of a peripheral that was already connected to the system,
/// e.g. one the user paired through the platform's own settings UI.
#[derive(Debug, Clone, Default)]
pub struct PreconnectedPeripheralOptions {
    pub address: String,
    pub name: String,
    pub known_service_uuids: Vec<UuidArg>,
}

/// A simulated radio in the Central/Observer role. Lets tests simulate the
/// events such a radio would receive and monitor the operations performed
/// through it.
#[derive(Clone)]
pub struct FakeCentral {
    inner: Arc<CentralInner>,
}

struct CentralInner {
    channel: Arc<dyn FakeAdapterTransport>,
    peripherals: Mutex<HashMap<String, FakePeripheral>>,
}

impl std::fmt::Debug for FakeCentral {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FakeCentral").finish_non_exhaustive()
    }
}

impl FakeCentral {
    pub(crate) fn new(channel: Arc<dyn FakeAdapterTransport>) -> Self {
        FakeCentral {
            inner: Arc::new(CentralInner {
                channel,
                peripherals: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Simulates a peripheral with `address`, `name` and
    /// `known_service_uuids` that has already been connected to the system.
    /// If the peripheral already exists host-side, its name and known UUIDs
    /// are updated there. Calling this twice with the same address returns
    /// the same wrapper both times.
    pub async fn simulate_preconnected_peripheral(
        &self,
        options: PreconnectedPeripheralOptions,
    ) -> Result<FakePeripheral, Error> {
        let known_service_uuids = options
            .known_service_uuids
            .iter()
            .map(|arg| uuid::get_service(arg.clone()))
            .collect::<Result<Vec<_>, Error>>()?;

        self.inner
            .channel
            .call(Request::SimulatePreconnectedPeripheral {
                address: options.address.clone(),
                name: options.name,
                known_service_uuids,
            })
            .await?;

        let mut peripherals = match self.inner.peripherals.lock() {
            Ok(peripherals) => peripherals,
            Err(err) => return Err(Error::from_string(err.to_string(), ErrorType::ChannelError)),
        };
        let peripheral = peripherals
            .entry(options.address.clone())
            .or_insert_with(|| FakePeripheral::new(options.address, self.inner.channel.clone()));
        Ok(peripheral.clone())
    }
}
