use std::{future::Future, sync::Arc};

use futures::future::BoxFuture;
use tokio::sync::OnceCell;

use super::central::FakeCentral;
use crate::{
    error::Error,
    transport::{CentralState, FakeAdapterTransport, Request},
};

type Connector =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn FakeAdapterTransport>, Error>> + Send + Sync>;

/// Entry point for test scripts: adapter-level controls over the host-side
/// fake Bluetooth implementation.
///
/// The channel binding to the host fake is established lazily on first use
/// and memoized for the lifetime of this instance; there is no teardown,
/// tests are expected to run in fresh processes.
pub struct FakeBluetooth {
    connector: Connector,
    channel: OnceCell<Arc<dyn FakeAdapterTransport>>,
}

impl FakeBluetooth {
    pub fn new<C, F>(connect: C) -> Self
    where
        C: Fn() -> F + Send + Sync + 'static,
        F: Future<Output = Result<Arc<dyn FakeAdapterTransport>, Error>> + Send + 'static,
    {
        FakeBluetooth {
            connector: Box::new(move || Box::pin(connect())),
            channel: OnceCell::new(),
        }
    }

    /// Shorthand for an already-established binding, typically an in-process
    /// test double.
    pub fn with_transport(transport: Arc<dyn FakeAdapterTransport>) -> Self {
        FakeBluetooth::new(move || {
            let transport = transport.clone();
            async move { Ok(transport) }
        })
    }

    async fn channel(&self) -> Result<&Arc<dyn FakeAdapterTransport>, Error> {
        self.channel
            .get_or_try_init(|| {
                log::debug!("Establishing fake adapter channel binding");
                (self.connector)()
            })
            .await
    }

    /// Legacy tests that drive the old fake-adapter hook sometimes fail to
    /// clean their adapter up. The next legacy test would clean it anyway,
    /// but tests going through this client would not, so every adapter-level
    /// operation resets it first.
    async fn clear_legacy_adapter(
        &self,
        channel: &Arc<dyn FakeAdapterTransport>,
    ) -> Result<(), Error> {
        channel
            .call(Request::SetBluetoothFakeAdapter {
                adapter_name: String::new(),
            })
            .await?;
        Ok(())
    }

    /// Sets whether the platform claims to support Bluetooth Low Energy.
    /// For example Windows 7 does not support Low Energy while Windows 10
    /// does, even with no radio present.
    pub async fn set_le_supported(&self, supported: bool) -> Result<(), Error> {
        let channel = self.channel().await?;
        self.clear_legacy_adapter(channel).await?;
        channel.call(Request::SetLeSupported { supported }).await?;
        Ok(())
    }

    /// Simulates a radio in the Central/Observer role with the given
    /// web-facing `state` string (`absent`, `powered-off` or `powered-on`).
    /// LE support is forced on with a full round trip on every call, even
    /// when it is already enabled. Returns the wrapper for the new central.
    pub async fn simulate_central(&self, state: &str) -> Result<FakeCentral, Error> {
        let state = CentralState::parse(state)?;

        let channel = self.channel().await?;
        self.clear_legacy_adapter(channel).await?;
        self.set_le_supported(true).await?;

        let reply = channel.call(Request::SimulateCentral { state }).await?;
        match reply.fake_central {
            Some(central_channel) => Ok(FakeCentral::new(central_channel)),
            None => Err(Error::remote("simulateCentral failed")),
        }
    }
}
