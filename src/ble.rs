use std::time::Duration;

use anyhow::Result;
use btleplug::api::{Central, Peripheral as _, ScanFilter};
use btleplug::platform::Adapter;
use bt_uuid::UuidValue;
use log::{debug, info, warn};
use tokio::time;

/// What a scan learned about a single peripheral.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredPeripheral {
    pub id: String,
    pub local_name: Option<String>,
    pub services: Vec<UuidValue>,
}

impl DiscoveredPeripheral {
    /// Adds `uuid` unless an equal identifier (in any width) is already listed.
    pub fn add_service(&mut self, uuid: UuidValue) {
        if !self.services.contains(&uuid) {
            self.services.push(uuid);
        }
    }

    pub fn advertises(&self, uuid: &UuidValue) -> bool {
        self.services.iter().any(|service| service == uuid)
    }
}

/// Short form for SIG assigned identifiers, dashed form otherwise.
pub fn describe(uuid: &UuidValue) -> String {
    match uuid.try_to_u16() {
        Some(short) => UuidValue::from_uint16(short).to_string(),
        None => uuid.as_128bit().to_string(),
    }
}

pub struct Scanner {
    adapter: Adapter,
}

impl Scanner {
    pub fn new(adapter: Adapter) -> Self {
        Self { adapter }
    }

    pub async fn scan(&self, duration: Duration) -> Result<()> {
        info!("Scanning for {:?}", duration);
        self.adapter.start_scan(ScanFilter::default()).await?;
        time::sleep(duration).await;
        self.adapter.stop_scan().await?;
        Ok(())
    }

    pub async fn discovered(&self) -> Result<Vec<DiscoveredPeripheral>> {
        let peripherals = self.adapter.peripherals().await?;
        debug!("Adapter knows {} peripherals", peripherals.len());

        let mut result = Vec::with_capacity(peripherals.len());
        for peripheral in peripherals {
            let props = match peripheral.properties().await {
                Ok(Some(props)) => props,
                Ok(None) => {
                    warn!("  CANNOT get properties of {:?}", peripheral.id());
                    continue;
                }
                Err(err) => {
                    warn!("Cannot get properties of {:?}: {:?}", peripheral.id(), err);
                    continue;
                }
            };

            let mut discovered = DiscoveredPeripheral {
                id: format!("{:?}", peripheral.id()),
                local_name: props.local_name,
                services: Vec::new(),
            };

            for uuid in props.services.iter().chain(props.service_data.keys()) {
                discovered.add_service(UuidValue::from(*uuid));
            }

            result.push(discovered);
        }

        Ok(result)
    }
}
