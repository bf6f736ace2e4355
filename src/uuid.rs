use std::collections::HashMap;

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::error::Error;

pub trait ShortUuid {
    fn from_alias(alias: u32) -> Uuid;
}

impl ShortUuid for Uuid {
    fn from_alias(alias: u32) -> Uuid {
        // Bluetooth base UUID: 00000000-0000-1000-8000-00805F9B34FB.
        Uuid::from_fields(alias, 0, 0x1000, b"\x80\x00\x00\x80\x5F\x9B\x34\xFB")
    }
}

/// A UUID as test scripts are allowed to spell it: a 16/32-bit alias, a 4- or
/// 8-digit hex string, a registered well-known name, or a canonical 128-bit
/// UUID string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UuidArg {
    Alias(u32),
    Name(String),
}

impl From<u16> for UuidArg {
    fn from(alias: u16) -> Self {
        UuidArg::Alias(alias.into())
    }
}

impl From<u32> for UuidArg {
    fn from(alias: u32) -> Self {
        UuidArg::Alias(alias)
    }
}

impl From<&str> for UuidArg {
    fn from(name: &str) -> Self {
        UuidArg::Name(name.to_string())
    }
}

impl From<String> for UuidArg {
    fn from(name: String) -> Self {
        UuidArg::Name(name)
    }
}

impl From<Uuid> for UuidArg {
    fn from(uuid: Uuid) -> Self {
        UuidArg::Name(uuid.hyphenated().to_string())
    }
}

static SERVICE_NAMES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("alert_notification", 0x1811),
        ("automation_io", 0x1815),
        ("battery_service", 0x180F),
        ("blood_pressure", 0x1810),
        ("body_composition", 0x181B),
        ("bond_management", 0x181E),
        ("continuous_glucose_monitoring", 0x181F),
        ("current_time", 0x1805),
        ("cycling_power", 0x1818),
        ("cycling_speed_and_cadence", 0x1816),
        ("device_information", 0x180A),
        ("environmental_sensing", 0x181A),
        ("generic_access", 0x1800),
        ("generic_attribute", 0x1801),
        ("glucose", 0x1808),
        ("health_thermometer", 0x1809),
        ("heart_rate", 0x180D),
        ("human_interface_device", 0x1812),
        ("immediate_alert", 0x1802),
        ("indoor_positioning", 0x1821),
        ("internet_protocol_support", 0x1820),
        ("link_loss", 0x1803),
        ("location_and_navigation", 0x1819),
        ("next_dst_change", 0x1807),
        ("phone_alert_status", 0x180E),
        ("pulse_oximeter", 0x1822),
        ("reference_time_update", 0x1806),
        ("running_speed_and_cadence", 0x1814),
        ("scan_parameters", 0x1813),
        ("tx_power", 0x1804),
        ("user_data", 0x181C),
        ("weight_scale", 0x181D),
    ])
});

static CHARACTERISTIC_NAMES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("alert_level", 0x2A06),
        ("battery_level", 0x2A19),
        ("blood_pressure_measurement", 0x2A35),
        ("body_sensor_location", 0x2A38),
        ("current_time", 0x2A2B),
        ("firmware_revision_string", 0x2A26),
        ("gap.appearance", 0x2A01),
        ("gap.device_name", 0x2A00),
        ("gap.peripheral_preferred_connection_parameters", 0x2A04),
        ("gap.peripheral_privacy_flag", 0x2A02),
        ("gap.reconnection_address", 0x2A03),
        ("gatt.service_changed", 0x2A05),
        ("hardware_revision_string", 0x2A27),
        ("heart_rate_control_point", 0x2A39),
        ("heart_rate_measurement", 0x2A37),
        ("manufacturer_name_string", 0x2A29),
        ("model_number_string", 0x2A24),
        ("serial_number_string", 0x2A25),
        ("software_revision_string", 0x2A28),
        ("temperature_measurement", 0x2A1C),
        ("tx_power_level", 0x2A07),
    ])
});

static DESCRIPTOR_NAMES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("es_configuration", 0x290B),
        ("es_measurement", 0x290C),
        ("es_trigger_setting", 0x290D),
        ("external_report_reference", 0x2907),
        ("gatt.characteristic_aggregate_format", 0x2905),
        ("gatt.characteristic_extended_properties", 0x2900),
        ("gatt.characteristic_presentation_format", 0x2904),
        ("gatt.characteristic_user_description", 0x2901),
        ("gatt.client_characteristic_configuration", 0x2902),
        ("gatt.server_characteristic_configuration", 0x2903),
        ("number_of_digitals", 0x2909),
        ("report_reference", 0x2908),
        ("time_trigger_setting", 0x290E),
        ("valid_range", 0x2906),
        ("value_trigger_setting", 0x290A),
    ])
});

fn resolve(
    arg: UuidArg,
    registry: &HashMap<&'static str, u32>,
    category: &str,
) -> Result<Uuid, Error> {
    match arg {
        UuidArg::Alias(alias) => Ok(Uuid::from_alias(alias)),
        UuidArg::Name(name) => {
            if let Ok(uuid) = Uuid::parse_str(&name) {
                return Ok(uuid);
            }
            if (name.len() == 4 || name.len() == 8) && name.chars().all(|c| c.is_ascii_hexdigit())
            {
                // A 4 or 8 digit hex string is an alias spelled as text.
                let alias = u32::from_str_radix(&name, 16)
                    .map_err(|err| Error::invalid_input(err.to_string()))?;
                return Ok(Uuid::from_alias(alias));
            }
            match registry.get(name.as_str()) {
                Some(alias) => Ok(Uuid::from_alias(*alias)),
                None => Err(Error::unsupported_value(format!(
                    "Invalid {} name: '{}'",
                    category, name
                ))),
            }
        }
    }
}

/// Canonicalizes a service UUID given as an alias, hex string, well-known
/// service name or canonical UUID string.
pub fn get_service(uuid: impl Into<UuidArg>) -> Result<Uuid, Error> {
    resolve(uuid.into(), &SERVICE_NAMES, "Service")
}

pub fn get_characteristic(uuid: impl Into<UuidArg>) -> Result<Uuid, Error> {
    resolve(uuid.into(), &CHARACTERISTIC_NAMES, "Characteristic")
}

pub fn get_descriptor(uuid: impl Into<UuidArg>) -> Result<Uuid, Error> {
    resolve(uuid.into(), &DESCRIPTOR_NAMES, "Descriptor")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_expands_to_base_uuid() {
        let uuid = get_service(0x180D_u16).unwrap();
        assert_eq!(uuid.to_string(), "0000180d-0000-1000-8000-00805f9b34fb");
    }

    #[test]
    fn hex_strings_expand_like_aliases() {
        assert_eq!(
            get_service("180d").unwrap(),
            get_service(0x180D_u16).unwrap()
        );
        assert_eq!(
            get_service("0000180d").unwrap(),
            get_service(0x180D_u32).unwrap()
        );
    }

    #[test]
    fn well_known_names_resolve_per_category() {
        assert_eq!(
            get_service("heart_rate").unwrap(),
            Uuid::from_alias(0x180D)
        );
        assert_eq!(
            get_characteristic("heart_rate_measurement").unwrap(),
            Uuid::from_alias(0x2A37)
        );
        assert_eq!(
            get_descriptor("gatt.client_characteristic_configuration").unwrap(),
            Uuid::from_alias(0x2902)
        );
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let once = get_service("battery_service").unwrap();
        let twice = get_service(once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn a_service_name_is_not_a_descriptor_name() {
        assert!(get_descriptor("heart_rate").is_err());
    }

    #[test]
    fn unknown_name_fails() {
        let err = get_service("not_a_service").unwrap_err();
        assert!(err.is_local());
    }

    #[test]
    fn canonical_strings_pass_through() {
        let uuid = get_characteristic("00002a37-0000-1000-8000-00805f9b34fb").unwrap();
        assert_eq!(uuid, Uuid::from_alias(0x2A37));
    }
}
