use crate::error::Error;

/// Flag struct the host fake expects for a characteristic's properties.
/// Field names follow the remote struct, not the web-facing spellings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacteristicProperties {
    pub broadcast: bool,
    pub read: bool,
    pub write_without_response: bool,
    pub write: bool,
    pub notify: bool,
    pub indicate: bool,
    pub authenticated_signed_writes: bool,
    pub extended_properties: bool,
}

impl CharacteristicProperties {
    /// Translates the web-facing property names of
    /// BluetoothCharacteristicProperties
    /// (https://webbluetoothcg.github.io/web-bluetooth/#characteristicproperties)
    /// into the remote flag struct. Fails on the first unrecognized member.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, Error> {
        let mut properties = CharacteristicProperties::default();
        for name in names {
            match name.as_ref() {
                "broadcast" => properties.broadcast = true,
                "read" => properties.read = true,
                "write_without_response" => properties.write_without_response = true,
                "write" => properties.write = true,
                "notify" => properties.notify = true,
                "indicate" => properties.indicate = true,
                "authenticatedSignedWrites" => properties.authenticated_signed_writes = true,
                "extended_properties" => properties.extended_properties = true,
                unknown => {
                    return Err(Error::invalid_input(format!(
                        "Invalid member '{}' for CharacteristicProperties",
                        unknown
                    )))
                }
            }
        }
        Ok(properties)
    }
}
