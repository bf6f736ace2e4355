use std::{error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    /// A local precondition failed before any request reached the host fake.
    InvalidInput,
    /// A web-facing string did not map to a known remote enumeration value.
    UnsupportedValue,
    /// The host fake rejected the forwarded operation.
    RemoteFailure,
    ChannelError,
}

impl From<ErrorType> for &'static str {
    fn from(error_type: ErrorType) -> &'static str {
        match error_type {
            ErrorType::InvalidInput => "InvalidInput",
            ErrorType::UnsupportedValue => "UnsupportedValue",
            ErrorType::RemoteFailure => "RemoteFailure",
            ErrorType::ChannelError => "ChannelError",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(self: &Self, f: &mut fmt::Formatter) -> fmt::Result {
        let error_type: &str = self.clone().into();
        write!(f, "<WebBluetoothTest {} Error>", error_type)
    }
}

impl error::Error for ErrorType {}

#[derive(Debug, Clone)]
pub struct Error {
    name: String,
    description: String,
    combined_description: String,
    error_type: ErrorType,
}

impl Error {
    pub fn new<T: Into<String>>(name: T, description: T, error_type: ErrorType) -> Self {
        let name: String = name.into();
        let description: String = description.into();
        let combined_description = format!("{}: {}", name, description);
        Error {
            name,
            description,
            combined_description,
            error_type,
        }
    }

    pub fn from_type(error_type: ErrorType) -> Self {
        let name: String = error_type.to_string();
        let description: String = error_type.to_string();
        let combined_description = format!("{}: {}", name, description);
        Error {
            name,
            description,
            combined_description,
            error_type,
        }
    }

    pub fn from_string(error: String, error_type: ErrorType) -> Self {
        let name: String = error_type.to_string();
        let description: String = error;
        let combined_description = format!("{}: {}", name, description);
        Error {
            name,
            description,
            combined_description,
            error_type,
        }
    }

    pub fn invalid_input<T: Into<String>>(description: T) -> Self {
        Error::from_string(description.into(), ErrorType::InvalidInput)
    }

    pub fn unsupported_value<T: Into<String>>(description: T) -> Self {
        Error::from_string(description.into(), ErrorType::UnsupportedValue)
    }

    pub fn remote<T: Into<String>>(description: T) -> Self {
        Error::from_string(description.into(), ErrorType::RemoteFailure)
    }

    pub fn error_type(&self) -> &ErrorType {
        &self.error_type
    }

    /// True for the precondition tier: the operation failed before any
    /// request was issued to the host fake.
    pub fn is_local(&self) -> bool {
        matches!(
            self.error_type,
            ErrorType::InvalidInput | ErrorType::UnsupportedValue
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Error {
    fn fmt(self: &Self, f: &mut fmt::Formatter) -> fmt::Result {
        let error_type: &str = self.error_type.clone().into();
        write!(
            f,
            "**WebBluetoothTest {} Error**\n\n\t{}:\n\t\t{}",
            error_type, self.name, self.description,
        )
    }
}

impl error::Error for Error {
    fn source(self: &Self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error_type)
    }
}
