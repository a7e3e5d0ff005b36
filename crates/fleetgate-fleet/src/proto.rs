//! Messages of the `nativeconnect.api.v1.Service` fleet-data API used by the gateway.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthenticateRequest {
    #[prost(string, tag = "1")]
    pub token: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthenticateResponse {
    #[prost(string, tag = "1")]
    pub access_token: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VinAuth {
    #[prost(string, tag = "1")]
    pub vin: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthRequest {
    #[prost(oneof = "auth_request::Provider", tags = "1")]
    pub provider: ::core::option::Option<auth_request::Provider>,
}

pub mod auth_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Provider {
        #[prost(message, tag = "1")]
        Vin(super::VinAuth),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Consent {
    #[prost(message, optional, tag = "1")]
    pub provider_auth: ::core::option::Option<AuthRequest>,
    #[prost(enumeration = "Scope", repeated, tag = "2")]
    pub scopes: ::prost::alloc::vec::Vec<i32>,
    #[prost(int32, tag = "3")]
    pub region: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchVehicleSignUpRequest {
    #[prost(string, tag = "1")]
    pub consent_email: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub consent: ::prost::alloc::vec::Vec<Consent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VinWithStatus {
    #[prost(string, tag = "1")]
    pub vin: ::prost::alloc::string::String,
    #[prost(enumeration = "AddConsentStatus", tag = "2")]
    pub add_consent_status: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchVehicleSignUpResponse {
    #[prost(message, repeated, tag = "1")]
    pub vin_with_statuses: ::prost::alloc::vec::Vec<VinWithStatus>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Scope {
    Unspecified = 0,
    Read = 1,
    Command = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AddConsentStatus {
    Unspecified = 0,
    Approved = 1,
    Pending = 2,
    Rejected = 3,
    AlreadyExists = 4,
}

impl AddConsentStatus {
    /// Wire name without the `ADD_CONSENT_STATUS_` prefix.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Approved => "APPROVED",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
            Self::AlreadyExists => "ALREADY_EXISTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_values_stay_representable() {
        assert!(matches!(
            AddConsentStatus::try_from(1),
            Ok(AddConsentStatus::Approved)
        ));
        assert!(AddConsentStatus::try_from(42).is_err());
        assert_eq!(AddConsentStatus::AlreadyExists.short_name(), "ALREADY_EXISTS");
    }
}
